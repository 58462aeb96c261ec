//! Tokenizer and final-expression emitter.
//!
//! The input is split on spaces; each chunk is scanned for word, symbol and
//! unicode runs. The emitted expression builds one string per chunk and
//! joins the chunks with the space key:
//!
//! ```text
//! [chunk0,chunk1,...][root['%']](root['-'])
//! ```

use crate::dictionary::{Dictionary, encode_payload};
use crate::namespace::{Namespace, template};
use crate::oracle::{Constant, Constructor};
use regex::Regex;
use std::sync::OnceLock;

/// Class of a run within a space-delimited chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Letters and numbers, or control characters.
    Word,
    /// ASCII punctuation.
    Symbol,
    /// Anything else outside printable ASCII.
    Unicode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(
            r"(?P<word>[\p{L}\p{N}]+|[\x00-\x1F\x7F]+)|(?P<symbol>[!-/:-@\[-`{-~]+)|(?P<unicode>[^ -~]+)",
        )
        .expect("token pattern is valid")
    })
}

/// Split one chunk (text without spaces) into maximal runs.
pub fn tokenize(chunk: &str) -> impl Iterator<Item = Token<'_>> {
    token_regex().captures_iter(chunk).filter_map(|caps| {
        let (kind, m) = if let Some(m) = caps.name("word") {
            (TokenKind::Word, m)
        } else if let Some(m) = caps.name("symbol") {
            (TokenKind::Symbol, m)
        } else {
            (TokenKind::Unicode, caps.name("unicode")?)
        };
        Some(Token {
            kind,
            text: m.as_str(),
        })
    })
}

/// Every word run of `source`, in order.
pub fn words(source: &str) -> impl Iterator<Item = &str> {
    source
        .split(' ')
        .flat_map(tokenize)
        .filter(|t| t.kind == TokenKind::Word)
        .map(|t| t.text)
}

/// Builds the final expression from a fully bootstrapped Namespace.
pub struct Emitter<'a> {
    ns: &'a mut Namespace,
    dictionary: &'a Dictionary,
}

impl<'a> Emitter<'a> {
    pub fn new(ns: &'a mut Namespace, dictionary: &'a Dictionary) -> Self {
        Self { ns, dictionary }
    }

    /// Expression evaluating to `source`.
    pub fn emit(&mut self, source: &str) -> String {
        let chunks: Vec<String> = source.split(' ').map(|c| self.chunk(c)).collect();
        let join = self.ns.method("%");
        let space = self.ns.member("-");
        format!("[{}]{join}({space})", chunks.join(","))
    }

    fn chunk(&mut self, chunk: &str) -> String {
        if chunk.is_empty() {
            return self.ns.quote("");
        }
        let parts: Vec<String> = tokenize(chunk).map(|t| self.token(t)).collect();
        parts.join("+")
    }

    fn token(&mut self, token: Token<'_>) -> String {
        match token.kind {
            TokenKind::Word => self.word(token.text),
            TokenKind::Symbol => self.ns.quote(token.text),
            TokenKind::Unicode => self.numeral(token.text),
        }
    }

    fn word(&mut self, word: &str) -> String {
        if let Some(key) = self.ns.alias(word).map(str::to_string) {
            return self.ns.member(&key);
        }
        if let Some(constant) = Constant::from_word(word) {
            let expr = self.ns.constant_expr(constant);
            return template(&expr);
        }
        if let Some(ctor) = Constructor::from_name(word) {
            let ctor = self.ns.constructor_expr(ctor);
            let name = self.ns.method("?");
            return format!("{ctor}{name}");
        }
        if let Some(key) = self.dictionary.key(word) {
            return self.ns.member(key);
        }
        if self.ns.can_spell(word) {
            return self.ns.spell(word);
        }
        self.numeral(word)
    }

    /// `root[0](payload)`, decoded at run time.
    fn numeral(&mut self, text: &str) -> String {
        let payload = self.ns.quote(&encode_payload(text));
        format!("{}[+![]]({payload})", self.ns.root())
    }
}
