//! Two-layer character table.
//!
//! Layer 1 takes characters from constants that punctuation alone can
//! produce (`![]` is `false`, `{}` stringifies to `[object Object]`, ...).
//! Layer 2 takes the remaining characters from the source text of built-in
//! constructors, indexing it with the digit keys layer 1 defined. Digits
//! come first of all: `root` starts at `-1` and each digit entry increments
//! it, so the layer-1 entries interleaved after digit `d` index their
//! constant with `root` itself.

use crate::alphabet::char_key;
use crate::namespace::{Namespace, template};
use crate::oracle::{CoercionOracle, Constant, Constructor, Form};

/// Number of digit entries, and the bound on layer-1 positions.
pub const DIGITS: usize = 10;

/// A literal whose string value a charset entry indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Constant(Constant),
    Constructor(Constructor),
}

impl Source {
    pub fn form(self) -> Form {
        match self {
            Source::Constant(constant) => Form::Constant(constant),
            Source::Constructor(ctor) => Form::Constructor(ctor),
        }
    }
}

/// `character` is at position `index` of the string value of `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharsetEntry {
    pub character: char,
    pub source: Source,
    pub index: usize,
}

/// Both layers, layer 1 taking priority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Charset {
    pub layer1: Vec<CharsetEntry>,
    pub layer2: Vec<CharsetEntry>,
}

impl Charset {
    pub fn get(&self, c: char) -> Option<&CharsetEntry> {
        self.layer1
            .iter()
            .chain(&self.layer2)
            .find(|e| e.character == c)
    }

    pub fn len(&self) -> usize {
        self.layer1.len() + self.layer2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a [`Charset`] from what an oracle says the literals stringify to.
pub struct CharsetBuilder<'o> {
    oracle: &'o dyn CoercionOracle,
}

impl<'o> CharsetBuilder<'o> {
    pub fn new(oracle: &'o dyn CoercionOracle) -> Self {
        Self { oracle }
    }

    pub fn build(&self) -> Charset {
        let layer1 = self.layer1();
        let layer2 = self.layer2(&layer1);
        Charset { layer1, layer2 }
    }

    /// First occurrence of each letter or space in the constants, limited
    /// to positions a single digit can index.
    pub fn layer1(&self) -> Vec<CharsetEntry> {
        let mut entries = Vec::new();
        for constant in Constant::ALL {
            let source = Source::Constant(constant);
            let text: String = self
                .oracle
                .string_value(source.form())
                .chars()
                .take(DIGITS)
                .collect();
            scan(&text, source, &[], &mut entries);
        }
        entries
    }

    /// Letters and spaces found only in constructor source text.
    pub fn layer2(&self, layer1: &[CharsetEntry]) -> Vec<CharsetEntry> {
        let mut entries = Vec::new();
        for ctor in Constructor::ALL {
            let source = Source::Constructor(ctor);
            let text = self.oracle.string_value(source.form());
            scan(&text, source, layer1, &mut entries);
        }
        entries
    }
}

fn scan(text: &str, source: Source, known: &[CharsetEntry], entries: &mut Vec<CharsetEntry>) {
    for (index, character) in text.chars().enumerate() {
        if char_key(character).is_none() || character.is_ascii_digit() {
            continue;
        }
        let seen = |e: &CharsetEntry| e.character == character;
        if known.iter().any(seen) || entries.iter().any(seen) {
            continue;
        }
        entries.push(CharsetEntry {
            character,
            source,
            index,
        });
    }
}

/// Emit the digit and layer-1 statement: `root={___:`${++root}`,...}`.
///
/// Must run first; it turns `root` from `-1` into the Namespace object.
pub fn emit_layer1(ns: &mut Namespace, layer1: &[CharsetEntry]) {
    let root = ns.root().to_string();
    let mut body = Vec::new();
    for digit in 0..DIGITS {
        let key = crate::alphabet::encode_digit(digit as u32);
        body.push(format!("{}:{}", ns.quote_key(&key), template(&format!("++{root}"))));
        ns.define_char(char::from(b'0' + digit as u8));
        for entry in layer1.iter().filter(|e| e.index == digit) {
            let Some(key) = char_key(entry.character) else {
                continue;
            };
            let source = source_expr(ns, entry.source);
            body.push(format!("{}:{}[{root}]", ns.quote_key(&key), template(&source)));
            ns.define_char(entry.character);
        }
    }
    ns.push(format!("{root}={{{}}}", body.join(",")));
}

/// Emit the layer-2 statement. Needs the `constructor` alias.
pub fn emit_layer2(ns: &mut Namespace, layer2: &[CharsetEntry]) {
    let mut entries = Vec::new();
    for entry in layer2 {
        let Some(key) = char_key(entry.character) else {
            continue;
        };
        let source = source_expr(ns, entry.source);
        let root = ns.root().to_string();
        let index = ns.number(entry.index);
        entries.push((key, format!("{}[{index}]", template(&format!("{source}[{root}.$]")))));
    }
    ns.extend(entries);
    for entry in layer2 {
        ns.define_char(entry.character);
    }
}

fn source_expr(ns: &mut Namespace, source: Source) -> String {
    match source {
        Source::Constant(constant) => ns.constant_expr(constant),
        Source::Constructor(ctor) => ns.instance_expr(ctor),
    }
}
