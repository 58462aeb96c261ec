//! The Namespace: one object in the output program, built statement by
//! statement, mapping short keys to the primitives later code needs.

use crate::alphabet::{char_key, is_valid_identifier};
use crate::oracle::{Constant, Constructor};
use crate::quote::Quoter;
use std::collections::{HashMap, HashSet};

/// Namespace state for a single encode run.
///
/// Tracks which keys exist, which characters and words they stand for, and
/// the statements emitted so far. Statement order is load-bearing: each one
/// may read keys defined by the ones before it.
pub struct Namespace {
    root: String,
    quoter: Quoter,
    keys: HashSet<String>,
    chars: HashMap<char, String>,
    aliases: HashMap<String, String>,
    statements: Vec<String>,
}

impl Namespace {
    pub fn new(root: impl Into<String>, quoter: Quoter) -> Self {
        Self {
            root: root.into(),
            quoter,
            keys: HashSet::new(),
            chars: HashMap::new(),
            aliases: HashMap::new(),
            statements: Vec::new(),
        }
    }

    /// Name of the root variable.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Name of the scratch variable (`_root`), also used for parameters.
    pub fn scratch(&self) -> String {
        format!("_{}", self.root)
    }

    /// Name of the accessor helper (`$root`).
    pub fn accessor(&self) -> String {
        format!("${}", self.root)
    }

    pub fn quote(&mut self, text: &str) -> String {
        self.quoter.quote(text)
    }

    pub fn quote_key(&mut self, text: &str) -> String {
        self.quoter.quote_key(text)
    }

    /// Expression reading `key` off the root.
    pub fn member(&mut self, key: &str) -> String {
        if is_valid_identifier(key) {
            format!("{}.{}", self.root, key)
        } else {
            let lit = self.quoter.quote(key);
            format!("{}[{}]", self.root, lit)
        }
    }

    /// `[root[key]]`, for method access on another value.
    pub fn method(&mut self, key: &str) -> String {
        format!("[{}]", self.member(key))
    }

    /// Every key defined so far.
    pub fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Reserve `key` without binding it to a character or word.
    pub fn reserve(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    /// Record that `c` is now available under its character key.
    pub fn define_char(&mut self, c: char) {
        if let Some(key) = char_key(c) {
            self.keys.insert(key.clone());
            self.chars.insert(c, key);
        }
    }

    pub fn has_char(&self, c: char) -> bool {
        self.chars.contains_key(&c)
    }

    /// Record that `key` holds the string `word`.
    pub fn define_alias(&mut self, word: &str, key: &str) {
        self.keys.insert(key.to_string());
        self.aliases.insert(word.to_string(), key.to_string());
    }

    /// Key holding the string `word`, if any.
    pub fn alias(&self, word: &str) -> Option<&str> {
        self.aliases.get(word).map(String::as_str)
    }

    /// Whether every character of `text` has a character key.
    pub fn can_spell(&self, text: &str) -> bool {
        text.chars().all(|c| self.has_char(c))
    }

    /// Expression concatenating `text` one character at a time.
    ///
    /// Characters without a key are written as quoted literals.
    pub fn spell(&mut self, text: &str) -> String {
        let parts: Vec<String> = text
            .chars()
            .map(|c| match self.chars.get(&c).cloned() {
                Some(key) => self.member(&key),
                None => self.quote(&c.to_string()),
            })
            .collect();
        if parts.is_empty() {
            return self.quote("");
        }
        parts.join("+")
    }

    /// A decimal number as a string expression built from digit keys.
    pub fn number(&mut self, n: usize) -> String {
        self.spell(&n.to_string())
    }

    /// Source expression of a constant.
    pub fn constant_expr(&mut self, constant: Constant) -> String {
        match constant {
            Constant::True => format!("!{}", self.quote("")),
            Constant::False => "![]".to_string(),
            Constant::Undefined => "[][[]]".to_string(),
            Constant::Infinity => format!("!{}/![]", self.quote("")),
            Constant::NaN => "+{}".to_string(),
            Constant::ObjectString => "{}".to_string(),
        }
    }

    /// Source expression of a value whose `constructor` is `ctor`.
    pub fn instance_expr(&mut self, ctor: Constructor) -> String {
        match ctor {
            Constructor::Array => "[]".to_string(),
            Constructor::Object => "{}".to_string(),
            Constructor::String => self.quote(""),
            Constructor::Number => "(~[])".to_string(),
            Constructor::Boolean => "(![])".to_string(),
            Constructor::RegExp => "/./".to_string(),
            Constructor::Function => "(()=>{})".to_string(),
        }
    }

    /// Expression evaluating to the constructor itself.
    ///
    /// Needs the `constructor` alias under `$`.
    pub fn constructor_expr(&mut self, ctor: Constructor) -> String {
        let instance = self.instance_expr(ctor);
        format!("{}[{}.$]", instance, self.root)
    }

    /// Append a raw statement.
    pub fn push(&mut self, statement: String) {
        self.statements.push(statement);
    }

    /// Append `root={...root,k:v,...}` and reserve its keys.
    pub fn extend(&mut self, entries: Vec<(String, String)>) {
        if entries.is_empty() {
            return;
        }
        let mut body = Vec::with_capacity(entries.len());
        for (key, expr) in entries {
            body.push(format!("{}:{}", self.quote_key(&key), expr));
            self.keys.insert(key);
        }
        let statement = format!("{0}={{...{0},{1}}}", self.root, body.join(","));
        self.statements.push(statement);
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

/// Wrap `expr` in a template literal, coercing it to a string.
pub fn template(expr: &str) -> String {
    format!("`${{{expr}}}`")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuoteWeights;

    fn namespace(style: &str) -> Namespace {
        let quoter = Quoter::new(&style.parse().unwrap(), QuoteWeights::default(), None).unwrap();
        Namespace::new("$", quoter)
    }

    #[test]
    fn test_member() {
        let mut ns = namespace("smart single");
        assert_eq!(ns.member("__"), "$.__");
        assert_eq!(ns.member("-"), "$['-']");
        assert_eq!(ns.method("%"), "[$['%']]");
    }

    #[test]
    fn test_spell() {
        let mut ns = namespace("smart double");
        for c in "ab1 ".chars() {
            ns.define_char(c);
        }
        assert!(ns.can_spell("ba 1"));
        assert!(!ns.can_spell("abc"));
        assert_eq!(ns.spell("a1"), "$[\"_;\"]+$.__$");
        assert_eq!(ns.spell("a c"), "$[\"_;\"]+$[\"-\"]+\"c\"");
        assert_eq!(ns.spell(""), "\"\"");
    }

    #[test]
    fn test_extend() {
        let mut ns = namespace("smart single");
        ns.extend(vec![
            ("+".to_string(), "1".to_string()),
            ("$".to_string(), "2".to_string()),
        ]);
        assert_eq!(ns.statements(), ["$={...$,'+':1,$:2}"]);
        assert!(ns.has_key("+") && ns.has_key("$"));
        ns.extend(Vec::new());
        assert_eq!(ns.statements().len(), 1);
    }

    #[test]
    fn test_template() {
        assert_eq!(template("![]"), "`${![]}`");
    }

    #[test]
    fn test_source_expressions() {
        let mut ns = namespace("smart backtick");
        assert_eq!(ns.constant_expr(Constant::Infinity), "!``/![]");
        assert_eq!(ns.constructor_expr(Constructor::String), "``[$.$]");
        assert_eq!(ns.constructor_expr(Constructor::Function), "(()=>{})[$.$]");
    }
}
