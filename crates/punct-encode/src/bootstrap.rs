//! Alias batches and helper accessors that follow the charset.
//!
//! Each batch can only use characters and aliases defined by the statements
//! before it, which is why the aliases are split into batches rather than
//! emitted at once.

use crate::alphabet::{RADIX_DIGITS, encode_letter};
use crate::namespace::{Namespace, template};
use crate::oracle::{CoercionOracle, Constructor, Form};

/// Spelled from layer-1 characters only; needed by layer 2 (`constructor`)
/// and by everything after it.
pub const FIRST_ALIASES: &[(&str, &str)] = &[
    ("concat", "+"),
    ("call", "!"),
    ("join", "%"),
    ("slice", "/"),
    ("return", "_"),
    ("constructor", "$"),
    ("source", ","),
];

/// Need layer-2 characters (`m`, `p`, `x`, `E`).
pub const SECOND_ALIASES: &[(&str, &str)] = &[
    ("name", "?"),
    ("map", "^"),
    ("replace", ":"),
    ("repeat", "*"),
    ("split", "|"),
    ("indexOf", "#"),
    ("source", "`"),
    ("entries", "["),
    ("fromEntries", "]"),
];

/// Need the helper letters (`C`, `h`, `k`, `U`).
pub const THIRD_ALIASES: &[(&str, &str)] = &[
    ("fromCharCode", "@"),
    ("keys", "&"),
    ("toUpperCase", "\""),
];

/// Global functions fetched through `Function("return <name>")()`.
pub const GLOBAL_FUNCTIONS: &[(&str, &str)] = &[
    ("eval", "="),
    ("escape", ">"),
    ("unescape", "<"),
    ("parseInt", "~"),
    ("parseFloat", "."),
];

/// Key of the `toString` alias.
pub const TO_STRING: &str = "'";

/// Lowercase letters no constant or constructor text contains; written as
/// their position in base 36.
const RADIX_LETTERS: &str = "hkqwz";

/// Emit one batch of string aliases: `root={...root,key:"word",...}`.
pub fn emit_aliases(ns: &mut Namespace, aliases: &[(&str, &str)]) {
    let entries: Vec<(String, String)> = aliases
        .iter()
        .map(|(word, key)| (key.to_string(), ns.spell(word)))
        .collect();
    ns.extend(entries);
    for (word, key) in aliases {
        ns.define_alias(word, key);
    }
    tracing::debug!(count = aliases.len(), "emitted alias batch");
}

/// Emit the global function aliases. Needs `constructor`, `return` and
/// the space key.
pub fn emit_global_functions(ns: &mut Namespace) {
    let mut entries = Vec::new();
    for (name, key) in GLOBAL_FUNCTIONS {
        let function = ns.constructor_expr(Constructor::Function);
        let body = format!("{}+{}+{}", ns.member("_"), ns.member("-"), ns.spell(name));
        entries.push((key.to_string(), format!("{function}({body})()")));
    }
    ns.extend(entries);
}

/// Emit the `toString` alias and the letters `C`, `D` (from `escape`).
pub fn emit_escape_letters(ns: &mut Namespace, oracle: &dyn CoercionOracle) {
    let mut entries = Vec::new();

    let string_ctor = ns.constructor_expr(Constructor::String);
    let name = ns.method("?");
    let to = ns.spell("to");
    entries.push((TO_STRING.to_string(), format!("{to}+{string_ctor}{name}")));

    let mut letters = Vec::new();
    for (letter, input) in [('C', '<'), ('D', '=')] {
        if let Some(entry) = escape_letter(ns, oracle, letter, input) {
            entries.push(entry);
            letters.push(letter);
        }
    }
    ns.extend(entries);
    ns.define_alias("toString", TO_STRING);
    for letter in letters {
        ns.define_char(letter);
    }
}

fn escape_letter(
    ns: &mut Namespace,
    oracle: &dyn CoercionOracle,
    letter: char,
    input: char,
) -> Option<(String, String)> {
    let key = encode_letter(letter)?;
    let index = oracle.position(Form::Escaped(input), letter)?;
    let escape = ns.member(">");
    let arg = ns.quote(&input.to_string());
    let index = ns.number(index);
    Some((key, format!("{escape}({arg})[{index}]")))
}

/// Emit `U` (from `Object.prototype.toString.call()`) and the letters only
/// reachable as base-36 digits.
pub fn emit_radix_letters(ns: &mut Namespace, oracle: &dyn CoercionOracle) {
    let mut entries = Vec::new();
    let mut letters = Vec::new();

    if let (Some(key), Some(index)) = (
        encode_letter('U'),
        oracle.position(Form::UndefinedTag, 'U'),
    ) {
        let to_string = ns.method(TO_STRING);
        let call = ns.method("!");
        let index = ns.number(index);
        let tag = template(&format!("{{}}{to_string}{call}()"));
        entries.push((key, format!("{tag}[{index}]")));
        letters.push('U');
    }

    for letter in RADIX_LETTERS.chars() {
        let (Some(key), Some(value)) = (encode_letter(letter), RADIX_DIGITS.find(letter)) else {
            continue;
        };
        let value = ns.number(value);
        let to_string = ns.method(TO_STRING);
        let radix = ns.number(RADIX_DIGITS.len());
        entries.push((key, format!("(+({value})){to_string}({radix})")));
        letters.push(letter);
    }

    ns.extend(entries);
    for letter in letters {
        ns.define_char(letter);
    }
}
