//! The restricted alphabet and the fixed ciphers drawn from it.

use regex::Regex;
use std::sync::OnceLock;

/// Every character allowed outside string-literal payloads.
pub const RESTRICTED_ALPHABET: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Letter position cipher: the n-th symbol stands for the n-th letter.
pub const LETTER_CIPHER: &str = ";.!:_-,?/'*+#%&^\"|~$=<>`@\\";

/// Substitution for base-31 digits (`0-9a-u`) in numeral payloads.
/// Also the key alphabet handed to the key allocator.
pub const NUMERAL_CIPHER: &str = "_.:;!?*+^-=<>~'\"/|#$%&@{}()[]`\\";

/// Digits of the widest radix the target runtime formats.
pub const RADIX_DIGITS: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Radix of numeral payloads.
pub const NUMERAL_RADIX: u32 = 31;

/// Namespace key of the space character.
pub const SPACE_KEY: &str = "-";

/// Separator between numerals of one payload.
pub const NUMERAL_SEPARATOR: char = ',';

const LOWER_MARK: char = '_';
const UPPER_MARK: char = '$';

/// Global names the root identifier must not shadow.
pub const BUILTINS: &[&str] = &[
    "Array",
    "ArrayBuffer",
    "AsyncFunction",
    "AsyncGenerator",
    "AsyncGeneratorFunction",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "eval",
    "exports",
    "Float32Array",
    "Float64Array",
    "Function",
    "Generator",
    "GeneratorFunction",
    "globalThis",
    "Infinity",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "isFinite",
    "isNaN",
    "JSON",
    "Map",
    "Math",
    "module",
    "NaN",
    "Number",
    "Object",
    "parseFloat",
    "parseInt",
    "Promise",
    "Proxy",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "this",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "undefined",
    "unescape",
    "WeakMap",
    "WeakSet",
    "WebAssembly",
];

/// Reserved words that can never be identifiers.
const RESERVED_WORDS: &[&str] = &[
    "await",
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "implements",
    "import",
    "in",
    "instanceof",
    "interface",
    "let",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "static",
    "super",
    "switch",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

/// True when `c` may appear outside string literals.
pub fn is_restricted(c: char) -> bool {
    RESTRICTED_ALPHABET.contains(c)
}

/// Whether `s` can be written as a bare identifier (dot access, object key).
///
/// Follows the runtime's identifier grammar: `ID_Start`, `$` or `_` first,
/// then `ID_Continue`, `$`, ZWNJ or ZWJ.
pub fn is_valid_identifier(s: &str) -> bool {
    identifier_regex().is_match(s) && !RESERVED_WORDS.contains(&s)
}

fn identifier_regex() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[\p{ID_Start}$_][\p{ID_Continue}$\x{200C}\x{200D}]*$")
            .expect("identifier pattern is valid")
    })
}

/// Whether `s` names a global the root identifier would clobber.
pub fn is_builtin(s: &str) -> bool {
    BUILTINS.contains(&s)
}

/// Namespace key of an ASCII letter: a case mark then its cipher symbol.
///
/// Returns `None` for anything but `a-z`/`A-Z`.
pub fn encode_letter(c: char) -> Option<String> {
    if !c.is_ascii_alphabetic() {
        return None;
    }
    let position = (c.to_ascii_lowercase() as u8 - b'a') as usize;
    let mark = if c.is_ascii_uppercase() {
        UPPER_MARK
    } else {
        LOWER_MARK
    };
    let symbol = LETTER_CIPHER.chars().nth(position)?;
    Some([mark, symbol].into_iter().collect())
}

/// Namespace key of a decimal digit: its binary form, at least three bits
/// wide, with `$` for one and `_` for zero.
pub fn encode_digit(digit: u32) -> String {
    format!("{digit:03b}")
        .chars()
        .map(|bit| if bit == '1' { UPPER_MARK } else { LOWER_MARK })
        .collect()
}

/// Namespace key for a single character, if it has one.
pub fn char_key(c: char) -> Option<String> {
    match c {
        ' ' => Some(SPACE_KEY.to_string()),
        '0'..='9' => c.to_digit(10).map(encode_digit),
        _ => encode_letter(c),
    }
}
