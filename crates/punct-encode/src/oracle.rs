//! Coercion oracle: what the target runtime turns literal forms into.
//!
//! The encoder never runs the target runtime. Everything it needs to know
//! about string conversions is asked of a [`CoercionOracle`], so the
//! algorithm stays independent of the engine that executes the output.

/// Constants reachable from a handful of punctuation characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constant {
    True,
    False,
    Undefined,
    Infinity,
    NaN,
    /// The string form of an empty object literal.
    ObjectString,
}

impl Constant {
    /// Constants in the order the charset scans them.
    pub const ALL: [Constant; 6] = [
        Constant::True,
        Constant::False,
        Constant::Undefined,
        Constant::Infinity,
        Constant::NaN,
        Constant::ObjectString,
    ];

    /// Source word naming this constant, if one exists.
    pub fn word(self) -> Option<&'static str> {
        match self {
            Constant::True => Some("true"),
            Constant::False => Some("false"),
            Constant::Undefined => Some("undefined"),
            Constant::Infinity => Some("Infinity"),
            Constant::NaN => Some("NaN"),
            Constant::ObjectString => None,
        }
    }

    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.word() == Some(word))
    }
}

/// Built-in constructors reachable through `<literal>.constructor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constructor {
    Array,
    Object,
    String,
    Number,
    Boolean,
    RegExp,
    Function,
}

impl Constructor {
    /// Constructors in the order the charset scans them.
    pub const ALL: [Constructor; 7] = [
        Constructor::Array,
        Constructor::Object,
        Constructor::String,
        Constructor::Number,
        Constructor::Boolean,
        Constructor::RegExp,
        Constructor::Function,
    ];

    /// The constructor's `name`.
    pub fn name(self) -> &'static str {
        match self {
            Constructor::Array => "Array",
            Constructor::Object => "Object",
            Constructor::String => "String",
            Constructor::Number => "Number",
            Constructor::Boolean => "Boolean",
            Constructor::RegExp => "RegExp",
            Constructor::Function => "Function",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// A literal form whose string value the encoder needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Form {
    /// The constant, coerced to a string.
    Constant(Constant),
    /// The constructor function, coerced to a string.
    Constructor(Constructor),
    /// `escape` applied to a one-character string.
    Escaped(char),
    /// `Object.prototype.toString` called with no receiver.
    UndefinedTag,
}

/// Answers "expression E evaluates to string V" for the forms in [`Form`].
pub trait CoercionOracle: Send + Sync {
    /// Engine identifier (e.g. "v8").
    fn engine(&self) -> &'static str;

    /// String value of `form` under the target runtime.
    fn string_value(&self, form: Form) -> String;

    /// Position of `c` in the string value of `form`.
    fn position(&self, form: Form, c: char) -> Option<usize> {
        self.string_value(form).chars().position(|x| x == c)
    }
}

/// Static instance of the V8 oracle.
pub static V8_ORACLE: V8Oracle = V8Oracle;

/// String conversions as performed by V8 (Node.js, Chromium).
pub struct V8Oracle;

impl CoercionOracle for V8Oracle {
    fn engine(&self) -> &'static str {
        "v8"
    }

    fn string_value(&self, form: Form) -> String {
        match form {
            Form::Constant(constant) => match constant {
                Constant::ObjectString => "[object Object]".to_string(),
                other => other.word().unwrap_or_default().to_string(),
            },
            Form::Constructor(ctor) => format!("function {}() {{ [native code] }}", ctor.name()),
            Form::Escaped(c) => escape(c),
            Form::UndefinedTag => "[object Undefined]".to_string(),
        }
    }
}

/// The legacy `escape` global for a single character.
fn escape(c: char) -> String {
    const UNESCAPED: &str = "@*_+-./";
    if c.is_ascii_alphanumeric() || UNESCAPED.contains(c) {
        return c.to_string();
    }
    let mut out = String::new();
    let mut units = [0u16; 2];
    for unit in c.encode_utf16(&mut units) {
        if *unit < 0x100 {
            out.push_str(&format!("%{:02X}", unit));
        } else {
            out.push_str(&format!("%u{:04X}", unit));
        }
    }
    out
}
