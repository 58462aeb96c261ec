//! Encoder configuration.

use crate::alphabet::{is_builtin, is_valid_identifier};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest input accepted by default, in UTF-16 code units.
pub const MAX_INPUT_LEN: usize = 536_870_888;

/// A kind of string-literal delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteKind {
    Single,
    Double,
    Backtick,
}

impl QuoteKind {
    pub const ALL: [QuoteKind; 3] = [QuoteKind::Single, QuoteKind::Double, QuoteKind::Backtick];

    /// The delimiter character.
    pub fn delimiter(self) -> char {
        match self {
            QuoteKind::Single => '\'',
            QuoteKind::Double => '"',
            QuoteKind::Backtick => '`',
        }
    }

    fn token(self) -> &'static str {
        match self {
            QuoteKind::Single => "single",
            QuoteKind::Double => "double",
            QuoteKind::Backtick => "backtick",
        }
    }
}

/// How a quote kind is picked for each literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMode {
    /// Always the first allowed kind.
    Only,
    /// Round-robin over the allowed kinds.
    Cycle,
    /// Weighted random draw over the allowed kinds.
    Random,
    /// Shortest literal, first allowed kind on ties.
    #[default]
    Smart,
}

impl QuoteMode {
    fn token(self) -> &'static str {
        match self {
            QuoteMode::Only => "only",
            QuoteMode::Cycle => "cycle",
            QuoteMode::Random => "random",
            QuoteMode::Smart => "smart",
        }
    }
}

/// Allowed quote kinds plus the selection mode, written as space-separated
/// tokens such as `"smart single double"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuoteStyle {
    pub kinds: Vec<QuoteKind>,
    pub mode: QuoteMode,
}

impl QuoteStyle {
    pub fn new(kinds: Vec<QuoteKind>, mode: QuoteMode) -> Self {
        Self { kinds, mode }
    }

    /// Check the style allows at least one kind.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kinds.is_empty() {
            return Err(ConfigError::NoQuoteKinds);
        }
        Ok(())
    }
}

impl Default for QuoteStyle {
    fn default() -> Self {
        Self::new(vec![QuoteKind::Single], QuoteMode::Smart)
    }
}

impl FromStr for QuoteStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut kinds = Vec::new();
        let mut mode: Option<QuoteMode> = None;
        for token in s.split_whitespace() {
            let kind = QuoteKind::ALL.into_iter().find(|k| k.token() == token);
            if let Some(kind) = kind {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
                continue;
            }
            let parsed = [
                QuoteMode::Only,
                QuoteMode::Cycle,
                QuoteMode::Random,
                QuoteMode::Smart,
            ]
            .into_iter()
            .find(|m| m.token() == token)
            .ok_or_else(|| ConfigError::UnknownQuoteToken(token.to_string()))?;
            match mode {
                Some(existing) if existing != parsed => {
                    return Err(ConfigError::ConflictingQuoteModes(
                        existing.token().to_string(),
                        parsed.token().to_string(),
                    ));
                }
                _ => mode = Some(parsed),
            }
        }
        if kinds.is_empty() {
            kinds.push(QuoteKind::Single);
        }
        Ok(Self::new(kinds, mode.unwrap_or_default()))
    }
}

impl TryFrom<String> for QuoteStyle {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QuoteStyle> for String {
    fn from(style: QuoteStyle) -> Self {
        style.to_string()
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode.token())?;
        for kind in &self.kinds {
            write!(f, " {}", kind.token())?;
        }
        Ok(())
    }
}

/// Relative odds of each kind under [`QuoteMode::Random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteWeights {
    pub single: u32,
    pub double: u32,
    pub backtick: u32,
}

impl QuoteWeights {
    pub fn weight(&self, kind: QuoteKind) -> u32 {
        match kind {
            QuoteKind::Single => self.single,
            QuoteKind::Double => self.double,
            QuoteKind::Backtick => self.backtick,
        }
    }
}

impl Default for QuoteWeights {
    /// Ninths: backtick 3, double 4, single 2.
    fn default() -> Self {
        Self {
            single: 2,
            double: 4,
            backtick: 3,
        }
    }
}

/// Everything one encode call needs besides the input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Name of the Namespace root variable.
    pub root: String,
    /// Declare the root variables with `var` instead of assigning globals.
    pub strict_mode: bool,
    pub quote_style: QuoteStyle,
    /// Emit the `$root` tagged-template indexing helper.
    pub accessor: bool,
    /// Evaluate the reconstructed text at the end of the program.
    pub run: bool,
    pub max_input_len: usize,
    /// Seed for random quote selection; entropy when absent.
    pub seed: Option<u64>,
    pub weights: QuoteWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: "$".to_string(),
            strict_mode: false,
            quote_style: QuoteStyle::default(),
            accessor: false,
            run: true,
            max_input_len: MAX_INPUT_LEN,
            seed: None,
            weights: QuoteWeights::default(),
        }
    }
}

impl Config {
    /// Config with the given root and defaults elsewhere.
    pub fn with_root(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Reject an unusable root identifier or quote style.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_root(&self.root)?;
        self.quote_style.validate()
    }
}

/// The root must be an identifier that shadows no global.
pub fn validate_root(root: &str) -> Result<(), ConfigError> {
    if root.trim().is_empty() {
        return Err(ConfigError::EmptyRoot);
    }
    if !is_valid_identifier(root) {
        return Err(ConfigError::InvalidRoot(root.to_string()));
    }
    if is_builtin(root) {
        return Err(ConfigError::ReservedRoot(root.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_style() {
        let style: QuoteStyle = "smart backtick".parse().unwrap();
        assert_eq!(style.kinds, vec![QuoteKind::Backtick]);
        assert_eq!(style.mode, QuoteMode::Smart);

        let style: QuoteStyle = "double cycle single double".parse().unwrap();
        assert_eq!(style.kinds, vec![QuoteKind::Double, QuoteKind::Single]);
        assert_eq!(style.mode, QuoteMode::Cycle);
    }

    #[test]
    fn test_parse_quote_style_defaults() {
        let style: QuoteStyle = "".parse().unwrap();
        assert_eq!(style, QuoteStyle::default());
        let style: QuoteStyle = "only".parse().unwrap();
        assert_eq!(style.kinds, vec![QuoteKind::Single]);
    }

    #[test]
    fn test_parse_quote_style_errors() {
        assert_eq!(
            "smart fancy".parse::<QuoteStyle>(),
            Err(ConfigError::UnknownQuoteToken("fancy".into()))
        );
        assert_eq!(
            "only cycle".parse::<QuoteStyle>(),
            Err(ConfigError::ConflictingQuoteModes("only".into(), "cycle".into()))
        );
    }

    #[test]
    fn test_empty_kinds_rejected() {
        let style = QuoteStyle::new(vec![], QuoteMode::Only);
        assert_eq!(style.validate(), Err(ConfigError::NoQuoteKinds));
    }

    #[test]
    fn test_validate_root() {
        assert_eq!(validate_root("$"), Ok(()));
        assert_eq!(validate_root("_x"), Ok(()));
        assert_eq!(validate_root(""), Err(ConfigError::EmptyRoot));
        assert_eq!(validate_root("  "), Err(ConfigError::EmptyRoot));
        assert_eq!(
            validate_root("a b"),
            Err(ConfigError::InvalidRoot("a b".into()))
        );
        assert_eq!(
            validate_root("Array"),
            Err(ConfigError::ReservedRoot("Array".into()))
        );
        assert_eq!(
            validate_root("while"),
            Err(ConfigError::InvalidRoot("while".into()))
        );
    }

    #[test]
    fn test_config_from_toml() {
        let config: Config = toml::from_str(
            r#"
            root = "_"
            strict-mode = true
            quote-style = "cycle single double"

            [weights]
            backtick = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.root, "_");
        assert!(config.strict_mode);
        assert!(config.run);
        assert_eq!(config.quote_style.mode, QuoteMode::Cycle);
        assert_eq!(config.weights.backtick, 0);
        assert_eq!(config.weights.double, 4);
        assert_eq!(config.max_input_len, MAX_INPUT_LEN);
    }

    #[test]
    fn test_quote_style_display_roundtrip() {
        let style: QuoteStyle = "backtick random double".parse().unwrap();
        assert_eq!(style.to_string(), "random backtick double");
        assert_eq!(style.to_string().parse::<QuoteStyle>().unwrap(), style);
    }
}
