//! Errors raised before any encoding work starts.

use crate::stats::group_thousands;

/// Invalid configuration: bad root identifier or quote style.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid global variable: root identifier is empty")]
    EmptyRoot,

    #[error("invalid global variable: {0:?} is not a valid identifier")]
    InvalidRoot(String),

    #[error("invalid global variable: {0:?} is a reserved or built-in name")]
    ReservedRoot(String),

    #[error("quote style allows no quote kinds")]
    NoQuoteKinds,

    #[error("unknown quote style token: {0:?}")]
    UnknownQuoteToken(String),

    #[error("quote style names two modes: {0} and {1}")]
    ConflictingQuoteModes(String, String),
}

/// Error that terminates an encode call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(
        "input string can only be up to {} characters long (got {})",
        grouped(.max),
        grouped(.len)
    )]
    InputTooLarge { len: usize, max: usize },
}

fn grouped(n: &usize) -> String {
    group_thousands(*n)
}
