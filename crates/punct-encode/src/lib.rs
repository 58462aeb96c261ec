//! Encode arbitrary text as a JavaScript program written in punctuation.
//!
//! `punct-encode` turns source text into a program made of the 32 ASCII
//! punctuation characters (plus string-literal contents). Evaluated by a
//! JavaScript engine, the program rebuilds the text and, unless disabled,
//! runs it.
//!
//! # Architecture
//!
//! ```text
//!  CoercionOracle ──> CharsetBuilder ──┐
//!                                      ├─> Namespace ──> Emitter ──> program
//!  Quoter, KeyAllocator ──> Dictionary ┘    (root)
//! ```
//!
//! Every statement of the output extends one object, the Namespace, stored
//! in the root variable. The charset gives it a key per letter, digit and
//! space; alias batches add method names and global functions; the
//! dictionary adds repeated words. The final expression then concatenates
//! Namespace reads into the input text.
//!
//! # Example
//!
//! ```ignore
//! use punct_encode::{Config, encode};
//!
//! let encoded = encode("console.log(1)", &Config::default())?;
//! // encoded.program: "$=~[];$={___:`${++$}`,..."
//! println!("{}", encoded.stats);
//! ```
//!
//! # Coercion oracle
//!
//! Which characters a constant like `![]` or `[][[]]` yields is a fact about
//! the target engine, not about the encoder. [`CoercionOracle`] answers those
//! questions; [`V8_ORACLE`] is the built-in table for V8.

pub mod alphabet;
pub mod bootstrap;
pub mod charset;
pub mod config;
pub mod dictionary;
pub mod emit;
pub mod encoder;
pub mod error;
pub mod keys;
pub mod namespace;
pub mod oracle;
pub mod quote;
pub mod stats;

// Re-exports: entry points
pub use encoder::{Encoded, Encoder, encode};

// Re-exports: configuration and errors
pub use config::{Config, MAX_INPUT_LEN, QuoteKind, QuoteMode, QuoteStyle, QuoteWeights};
pub use error::{ConfigError, EncodeError};

// Re-exports: components
pub use charset::{Charset, CharsetBuilder, CharsetEntry};
pub use dictionary::{Dictionary, DictionaryEntry, decode_payload, encode_payload};
pub use keys::KeyAllocator;
pub use oracle::{CoercionOracle, Constant, Constructor, Form, V8_ORACLE, V8Oracle};
pub use quote::Quoter;
pub use stats::Stats;
