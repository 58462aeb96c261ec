//! String-literal quoting under a [`QuoteStyle`] policy.

use crate::alphabet::is_valid_identifier;
use crate::config::{QuoteKind, QuoteMode, QuoteStyle, QuoteWeights};
use crate::error::ConfigError;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use std::fmt::Write;

/// Produces string literals for one encode run.
///
/// The `cycle` counter and the `random` generator live here, so one
/// `Quoter` must be shared by everything that quotes during a run.
pub struct Quoter {
    kinds: Vec<QuoteKind>,
    mode: QuoteMode,
    count: usize,
    random: Option<(StdRng, WeightedIndex<u32>)>,
}

impl Quoter {
    pub fn new(
        style: &QuoteStyle,
        weights: QuoteWeights,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        style.validate()?;
        let random = if style.mode == QuoteMode::Random {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            // All-zero weights leave the draw undefined; fall back to `only`.
            WeightedIndex::new(style.kinds.iter().map(|k| weights.weight(*k)))
                .ok()
                .map(|dist| (rng, dist))
        } else {
            None
        };
        Ok(Self {
            kinds: style.kinds.clone(),
            mode: style.mode,
            count: 0,
            random,
        })
    }

    /// Quote `text` as a string-literal expression.
    pub fn quote(&mut self, text: &str) -> String {
        let kind = self.pick(text);
        literal(text, kind)
    }

    /// Quote `text` for use as an object-literal key.
    ///
    /// Identifiers stay bare in `smart` mode. Template literals cannot be
    /// bare keys, so a backtick choice becomes a computed key.
    pub fn quote_key(&mut self, text: &str) -> String {
        if self.mode == QuoteMode::Smart && is_valid_identifier(text) {
            return text.to_string();
        }
        let kind = self.pick(text);
        let lit = literal(text, kind);
        if kind == QuoteKind::Backtick {
            format!("[{lit}]")
        } else {
            lit
        }
    }

    fn pick(&mut self, text: &str) -> QuoteKind {
        let kinds = &self.kinds;
        let first = kinds[0];
        match self.mode {
            QuoteMode::Only => first,
            QuoteMode::Cycle => {
                let kind = kinds[self.count % kinds.len()];
                self.count += 1;
                kind
            }
            QuoteMode::Random => match &mut self.random {
                Some((rng, dist)) => kinds[dist.sample(rng)],
                None => first,
            },
            QuoteMode::Smart => {
                let mut best = first;
                let mut best_len = literal_len(text, first);
                for &kind in &kinds[1..] {
                    let len = literal_len(text, kind);
                    if len < best_len {
                        best = kind;
                        best_len = len;
                    }
                }
                best
            }
        }
    }
}

fn literal_len(text: &str, kind: QuoteKind) -> usize {
    literal(text, kind).len()
}

/// `text` as a literal delimited by `kind`, escaped to printable ASCII.
pub fn literal(text: &str, kind: QuoteKind) -> String {
    let quote = kind.delimiter();
    let mut out = String::with_capacity(text.len() + 2);
    out.push(quote);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            '$' if kind == QuoteKind::Backtick && chars.peek() == Some(&'{') => {
                out.push_str("\\$");
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            ' '..='~' => out.push(c),
            c if (c as u32) < 0x100 => {
                write!(out, "\\x{:02x}", c as u32).unwrap();
            }
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(out, "\\u{:04x}", unit).unwrap();
                }
            }
        }
    }
    out.push(quote);
    out
}
