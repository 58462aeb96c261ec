//! Size statistics for one encode run.

use serde::Serialize;
use std::fmt;

/// Lengths are UTF-16 code units, matching how the target runtime counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub input_len: usize,
    pub expression_len: usize,
    pub output_len: usize,
    /// `expression_len / input_len`; `None` for empty input.
    pub ratio: Option<f64>,
}

impl Stats {
    pub fn new(input_len: usize, expression_len: usize, output_len: usize) -> Self {
        let ratio = (input_len > 0).then(|| expression_len as f64 / input_len as f64);
        Self {
            input_len,
            expression_len,
            output_len,
            ratio,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=====")?;
        writeln!(f, "STATS")?;
        writeln!(f, "=====")?;
        writeln!(f, "Input length: {}", group_thousands(self.input_len))?;
        writeln!(f, "Expression length: {}", group_thousands(self.expression_len))?;
        writeln!(f, "Output length: {}", group_thousands(self.output_len))?;
        match self.ratio {
            Some(ratio) => write!(f, "Ratio: {ratio:.2}"),
            None => write!(f, "Ratio: n/a"),
        }
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Length in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}
