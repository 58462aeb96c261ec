//! Unique short keys in bijective base-N.

use std::collections::HashSet;

/// The `n`-th string of `alphabet` in bijective numbering (no zero digit):
/// `1 -> a`, `N -> last symbol`, `N + 1 -> aa`, ... `0` or an empty
/// alphabet yields `""`.
pub fn bijective(mut n: u64, alphabet: &[char]) -> String {
    let base = alphabet.len() as u64;
    if base == 0 {
        return String::new();
    }
    let mut digits = Vec::new();
    while n > 0 {
        n -= 1;
        digits.push(alphabet[(n % base) as usize]);
        n /= base;
    }
    digits.iter().rev().collect()
}

/// Lazy, never-repeating sequence of keys that skips reserved strings.
///
/// Each encode run builds its own allocator; restarting means building a
/// new one. An empty alphabet yields no keys.
#[derive(Debug, Clone)]
pub struct KeyAllocator<'a> {
    alphabet: Vec<char>,
    reserved: &'a HashSet<String>,
    next: u64,
}

impl<'a> KeyAllocator<'a> {
    pub fn new(alphabet: &str, reserved: &'a HashSet<String>) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            reserved,
            next: 1,
        }
    }
}

impl Iterator for KeyAllocator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.alphabet.is_empty() {
            return None;
        }
        while self.next < u64::MAX {
            let key = bijective(self.next, &self.alphabet);
            self.next += 1;
            if !self.reserved.contains(&key) {
                tracing::trace!(key = %key, "allocated key");
                return Some(key);
            }
        }
        None
    }
}
