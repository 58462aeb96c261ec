//! Dictionary compression of repeated words.
//!
//! Words that occur more than once get a short key. Each word is stored once
//! as a numeral payload: every UTF-16 unit written in base 31, each base-31
//! digit replaced through [`NUMERAL_CIPHER`], units separated by `,`. A
//! decode routine emitted at `root[0]` expands payloads at run time; the
//! same routine handles unicode runs that have no dictionary entry.

use crate::alphabet::{NUMERAL_CIPHER, NUMERAL_RADIX, NUMERAL_SEPARATOR};
use crate::bootstrap::TO_STRING;
use crate::emit::words;
use crate::keys::KeyAllocator;
use crate::namespace::Namespace;
use crate::oracle::{Constant, Constructor};
use serde::Serialize;
use std::collections::HashMap;

/// A compressed word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryEntry {
    pub word: String,
    pub key: String,
    pub payload: String,
    pub count: usize,
}

/// Entries in key-allocation order (most frequent first).
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    /// Collect the repeated words of `source` and give each an unused key.
    ///
    /// Keys already in the Namespace are never handed out, and words the
    /// emitter covers by alias, constant or constructor are left out.
    pub fn build(source: &str, ns: &Namespace) -> Self {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for word in words(source) {
            match seen.get(word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    seen.insert(word, counts.len());
                    counts.push((word, 1));
                }
            }
        }

        counts.retain(|&(word, count)| {
            count > 1
                && word.chars().nth(1).is_some()
                && Constant::from_word(word).is_none()
                && Constructor::from_name(word).is_none()
                && ns.alias(word).is_none()
        });
        // Stable: equal counts keep first-seen order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut dictionary = Self::default();
        let keys = KeyAllocator::new(NUMERAL_CIPHER, ns.keys());
        for ((word, count), key) in counts.into_iter().zip(keys) {
            dictionary.index.insert(word.to_string(), dictionary.entries.len());
            dictionary.entries.push(DictionaryEntry {
                word: word.to_string(),
                key,
                payload: encode_payload(word),
                count,
            });
        }
        tracing::debug!(words = dictionary.len(), "built dictionary");
        dictionary
    }

    /// Key assigned to `word`.
    pub fn key(&self, word: &str) -> Option<&str> {
        self.index
            .get(word)
            .map(|&i| self.entries[i].key.as_str())
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Numeral payload of `text`.
pub fn encode_payload(text: &str) -> String {
    let cipher: Vec<char> = NUMERAL_CIPHER.chars().collect();
    let units: Vec<String> = text
        .encode_utf16()
        .map(|unit| {
            let mut n = u32::from(unit);
            let mut digits = Vec::new();
            loop {
                digits.push(n % NUMERAL_RADIX);
                n /= NUMERAL_RADIX;
                if n == 0 {
                    break;
                }
            }
            digits.iter().rev().map(|&d| cipher[d as usize]).collect()
        })
        .collect();
    units.join(&NUMERAL_SEPARATOR.to_string())
}

/// Inverse of [`encode_payload`]; `None` on symbols outside the cipher or
/// unpaired surrogates.
pub fn decode_payload(payload: &str) -> Option<String> {
    if payload.is_empty() {
        return Some(String::new());
    }
    let mut units = Vec::new();
    for numeral in payload.split(NUMERAL_SEPARATOR) {
        if numeral.is_empty() {
            return None;
        }
        let mut value: u32 = 0;
        for symbol in numeral.chars() {
            let digit = NUMERAL_CIPHER.chars().position(|c| c == symbol)? as u32;
            value = value.checked_mul(NUMERAL_RADIX)?.checked_add(digit)?;
        }
        units.push(u16::try_from(value).ok()?);
    }
    String::from_utf16(&units).ok()
}

/// Emit the decode routine at `root[0]`:
///
/// ```text
/// root[+![]] = p => p.split`,`.map(p =>
///     String.fromCharCode(parseInt([...p].map(p => DIGITS[CIPHER.indexOf(p)]).join``, 31))
/// ).join``
/// ```
///
/// where `DIGITS` is `[...Array(31).keys()].map(n => n.toString(31))`.
pub fn emit_decoder(ns: &mut Namespace) {
    let root = ns.root().to_string();
    let p = ns.scratch();
    let radix = ns.number(NUMERAL_RADIX as usize);
    let split = ns.method("|");
    let map = ns.method("^");
    let string_ctor = ns.constructor_expr(Constructor::String);
    let from_char_code = ns.method("@");
    let parse_int = ns.member("~");
    let keys = ns.method("&");
    let to_string = ns.method(TO_STRING);
    let cipher = ns.quote(NUMERAL_CIPHER);
    let index_of = ns.method("#");
    let join = ns.method("%");

    let digits = format!("[...[][{root}.$](+({radix})){keys}()]{map}({p}=>{p}{to_string}({radix}))");
    let numeral = format!("[...{p}]{map}({p}=>{digits}[{cipher}{index_of}({p})]){join}``");
    let unit = format!("{string_ctor}{from_char_code}({parse_int}({numeral},{radix}))");
    ns.push(format!("{root}[+![]]={p}=>{p}{split}`,`{map}({p}=>{unit}){join}``"));
}

/// Emit the literal dictionary at `root[-1]`, decode it into `root[1]`, and
/// spread the decoded words into the root. Emits nothing for an empty
/// dictionary.
pub fn emit_dictionary(ns: &mut Namespace, dictionary: &Dictionary) {
    if dictionary.is_empty() {
        return;
    }
    let root = ns.root().to_string();
    let p = ns.scratch();
    let k = ns.accessor();

    let mut body = Vec::with_capacity(dictionary.len());
    for entry in dictionary.entries() {
        let key = ns.quote_key(&entry.key);
        let payload = ns.quote(&entry.payload);
        body.push(format!("{key}:{payload}"));
    }
    ns.push(format!("{root}={{...{root},[~[]]:{{{}}}}}", body.join(",")));

    let object = ns.constructor_expr(Constructor::Object);
    let from_entries = ns.method("]");
    let entries = ns.method("[");
    let map = ns.method("^");
    let one = format!("+!{}", ns.quote(""));
    ns.push(format!(
        "{root}[{one}]={object}{from_entries}({object}{entries}({root}[~[]]){map}(([{k},{p}])=>[{k},{root}[+![]]({p})]))"
    ));
    ns.push(format!("{root}={{...{root},...{root}[{one}]}}"));

    for entry in dictionary.entries() {
        ns.reserve(entry.key.clone());
    }
}
