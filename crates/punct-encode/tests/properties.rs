//! Properties of encoder output that hold without evaluating it.
//!
//! Run `cargo insta review` to update snapshots after intentional changes.

use punct_encode::alphabet::{NUMERAL_CIPHER, RESTRICTED_ALPHABET};
use punct_encode::{
    Config, ConfigError, EncodeError, KeyAllocator, Stats, decode_payload, encode,
};
use std::collections::HashSet;

/// `program` with the text of every string and template literal removed.
/// Code inside template substitutions is kept.
fn strip_literals(program: &str) -> String {
    let mut out = String::new();
    strip_code(&mut program.chars().peekable(), &mut out, false);
    out
}

type Chars<'a> = std::iter::Peekable<std::str::Chars<'a>>;

/// Copy code to `out` up to the end of input, or up to the `}` closing a
/// template substitution when `in_substitution` is set.
fn strip_code(chars: &mut Chars<'_>, out: &mut String, in_substitution: bool) {
    let mut depth = 0usize;
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => skip_string(chars, c),
            '`' => strip_template(chars, out),
            '{' => {
                depth += 1;
                out.push(c);
            }
            '}' if in_substitution && depth == 0 => return,
            '}' => {
                depth = depth.saturating_sub(1);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
}

fn skip_string(chars: &mut Chars<'_>, delimiter: char) {
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == delimiter {
            return;
        }
    }
}

fn strip_template(chars: &mut Chars<'_>, out: &mut String) {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '`' => return,
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                strip_code(chars, out, true);
            }
            _ => {}
        }
    }
}

#[test]
fn scenario_repeated_pair_is_not_compressed() {
    let encoded = encode("aa", &Config::default()).unwrap();
    assert!(encoded.dictionary.is_empty());
    assert_eq!(encoded.expression, "[$['_;']+$['_;']][$['%']]($['-'])");
}

#[test]
fn scenario_repeated_word_gets_one_key() {
    let encoded = encode("test test test", &Config::default()).unwrap();
    insta::assert_json_snapshot!(encoded.dictionary, @r#"
    [
      {
        "word": "test",
        "key": ";",
        "payload": ";{,;^,;@,;{",
        "count": 3
      }
    ]
    "#);
    assert_eq!(encoded.expression, "[$[';'],$[';'],$[';']][$['%']]($['-'])");
}

#[test]
fn scenario_empty_input_still_bootstraps() {
    let encoded = encode("", &Config::default()).unwrap();
    assert!(encoded.program.contains("$[+![]]=_$=>"));
    assert!(encoded.program.ends_with("_$=[''][$['%']]($['-']);$['='](_$)"));
}

#[test]
fn scenario_one_over_ceiling() {
    let config = Config {
        max_input_len: 16,
        ..Config::default()
    };
    let err = encode(&"x".repeat(17), &config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "input string can only be up to 16 characters long (got 17)"
    );
}

#[test]
fn scenario_reserved_root() {
    let err = encode("x", &Config::with_root("Array")).unwrap_err();
    assert_eq!(
        err,
        EncodeError::Config(ConfigError::ReservedRoot("Array".into()))
    );
}

#[test]
fn test_invalid_roots() {
    for (root, expected) in [
        ("", ConfigError::EmptyRoot),
        ("1x", ConfigError::InvalidRoot("1x".into())),
        ("a b", ConfigError::InvalidRoot("a b".into())),
        ("a²", ConfigError::InvalidRoot("a²".into())),
        ("x½", ConfigError::InvalidRoot("x½".into())),
        ("\u{345}", ConfigError::InvalidRoot("\u{345}".into())),
        ("eval", ConfigError::ReservedRoot("eval".into())),
    ] {
        assert_eq!(
            encode("x", &Config::with_root(root)).unwrap_err(),
            EncodeError::Config(expected)
        );
    }
}

#[test]
fn test_roots_with_combining_marks_and_joiners() {
    for root in ["a\u{301}", "a\u{200d}b"] {
        let program = encode("x", &Config::with_root(root)).unwrap().program;
        assert!(program.starts_with(&format!("{root}=~[];")));
    }
}

#[test]
fn test_alphabet_containment() {
    let source = "function greet(name) {\n\treturn `Hello, ${name}! ` + 'é😀' + \"\\\"\";\n}";
    for style in [
        "smart single",
        "smart double backtick",
        "only double",
        "only backtick",
        "cycle single double backtick",
        "random single double backtick",
    ] {
        let config = Config {
            quote_style: style.parse().unwrap(),
            seed: Some(3),
            ..Config::default()
        };
        let program = encode(source, &config).unwrap().program;
        let stray: String = strip_literals(&program)
            .chars()
            .filter(|c| !RESTRICTED_ALPHABET.contains(*c))
            .collect();
        assert_eq!(stray, "", "style {style}");
    }
}

#[test]
fn test_printable_ascii_needs_no_payload_characters() {
    let program = encode("if (x) { y = [1, 2]; }", &Config::default())
        .unwrap()
        .program;
    assert!(program.chars().all(|c| RESTRICTED_ALPHABET.contains(c)));
}

#[test]
fn test_dictionary_keys_unique_and_payloads_decode() {
    let source = "alpha beta gamma alpha beta gamma delta delta épsilon épsilon 日本 日本";
    let encoded = encode(source, &Config::default()).unwrap();
    assert_eq!(encoded.dictionary.len(), 6);
    let keys: HashSet<&str> = encoded.dictionary.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys.len(), encoded.dictionary.len());
    for entry in &encoded.dictionary {
        assert_eq!(decode_payload(&entry.payload).as_deref(), Some(entry.word.as_str()));
    }
}

#[test]
fn test_determinism_across_modes() {
    let source = "while (true) { tick(); tick(); }";
    for style in ["only backtick", "cycle double single", "smart single double backtick"] {
        let config = Config {
            quote_style: style.parse().unwrap(),
            ..Config::default()
        };
        let a = encode(source, &config).unwrap();
        let b = encode(source, &config).unwrap();
        assert_eq!(a.program, b.program, "style {style}");
    }
}

#[test]
fn test_seeded_random_is_reproducible() {
    let config = Config {
        quote_style: "random single double backtick".parse().unwrap(),
        seed: Some(9),
        ..Config::default()
    };
    let a = encode("print('a') print('b')", &config).unwrap();
    let b = encode("print('a') print('b')", &config).unwrap();
    assert_eq!(a.program, b.program);
}

#[test]
fn test_key_sequence() {
    let reserved: HashSet<String> = ["_", ".", ":"].iter().map(|s| s.to_string()).collect();
    let keys: Vec<String> = KeyAllocator::new(NUMERAL_CIPHER, &reserved)
        .skip(26)
        .take(5)
        .collect();
    insta::assert_snapshot!(keys.join(" "), @r"` \ __ _. _:");
}

#[test]
fn test_stats_json() {
    insta::assert_json_snapshot!(Stats::new(8, 20, 1000), @r#"
    {
      "input_len": 8,
      "expression_len": 20,
      "output_len": 1000,
      "ratio": 2.5
    }
    "#);
}
