//! Round-trip tests: evaluate generated programs with node.
//!
//! Skipped (with a note on stderr) when no `node` binary is on PATH.

use punct_encode::{Config, encode};
use std::io::Write;
use std::process::Command;

fn node_available() -> bool {
    Command::new("node").arg("--version").output().is_ok()
}

/// Run `program` with node and return its stdout.
fn run_node(program: &str) -> String {
    let mut file = tempfile::Builder::new().suffix(".js").tempfile().unwrap();
    file.write_all(program.as_bytes()).unwrap();
    let output = Command::new("node").arg(file.path()).output().unwrap();
    assert!(
        output.status.success(),
        "node failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

/// Evaluate the program without running the result; print the rebuilt text.
fn rebuild(source: &str, config: &Config) -> String {
    let config = Config {
        run: false,
        ..config.clone()
    };
    let encoded = encode(source, &config).unwrap();
    let scratch = format!("_{}", config.root);
    run_node(&format!("{};process.stdout.write({scratch})", encoded.program))
}

const SAMPLES: &[&str] = &[
    "",
    " ",
    "  leading and trailing  ",
    "hello world",
    "aa",
    "test test test",
    "console.log('hi \"x\" `y` ${z}\\n', 42, Math.PI);\n\ttab",
    "const Array = true; let NaN = Function; undefined Infinity constructor",
    "for (let i = 0; i < 10; i++) { total += i * 2; } // 0123456789",
    "héllo wörld 😀 € ünïcödé ünïcödé",
    "mixedé mixedé \u{7f}\u{1}\u{7f}\u{1} GHJKLMPQTVWXYZ",
    "a\\b \\\\ '' \"\" `` ${} ${}",
];

#[test]
fn test_round_trip_default_config() {
    if !node_available() {
        eprintln!("node not found; skipping");
        return;
    }
    for sample in SAMPLES {
        assert_eq!(&rebuild(sample, &Config::default()), sample);
    }
}

#[test]
fn test_round_trip_quote_styles() {
    if !node_available() {
        eprintln!("node not found; skipping");
        return;
    }
    for style in [
        "only double",
        "smart backtick",
        "smart single double backtick",
        "cycle single double backtick",
        "random single double backtick",
    ] {
        let config = Config {
            quote_style: style.parse().unwrap(),
            seed: Some(42),
            ..Config::default()
        };
        for sample in SAMPLES {
            assert_eq!(&rebuild(sample, &config), sample, "style {style}");
        }
    }
}

#[test]
fn test_round_trip_strict_accessor_root() {
    if !node_available() {
        eprintln!("node not found; skipping");
        return;
    }
    let config = Config {
        root: "ns".into(),
        strict_mode: true,
        accessor: true,
        ..Config::default()
    };
    for sample in SAMPLES {
        assert_eq!(&rebuild(sample, &config), sample);
    }
}

#[test]
fn test_program_runs_source() {
    if !node_available() {
        eprintln!("node not found; skipping");
        return;
    }
    let source = "console.log([1, 2, 3].map(x => x * 2).join(' '))";
    let program = encode(source, &Config::default()).unwrap().program;
    assert_eq!(run_node(&program), "2 4 6\n");
}
