//! `punct` - encode a source file as a punctuation-only JavaScript program.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use punct_encode::{Config, QuoteStyle, encode};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Encode JavaScript source as a program written only in punctuation
#[derive(Parser)]
#[command(name = "punct", version)]
struct Cli {
    /// Input file (stdin if absent or "-")
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Namespace root variable
    #[arg(long)]
    root: Option<String>,

    /// Quote style, e.g. "smart single double" or "cycle single backtick"
    #[arg(short, long)]
    quote_style: Option<String>,

    /// Declare the root variables with `var`
    #[arg(long)]
    strict: bool,

    /// Emit the `$root` indexing helper
    #[arg(long)]
    accessor: bool,

    /// Rebuild the text without evaluating it
    #[arg(long)]
    no_run: bool,

    /// Seed for the random quote mode
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How to report size statistics (on stderr)
    #[arg(long, value_enum, default_value = "text")]
    stats: StatsFormat,

    /// Log each encoding stage
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatsFormat {
    /// Banner block
    Text,
    /// One JSON object
    Json,
    /// Nothing
    None,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout only ever carries the program.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    tracing::debug!(root = %config.root, quote_style = %config.quote_style, "loaded config");

    let source = read_input(cli.input.as_deref())?;
    let encoded = encode(&source, &config)?;

    match &cli.output {
        Some(path) => std::fs::write(path, &encoded.program)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(encoded.program.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")?;
        }
    }

    match cli.stats {
        StatsFormat::Text => eprintln!("{}", encoded.stats),
        StatsFormat::Json => eprintln!("{}", serde_json::to_string(&encoded.stats)?),
        StatsFormat::None => {}
    }
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(style) = &cli.quote_style {
        config.quote_style = style.parse::<QuoteStyle>()?;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.strict_mode |= cli.strict;
    config.accessor |= cli.accessor;
    if cli.no_run {
        config.run = false;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("failed to read stdin")?;
            Ok(source)
        }
    }
}
