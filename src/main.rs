//! kbtext - Plain-text import/export for agent knowledge bases
//!
//! Converts knowledge bases between JSON and the text format, and checks or
//! canonicalises hand-edited text files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kbtext::{
    config::KbConfig,
    knowledge::{parse, parse_with_report, serialize, KnowledgeBase},
};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kbtext")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Plain-text import/export for agent knowledge bases")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "KBTEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON knowledge base as text
    Render {
        /// JSON file ("-" for stdin)
        input: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a text export into JSON
    Import {
        /// Text file ("-" for stdin)
        input: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report what a text export contains and which lines are skipped
    Check {
        /// Text file ("-" for stdin)
        input: PathBuf,
    },

    /// Rewrite a text export in canonical form
    Fmt {
        /// Text file ("-" for stdin)
        input: PathBuf,

        /// Overwrite the input file instead of printing
        #[arg(long)]
        write: bool,
    },

    /// Summarise the configured knowledge file
    Show,

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = KbConfig::load_or_default(cli.config.as_deref())?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    init_logging(log_level, config.logging.json);

    match cli.command {
        Commands::Render { input, output } => {
            let json = read_input(&input)?;
            let kb: KnowledgeBase = serde_json::from_str(&json)
                .with_context(|| format!("Invalid knowledge base JSON in {}", input.display()))?;
            write_output(output.as_deref(), &serialize(&kb))?;
        }
        Commands::Import { input, output } => {
            let kb = parse(&read_input(&input)?)?;
            let mut json = serde_json::to_string_pretty(&kb)?;
            json.push('\n');
            write_output(output.as_deref(), &json)?;
        }
        Commands::Check { input } => {
            run_check(&input)?;
        }
        Commands::Fmt { input, write } => {
            run_fmt(&input, write)?;
        }
        Commands::Show => {
            run_show(&config)?;
        }
        Commands::Config { default } => {
            let shown = if default { KbConfig::default() } else { config };
            println!("{}", shown.to_toml()?);
        }
    }

    Ok(())
}

fn init_logging(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("kbtext={}", level).into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run_check(input: &Path) -> Result<()> {
    let text = read_input(input)?;
    let (kb, report) = parse_with_report(&text)
        .with_context(|| format!("Nothing recognized in {}", input.display()))?;

    println!("{}", kb.summary());

    if report.is_clean() {
        println!("All lines recognized.");
    } else {
        println!();
        println!("Skipped {} line(s):", report.skipped.len());
        for skipped in &report.skipped {
            println!(
                "  line {}: {}: {}",
                skipped.line_number,
                skipped.reason,
                skipped.content.trim()
            );
        }
    }

    Ok(())
}

fn run_fmt(input: &Path, write: bool) -> Result<()> {
    if write && is_stdin(input) {
        bail!("--write needs a file path, not stdin");
    }

    let text = read_input(input)?;
    let formatted = serialize(&parse(&text)?);

    if write {
        if formatted == text {
            tracing::info!("{} is already canonical", input.display());
        } else {
            std::fs::write(input, &formatted)
                .with_context(|| format!("Failed to write {}", input.display()))?;
            tracing::info!("Rewrote {}", input.display());
        }
    } else {
        print!("{}", formatted);
    }

    Ok(())
}

fn run_show(config: &KbConfig) -> Result<()> {
    let file = config.knowledge_file();
    if !file.exists() {
        println!("No knowledge file at {}", file.path().display());
        return Ok(());
    }

    let kb = file.load()?;
    println!("{}", file.path().display());
    println!("{}", kb.summary());
    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}
