//! Stratagem CLI: dictionary checks and one-shot queries.
//!
//! Commands:
//! - `check`: load a dictionary and report unreachable codes
//! - `list`: print every entry with its arrow glyphs
//! - `lookup`: feed a sequence symbol by symbol and show each outcome
//! - `classify`: classify a swipe vector

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use stratagem_core::{
    DEFAULT_MIN_DISTANCE, Direction, Lookup, Point, SequenceComposer, StratagemDictionary,
    classify_vector, code_to_glyphs,
};

#[derive(Parser)]
#[command(
    name = "stratagem-cli",
    about = "Stratagem CLI: check and query stratagem dictionaries"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dictionary and report entry count and prefix conflicts.
    Check {
        /// Dictionary JSON file.
        dictionary: PathBuf,

        /// Fail when any code is shadowed by a longer one.
        #[arg(long, default_value_t = false)]
        strict: bool,
    },
    /// Print every entry: glyphs, code, name, icon.
    List {
        /// Dictionary JSON file.
        dictionary: PathBuf,
    },
    /// Feed a sequence (letters or arrows, e.g. "RRU" or "→→↑") through the composer.
    Lookup {
        /// Dictionary JSON file.
        dictionary: PathBuf,

        /// Sequence to enter.
        sequence: String,
    },
    /// Classify a swipe vector (screen coordinates, y grows downward).
    Classify {
        #[arg(allow_negative_numbers = true)]
        dx: f64,

        #[arg(allow_negative_numbers = true)]
        dy: f64,

        /// Shortest swipe, in pixels, that counts as a gesture.
        #[arg(long, default_value_t = DEFAULT_MIN_DISTANCE)]
        min_distance: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output.
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check { dictionary, strict } => run_check(&dictionary, strict),
        Commands::List { dictionary } => run_list(&dictionary),
        Commands::Lookup {
            dictionary,
            sequence,
        } => run_lookup(&dictionary, &sequence),
        Commands::Classify {
            dx,
            dy,
            min_distance,
        } => run_classify(dx, dy, min_distance),
    }
}

fn load(path: &Path) -> Result<StratagemDictionary> {
    StratagemDictionary::load_file(path)
        .with_context(|| format!("failed to load dictionary {}", path.display()))
}

fn run_check(path: &Path, strict: bool) -> Result<()> {
    let dictionary = load(path)?;
    let conflicts = dictionary.prefix_conflicts();

    println!("Dictionary: {}", path.display());
    println!("Entries: {}", dictionary.len());

    if conflicts.is_empty() {
        println!("Prefix conflicts: none");
        return Ok(());
    }

    println!("Prefix conflicts: {}", conflicts.len());
    println!();
    println!("{:<12} {:<28} {:<12} {:<28}", "Unreachable", "Name", "Shadowed by", "Name");
    println!("{}", "-".repeat(82));
    for (shorter, longer) in &conflicts {
        println!(
            "{:<12} {:<28} {:<12} {:<28}",
            shorter.code(),
            shorter.name(),
            longer.code(),
            longer.name()
        );
    }

    if strict {
        bail!(
            "{} code(s) can never match because a longer code extends them",
            conflicts.len()
        );
    }
    Ok(())
}

fn run_list(path: &Path) -> Result<()> {
    let dictionary = load(path)?;
    println!("{:<12} {:<10} {:<28} {}", "Glyphs", "Code", "Name", "Icon");
    println!("{}", "-".repeat(72));
    for entry in dictionary.entries() {
        println!(
            "{:<12} {:<10} {:<28} {}",
            code_to_glyphs(entry.code()),
            entry.code(),
            entry.name(),
            entry.icon()
        );
    }
    Ok(())
}

fn run_lookup(path: &Path, sequence: &str) -> Result<()> {
    let dictionary = Arc::new(load(path)?);
    let directions = parse_sequence(sequence)?;
    for line in lookup_trace(dictionary, &directions) {
        println!("{line}");
    }
    Ok(())
}

/// Parse letters or arrow glyphs into directions. Whitespace, commas and the
/// emoji presentation selector are skipped.
fn parse_sequence(sequence: &str) -> Result<Vec<Direction>> {
    let mut directions = Vec::new();
    for c in sequence.chars() {
        if c.is_whitespace() || c == ',' || c == '\u{FE0F}' {
            continue;
        }
        match Direction::from_code_char(c) {
            Some(direction) => directions.push(direction),
            None => bail!("'{c}' is not a direction (use L/U/D/R or arrows)"),
        }
    }
    if directions.is_empty() {
        bail!("empty sequence");
    }
    Ok(directions)
}

/// Feed directions one at a time, one output line per symbol.
fn lookup_trace(dictionary: Arc<StratagemDictionary>, directions: &[Direction]) -> Vec<String> {
    let mut composer = SequenceComposer::new(dictionary);
    let mut lines = Vec::new();

    for (i, direction) in directions.iter().enumerate() {
        if let Err(err) = composer.append(*direction) {
            lines.push(format!("error: {err}"));
            break;
        }
        let shown = composer.display_string();
        let outcome = composer.check();
        let mut line = format!("{shown:<12} {:<9}", outcome.label());
        if let Lookup::Matched(entry) = outcome {
            line.push_str(&format!("{} ({})", entry.name(), entry.icon()));
        }
        lines.push(line.trim_end().to_string());
        let finished = !matches!(outcome, Lookup::Ambiguous);
        if finished {
            let rest = directions.len() - i - 1;
            if rest > 0 {
                lines.push(format!("({rest} trailing symbol(s) ignored)"));
            }
            break;
        }
    }
    lines
}

fn run_classify(dx: f64, dy: f64, min_distance: f64) -> Result<()> {
    if !(min_distance.is_finite() && min_distance >= 0.0) {
        bail!("--min-distance must be a non-negative number");
    }
    let direction = classify_vector(Point::new(0.0, 0.0), Point::new(dx, dy), min_distance);
    match direction {
        Direction::None => println!("{direction}"),
        _ => println!("{direction} {}", direction.glyph()),
    }
    Ok(())
}
