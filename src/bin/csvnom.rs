//! csvnom CLI - header-keyed CSV extraction to NDJSON
//!
//! Tokenizes a CSV source, resolves the header and prints each data row as
//! one JSON object per line, keyed by column name.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process;

use csvnom::profile::ExtractProfile;
use csvnom::schema::Header;
use csvnom::tokenizer;

#[derive(Parser)]
#[command(name = "csvnom")]
#[command(version, about = "Typed record extraction from delimited CSV text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract data rows as NDJSON keyed by header column
    Extract {
        /// Path to the CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Path to a YAML extraction profile
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Header literal (used instead of the first content line)
        #[arg(long)]
        header: Option<String>,

        /// Number of data rows to discard after header resolution
        #[arg(short, long, default_value_t = 0)]
        skip: usize,
    },

    /// Validate a YAML extraction profile
    Validate {
        /// Path to a YAML extraction profile
        #[arg(short, long)]
        profile: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            file,
            profile,
            header,
            skip,
        } => run_extract(file, profile, header, skip),
        Commands::Validate { profile } => run_validate(profile),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run_extract(
    file: PathBuf,
    profile_path: Option<PathBuf>,
    header_flag: Option<String>,
    skip_flag: usize,
) -> Result<(), String> {
    // Flags override profile settings
    let mut header_literal = header_flag;
    let mut skip = skip_flag;
    if let Some(path) = profile_path {
        let profile = ExtractProfile::load_from_file(&path)?;
        if header_literal.is_none() {
            header_literal = profile.header.clone();
        }
        if skip == 0 {
            skip = profile.skip;
        }
    }

    let content = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let rows = tokenizer::split_rows(&content);

    let (header_line, start) = match header_literal {
        Some(literal) if !literal.is_empty() => (literal, skip),
        _ => match rows.first() {
            Some(first) => (first.clone(), skip + 1),
            None => return Err(format!("{} has no header row", file.display())),
        },
    };
    let header = Header::parse(&header_line);
    tracing::debug!(
        "Resolved {} columns, {} content rows",
        header.len(),
        rows.len()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for row in rows.iter().skip(start) {
        let masked = tokenizer::mask_quoted_commas(row);
        let cells = tokenizer::split_cells(&masked);
        if cells.len() < header.len() {
            tracing::warn!(
                "Row has {} cells for {} columns, padding with empty values",
                cells.len(),
                header.len()
            );
        }

        let mut object = serde_json::Map::new();
        for (index, column) in header.columns().iter().enumerate() {
            let value = cells.get(index).cloned().unwrap_or_default();
            object.insert(column.clone(), serde_json::Value::String(value));
        }
        let line = serde_json::to_string(&serde_json::Value::Object(object))
            .map_err(|e| format!("Failed to encode row: {}", e))?;
        writeln!(out, "{}", line).map_err(|e| format!("Failed to write output: {}", e))?;
    }

    Ok(())
}

fn run_validate(path: PathBuf) -> Result<(), String> {
    let profile = ExtractProfile::load_from_file(&path)?;
    println!(
        "Profile OK: header={:?} skip={} mapped columns={}",
        profile.header,
        profile.skip,
        profile.columns.len()
    );
    Ok(())
}
