//! Batch decoding tool
//!
//! Run with: cargo run --bin decode_boletos -- --input boletos.txt [--strict]
//! Reads stdin when no --input is given. Prints one JSON object per line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use boleto_intake::handlers::decode_entry;
use clap::Parser;

#[derive(Parser)]
#[command(name = "decode_boletos")]
#[command(about = "Decode boleto digit lines into amount and due date.")]
struct Args {
    /// File with one digit line per line (defaults to stdin)
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Exit with an error when any line is rejected
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "boleto_intake=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut decoded = 0usize;
    let mut rejected = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("reading input")?;
        if line.trim().is_empty() {
            continue;
        }

        let entry = decode_entry(index, &line);
        if entry.is_decoded() {
            decoded += 1;
        } else {
            rejected += 1;
            tracing::warn!(line = index + 1, "Rejected digit line");
        }

        serde_json::to_writer(&mut out, &entry)?;
        writeln!(out)?;
    }

    eprintln!("Decoded: {}", decoded);
    eprintln!("Rejected: {}", rejected);

    if args.strict && rejected > 0 {
        anyhow::bail!("{} line(s) rejected", rejected);
    }

    Ok(())
}
