//! Cash-Flow Simplifier CLI
//!
//! Reads debts either from a CSV file or interactively from stdin and prints
//! the payments that settle them.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- debts.csv > payments.txt
//! cargo run -- --format csv debts.csv
//! cargo run                      # interactive
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use cashflow_simplifier::prompt::{collect_records, RESULT_HEADING};
use cashflow_simplifier::{CashFlowSimplifier, OutputFormat, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(version, about = "Settle pairwise debts with fewer payments")]
struct Args {
    /// CSV file with a `from,to,amount` header; prompts on stdin when omitted
    input: Option<PathBuf>,

    /// Output format for the settlements
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut simplifier = CashFlowSimplifier::new();
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match args.input {
        Some(path) => {
            let file = File::open(path)?;
            simplifier.process_csv(BufReader::new(file))?;
        }
        None => {
            let stdin = io::stdin();
            for record in collect_records(stdin.lock(), &mut handle)? {
                simplifier.add_record(record);
            }
            writeln!(handle)?;
            writeln!(handle, "{}", RESULT_HEADING)?;
        }
    }

    simplifier.write_output(handle, args.format)?;
    Ok(())
}
