//! NACHA Writer CLI
//!
//! Reads payment instructions from CSV and writes the ACH file to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- entries.csv 123456789 987654321 "DEST BANK" "YOUR COMPANY" > payments.ach
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::Local;
use nacha_writer::{AchError, FileHeader, InstructionLoader, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        return Err(AchError::MissingArgument);
    }

    let input_path = &args[1];
    let destination_name = args.get(4).map(String::as_str).unwrap_or("");
    let origin_name = args.get(5).map(String::as_str).unwrap_or("");

    let header = FileHeader::new(&args[2], &args[3], Local::now().naive_local())?
        .with_destination_name(destination_name)?
        .with_origin_name(origin_name)?;

    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut loader = InstructionLoader::new();
    loader.load_csv(reader)?;

    let ach = loader.into_file(header)?;
    let text = ach.generate()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes())?;
    handle.flush()?;

    Ok(())
}
