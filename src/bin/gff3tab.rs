use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use polars::prelude::{CsvWriter, SerWriter};

use gff3tab::{from_records, Reader, ReaderResult};

#[derive(Parser, Debug)]
#[command(
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,
)]
struct Args {
    /// Input GFF3 file (.gff3, or .gff3.gz with the compression feature)
    input: PathBuf,

    /// Expand the attribute column into one table column per discovered key
    #[arg(short, long)]
    attributes: bool,

    /// Write the table as CSV to this path instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Echo header metadata and enable progress logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if args.verbose {
        simple_logger::init_with_level(log::Level::Debug).ok();
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gff3tab: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> ReaderResult<()> {
    let mut reader = Reader::from_path(&args.input)?;

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }

    if args.verbose {
        for line in reader.metadata_lines() {
            eprintln!("{line}");
        }
    }

    let mut table = from_records(&records, args.attributes)?;

    match &args.output {
        Some(path) => {
            let file = File::create(path)?;
            CsvWriter::new(file).finish(&mut table)?;
            log::info!("wrote {} rows to {}", table.height(), path.display());
        }
        None => println!("{table}"),
    }

    Ok(())
}
