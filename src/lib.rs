//! # gff3tab
//!
//! A Rust library for parsing GFF3 (Generic Feature Format version 3)
//! annotation files into columnar feature tables.
//!
//! ## Overview
//!
//! GFF3 is a line-oriented, tab-delimited format: eight fixed columns
//! (`Seqid`, `Source`, `Type`, `Start`, `End`, `Score`, `Strand`, `Phase`)
//! plus a ninth free-form column packing `key=value` attribute pairs whose
//! key set varies per line. This library turns a GFF3 file into a polars
//! [`DataFrame`](polars::prelude::DataFrame) in two passes: it first
//! discovers the file-wide set of distinct attribute keys, then materializes
//! one column per key with a null wherever a record lacks that key, aligned
//! row-for-row with the fixed columns.
//!
//! ## Features
//!
//! - **Two-Pass Attribute Expansion:** the full union of attribute keys is
//!   known before the attribute table is built, so every row carries every
//!   column
//! - **Missing-Value Normalization:** the GFF3 placeholder `.` becomes a
//!   null in every fixed column; absent attribute keys become nulls in the
//!   attribute columns
//! - **Fail-Fast Diagnostics:** malformed lines and attribute entries abort
//!   the parse with the line number and offending content
//! - **Compression Support:** transparent gzip decompression behind the
//!   `gzip` feature
//! - **Columnar Output:** DataFrames ready for filtering, joining and export
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! gff3tab = "0.1"
//!
//! # Optional features
//! gff3tab = { version = "0.1", features = ["compression"] }
//! ```
//!
//! ## Basic Usage
//!
//! ### Parsing the fixed columns
//!
//! ```rust,no_run,ignore
//! use gff3tab::parse;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = parse("data/annotation.gff3", false)?;
//!     println!("{} features", table.height());
//!     Ok(())
//! }
//! ```
//!
//! ### Expanding the attribute column
//!
//! With `parse_attributes` enabled, the returned table carries the eight
//! fixed columns followed by one column per attribute key discovered
//! anywhere in the file, in lexicographic order:
//!
//! ```rust,no_run,ignore
//! use gff3tab::parse;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let table = parse("data/annotation.gff3", true)?;
//!
//!     let ids = table.column("ID")?.str()?;
//!     for id in ids.into_iter().flatten() {
//!         println!("{id}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Streaming records from any reader
//!
//! ```rust,no_run,ignore
//! use gff3tab::Reader;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut reader = Reader::from_reader(std::io::stdin())?;
//!
//!     for record in reader.records() {
//!         let record = record?;
//!         println!("{} at {}..{}",
//!             record.ty().unwrap_or("."),
//!             record.start().unwrap_or("."),
//!             record.end().unwrap_or("."));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every error carries enough context to locate the malformed input:
//!
//! ```rust,no_run,ignore
//! use gff3tab::{parse, ReaderError};
//!
//! fn main() {
//!     match parse("data/annotation.gff3", true) {
//!         Ok(table) => println!("{} rows", table.height()),
//!         Err(ReaderError::MalformedRecord { line, found, .. }) => {
//!             eprintln!("line {line} only had {found} columns");
//!         }
//!         Err(err) => eprintln!("{err}"),
//!     }
//! }
//! ```
//!
//! ## GFF3 Format Reference
//!
//! | Column | Name   | Notes                                   |
//! |--------|--------|-----------------------------------------|
//! | 1      | Seqid  | chromosome/scaffold name                |
//! | 2      | Source | annotation program or database          |
//! | 3      | Type   | feature type (`gene`, `exon`, ...)      |
//! | 4      | Start  | 1-based start, kept as text             |
//! | 5      | End    | inclusive end, kept as text             |
//! | 6      | Score  | floating-point score or `.`             |
//! | 7      | Strand | `+`, `-`, `.` or `?`                    |
//! | 8      | Phase  | `0`, `1`, `2` or `.`                    |
//! | 9      | —      | `key=value;...` attribute list          |
//!
//! Lines starting with `#` are comments/headers and are excluded from the
//! data rows. The literal value `.` means "undefined" in the fixed columns.
//!
//! ## Feature Flags
//!
//! - `compression` / `gzip`: read `.gff3.gz` inputs (adds `flate2`)
//! - `cli`: build the `gff3tab` command-line tool (adds `clap` and
//!   `simple_logger`, enables polars CSV export and table pretty-printing)
//!
//! ## Logging
//!
//! The library reports progress milestones through the [`log`] facade and
//! never touches the console itself; install any logger implementation to
//! observe them. The CLI uses `simple_logger` when `--verbose` is set.
//!
//! ## License
//!
//! See LICENSE file for details.

#![cfg_attr(doc, warn(missing_docs))]

pub mod attributes;
pub mod parse;
pub mod reader;
pub mod record;
pub mod table;

pub use parse::{from_records, parse, parse_reader};
pub use reader::{Reader, ReaderBuilder, ReaderError, ReaderResult, Records};
pub use record::{Gff3Record, FIXED_COLUMNS};
