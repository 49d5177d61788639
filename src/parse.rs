use std::io::Read;
use std::path::Path;

use log::{debug, info};
use polars::prelude::DataFrame;

use crate::attributes::discover_keys;
use crate::reader::{Reader, ReaderResult};
use crate::record::Gff3Record;
use crate::table::{attribute_table, fixed_table, merge};

/// Parses a GFF3 file into a feature table.
///
/// Always builds the fixed-column table (`Seqid` … `Phase`). When
/// `parse_attributes` is true, additionally discovers the file-wide set of
/// attribute keys, materializes the sparse attribute table and appends its
/// columns positionally to the fixed ones.
///
/// Parsing is fail-fast: the first malformed line or attribute entry aborts
/// the whole parse and no partial table is returned.
///
/// # Example
///
/// ```rust,no_run,ignore
/// use gff3tab::parse;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let table = parse("tests/data/annotation.gff3", true)?;
///     println!("{} features, {} columns", table.height(), table.width());
///     Ok(())
/// }
/// ```
pub fn parse<P: AsRef<Path>>(path: P, parse_attributes: bool) -> ReaderResult<DataFrame> {
    collect_and_build(Reader::from_path(path)?, parse_attributes)
}

/// Parses GFF3 content from any reader into a feature table.
///
/// Same contract as [`parse`], over an in-memory buffer, a pipe or any other
/// `Read` source.
///
/// # Example
///
/// ```rust,no_run,ignore
/// use gff3tab::parse_reader;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let data = "chr1\tsrc\tgene\t1\t100\t.\t+\t.\tID=gene1\n";
///     let table = parse_reader(std::io::Cursor::new(data), false)?;
///     assert_eq!(table.height(), 1);
///     Ok(())
/// }
/// ```
pub fn parse_reader<R>(reader: R, parse_attributes: bool) -> ReaderResult<DataFrame>
where
    R: Read + Send + 'static,
{
    collect_and_build(Reader::from_reader(reader)?, parse_attributes)
}

/// Drains a reader and hands the collected records to [`from_records`].
fn collect_and_build(mut reader: Reader, parse_attributes: bool) -> ReaderResult<DataFrame> {
    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?);
    }
    info!(
        "classified {} records and {} comment lines",
        records.len(),
        reader.comments().len()
    );
    from_records(&records, parse_attributes)
}

/// Builds the output table from already-collected records.
///
/// This is the pure pipeline tail behind [`parse`]; callers that need the
/// reader for header echoing (e.g. the CLI) drain it themselves and feed the
/// records here.
///
/// When key discovery finds no attribute keys at all (no records, or only
/// records with empty attribute columns), the fixed table is returned as-is.
pub fn from_records(records: &[Gff3Record], parse_attributes: bool) -> ReaderResult<DataFrame> {
    let fixed = fixed_table(records)?;
    if !parse_attributes {
        return Ok(fixed);
    }

    let keys = discover_keys(records)?;
    debug!("discovered {} distinct attribute keys", keys.len());
    if keys.is_empty() {
        return Ok(fixed);
    }

    let attributes = attribute_table(records, &keys)?;
    merge(&fixed, &attributes)
}
