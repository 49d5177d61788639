use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "gzip")]
use flate2::read::MultiGzDecoder;
use polars::prelude::PolarsError;

use crate::record::{Gff3Record, FIELD_COUNT, FIXED_COLUMNS};

/// Number of leading comment lines inspected for `:`-bearing metadata.
const METADATA_SCAN_LIMIT: usize = 20;

/// Result alias for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// An error that can occur when parsing a GFF3 input.
#[derive(Debug)]
pub enum ReaderError {
    /// An I/O error.
    Io(io::Error),
    /// A non-comment line did not split into the required number of
    /// tab-separated fields.
    MalformedRecord {
        /// The line number where the error occurred.
        line: usize,
        /// The number of fields the line actually split into.
        found: usize,
        /// The raw line content, for diagnostics.
        content: String,
    },
    /// An attribute-list entry lacked a `=` separator.
    MalformedAttribute {
        /// The line number where the error occurred.
        line: usize,
        /// The offending attribute entry.
        entry: String,
    },
    /// The fixed and attribute tables disagreed on their row counts.
    ///
    /// This signals a pipeline defect, not a data problem: both tables are
    /// built from the same record sequence.
    RowCountMismatch {
        /// Row count of the fixed-column table.
        fixed: usize,
        /// Row count of the attribute table.
        attributes: usize,
    },
    /// An error raised while assembling the output table.
    Frame(PolarsError),
    /// An error that occurred when building a reader.
    Builder(String),
}

impl fmt::Display for ReaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderError::Io(err) => write!(f, "I/O error: {err}"),
            ReaderError::MalformedRecord {
                line,
                found,
                content,
            } => write!(
                f,
                "line {line} had {found} tab-separated fields, expected {FIELD_COUNT}: '{content}'"
            ),
            ReaderError::MalformedAttribute { line, entry } => {
                write!(
                    f,
                    "attribute entry '{entry}' at line {line} has no '=' separator"
                )
            }
            ReaderError::RowCountMismatch { fixed, attributes } => write!(
                f,
                "fixed table has {fixed} rows but attribute table has {attributes}"
            ),
            ReaderError::Frame(err) => write!(f, "table error: {err}"),
            ReaderError::Builder(msg) => write!(f, "builder error: {msg}"),
        }
    }
}

impl std::error::Error for ReaderError {
    /// Returns the source error, if any.
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReaderError::Io(err) => Some(err),
            ReaderError::Frame(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ReaderError {
    /// Creates a new `ReaderError` from an `io::Error`.
    fn from(err: io::Error) -> Self {
        ReaderError::Io(err)
    }
}

impl From<PolarsError> for ReaderError {
    /// Creates a new `ReaderError` from a table-assembly error.
    fn from(err: PolarsError) -> Self {
        ReaderError::Frame(err)
    }
}

/// Reader source
enum ReaderSource {
    Path(PathBuf),
    Reader(Box<dyn Read + Send>),
}

/// A builder for creating a [`Reader`].
///
/// # Example
///
/// ```rust,no_run,ignore
/// use gff3tab::Reader;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let reader = Reader::builder()
///         .from_path("tests/data/annotation.gff3")
///         .buffer_capacity(128 * 1024)
///         .build()?;
///
///     for record in reader {
///         let record = record?;
///         // ...
///     }
///
///     Ok(())
/// }
/// ```
pub struct ReaderBuilder {
    source: Option<ReaderSource>,
    buffer_capacity: usize,
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self {
            source: None,
            buffer_capacity: 64 * 1024,
        }
    }
}

impl ReaderBuilder {
    /// Creates a new `ReaderBuilder` from a path.
    pub fn from_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source = Some(ReaderSource::Path(path.as_ref().into()));
        self
    }

    /// Creates a new `ReaderBuilder` from a reader.
    pub fn from_reader<T>(mut self, reader: T) -> Self
    where
        T: Read + Send + 'static,
    {
        self.source = Some(ReaderSource::Reader(Box::new(reader)));
        self
    }

    /// Sets the buffer capacity for the reader.
    ///
    /// The default is 64 KB.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity.max(8 * 1024);
        self
    }

    /// Builds the `Reader`.
    pub fn build(mut self) -> ReaderResult<Reader> {
        let source = self
            .source
            .take()
            .ok_or_else(|| ReaderError::Builder("ERROR: no input source configured".into()))?;

        let stream = match source {
            ReaderSource::Path(path) => open_stream(&path)?,
            ReaderSource::Reader(reader) => reader,
        };

        Ok(Reader {
            inner: BufReader::with_capacity(self.buffer_capacity, stream),
            buffer: String::with_capacity(1024),
            line_number: 0,
            comments: Vec::new(),
        })
    }
}

/// Opens a file and returns a boxed reader.
///
/// Gzip-compressed inputs are detected from the `.gz` extension and
/// transparently decompressed when the `gzip` feature is enabled.
fn open_stream(path: &Path) -> ReaderResult<Box<dyn Read + Send>> {
    #[cfg(feature = "gzip")]
    {
        let file = File::open(path)?;
        if path.extension().is_some_and(|ext| ext == "gz") {
            return Ok(Box::new(MultiGzDecoder::new(file)));
        }
        return Ok(Box::new(file));
    }

    #[cfg(not(feature = "gzip"))]
    {
        if path.extension().is_some_and(|ext| ext == "gz") {
            return Err(ReaderError::Builder(
                "ERROR: enable the `gzip` feature to read .gz inputs".into(),
            ));
        }
        Ok(Box::new(File::open(path)?))
    }
}

/// A line-by-line GFF3 reader.
///
/// The reader classifies each input line: lines whose first character is `#`
/// are comments, collected aside and never yielded; every other line is split
/// on tabs into a [`Gff3Record`]. Classification is strict: a non-comment
/// line that does not carry the full set of columns fails the whole parse.
///
/// # Example
///
/// ```rust,no_run,ignore
/// use gff3tab::Reader;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut reader = Reader::from_path("tests/data/annotation.gff3")?;
///
///     for record in reader.records() {
///         let record = record?;
///         println!("{}:{}-{}",
///             record.seqid().unwrap_or("."),
///             record.start().unwrap_or("."),
///             record.end().unwrap_or("."));
///     }
///
///     Ok(())
/// }
/// ```
pub struct Reader {
    inner: BufReader<Box<dyn Read + Send>>,
    buffer: String,
    line_number: usize,
    comments: Vec<String>,
}

impl Reader {
    /// Creates a new `ReaderBuilder` to configure a `Reader`.
    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::default()
    }

    /// Creates a new `Reader` from a path.
    ///
    /// # Example
    ///
    /// ```rust,no_run,ignore
    /// use gff3tab::Reader;
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut reader = Reader::from_path("tests/data/annotation.gff3")?;
    ///     for record in reader.records() {
    ///         // ...
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> ReaderResult<Self> {
        Self::builder().from_path(path).build()
    }

    /// Creates a new `Reader` from a reader.
    ///
    /// # Example
    ///
    /// ```rust,no_run,ignore
    /// use gff3tab::Reader;
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut reader = Reader::from_reader(std::io::stdin())?;
    ///     for record in reader.records() {
    ///         // ...
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn from_reader<T>(reader: T) -> ReaderResult<Self>
    where
        T: Read + Send + 'static,
    {
        Self::builder().from_reader(reader).build()
    }

    /// Returns the current line number of the reader.
    pub fn current_line(&self) -> usize {
        self.line_number
    }

    /// Returns the comment lines seen so far, in input order.
    ///
    /// Comments accumulate as records are consumed; iterate the reader to the
    /// end before inspecting the headers of the whole file.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Returns `:`-bearing metadata among the leading comment lines, with the
    /// `#` markers stripped.
    ///
    /// GFF3 headers conventionally carry `key: value` provenance lines (e.g.
    /// `#!genome-build: GRCh38`); only the first 20 comment lines are
    /// inspected.
    pub fn metadata_lines(&self) -> Vec<&str> {
        self.comments
            .iter()
            .take(METADATA_SCAN_LIMIT)
            .filter(|line| line.contains(':'))
            .map(|line| line.trim_start_matches('#').trim())
            .collect()
    }

    /// Returns an iterator over the records in the reader.
    ///
    /// # Example
    ///
    /// ```rust,no_run,ignore
    /// use gff3tab::Reader;
    ///
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut reader = Reader::from_path("tests/data/annotation.gff3")?;
    ///     for record in reader.records() {
    ///         let record = record?;
    ///         // ...
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn records(&mut self) -> Records<'_> {
        Records { reader: self }
    }

    /// Returns the next record in the reader, or `None` at end of input.
    fn next_record(&mut self) -> Option<ReaderResult<Gff3Record>> {
        loop {
            match self.fill_buffer() {
                Ok(true) => {
                    self.line_number += 1;
                    if self.buffer.starts_with('#') {
                        self.comments.push(self.buffer.clone());
                        continue;
                    }
                    return Some(parse_record_line(&self.buffer, self.line_number));
                }
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }

    /// Fills the buffer with the next line of the reader.
    fn fill_buffer(&mut self) -> ReaderResult<bool> {
        self.buffer.clear();
        let bytes = self.inner.read_line(&mut self.buffer)?;
        if bytes == 0 {
            return Ok(false);
        }
        trim_line(&mut self.buffer);
        Ok(true)
    }
}

impl Iterator for Reader {
    type Item = ReaderResult<Gff3Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

/// An iterator over the records in a [`Reader`].
///
/// This struct is created by the `records` method on `Reader`.
pub struct Records<'a> {
    reader: &'a mut Reader,
}

impl<'a> Iterator for Records<'a> {
    type Item = ReaderResult<Gff3Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_record()
    }
}

/// Splits a single non-comment line into a [`Gff3Record`].
///
/// The line is split on tabs; the first eight fields map to the fixed columns
/// and the last field is the raw attribute string. Fewer fields than the
/// format requires is a fatal error, blank lines included.
fn parse_record_line(line: &str, line_number: usize) -> ReaderResult<Gff3Record> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < FIELD_COUNT {
        return Err(ReaderError::MalformedRecord {
            line: line_number,
            found: fields.len(),
            content: line.to_string(),
        });
    }

    let attributes = fields[fields.len() - 1];
    Ok(Gff3Record::from_parts(
        &fields[..FIXED_COLUMNS.len()],
        attributes,
        line_number,
    ))
}

/// Trims the trailing line terminator from a freshly read line.
fn trim_line(line: &mut String) {
    while line.ends_with(['\n', '\r']) {
        line.pop();
    }
}
