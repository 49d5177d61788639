use std::fmt;

/// Name of the sequence identifier column.
pub const SEQID: &str = "Seqid";
/// Name of the annotation source column.
pub const SOURCE: &str = "Source";
/// Name of the feature type column.
pub const TYPE: &str = "Type";
/// Name of the start coordinate column.
pub const START: &str = "Start";
/// Name of the end coordinate column.
pub const END: &str = "End";
/// Name of the score column.
pub const SCORE: &str = "Score";
/// Name of the strand column.
pub const STRAND: &str = "Strand";
/// Name of the phase column.
pub const PHASE: &str = "Phase";

/// The eight fixed GFF3 columns, in file order.
pub const FIXED_COLUMNS: [&str; 8] = [SEQID, SOURCE, TYPE, START, END, SCORE, STRAND, PHASE];

/// Total number of tab-separated columns a record line must carry.
pub const FIELD_COUNT: usize = 9;

/// The literal GFF3 placeholder for an undefined value.
pub const MISSING: &str = ".";

/// A single non-comment GFF3 line.
///
/// The eight fixed columns are kept as text; the placeholder `.` is
/// normalized to `None` in every fixed field. The ninth column is kept as the
/// raw, undecoded attribute string.
///
/// # Example
///
/// ```rust,no_run,ignore
/// use gff3tab::Gff3Record;
///
/// let record = Gff3Record::from_parts(
///     &["chr1", "ensembl", "gene", "1", "100", ".", "+", "."],
///     "ID=gene1;Name=abc",
///     1,
/// );
/// assert_eq!(record.seqid(), Some("chr1"));
/// assert_eq!(record.score(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gff3Record {
    /// Sequence identifier (chromosome, scaffold or contig name).
    pub seqid: Option<String>,
    /// Annotation source (program or database).
    pub source: Option<String>,
    /// Feature type (e.g. `gene`, `exon`).
    pub ty: Option<String>,
    /// Start coordinate, kept as text.
    pub start: Option<String>,
    /// End coordinate, kept as text.
    pub end: Option<String>,
    /// Feature score, kept as text.
    pub score: Option<String>,
    /// Strand (`+`, `-` or `?`).
    pub strand: Option<String>,
    /// Phase for coding features (`0`, `1` or `2`).
    pub phase: Option<String>,
    /// Raw, undecoded attribute column.
    pub attributes: String,
    /// 1-based source line number, for diagnostics.
    line: usize,
}

impl Gff3Record {
    /// Builds a record from the already-split fixed fields and the raw
    /// attribute column.
    ///
    /// `fixed` must hold the eight fixed columns in file order; the `.`
    /// placeholder is normalized to `None` independently per field.
    pub fn from_parts(fixed: &[&str], attributes: &str, line: usize) -> Self {
        debug_assert_eq!(fixed.len(), FIXED_COLUMNS.len());
        Self {
            seqid: normalize(fixed[0]),
            source: normalize(fixed[1]),
            ty: normalize(fixed[2]),
            start: normalize(fixed[3]),
            end: normalize(fixed[4]),
            score: normalize(fixed[5]),
            strand: normalize(fixed[6]),
            phase: normalize(fixed[7]),
            attributes: attributes.to_string(),
            line,
        }
    }

    /// Returns the sequence identifier, if present.
    #[inline]
    pub fn seqid(&self) -> Option<&str> {
        self.seqid.as_deref()
    }

    /// Returns the annotation source, if present.
    #[inline]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the feature type, if present.
    #[inline]
    pub fn ty(&self) -> Option<&str> {
        self.ty.as_deref()
    }

    /// Returns the start coordinate as text, if present.
    #[inline]
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Returns the end coordinate as text, if present.
    #[inline]
    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    /// Returns the score as text, if present.
    #[inline]
    pub fn score(&self) -> Option<&str> {
        self.score.as_deref()
    }

    /// Returns the strand, if present.
    #[inline]
    pub fn strand(&self) -> Option<&str> {
        self.strand.as_deref()
    }

    /// Returns the phase, if present.
    #[inline]
    pub fn phase(&self) -> Option<&str> {
        self.phase.as_deref()
    }

    /// Returns the raw attribute column.
    #[inline]
    pub fn attributes(&self) -> &str {
        &self.attributes
    }

    /// Returns the 1-based line this record was read from.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the fixed field at `index`, following [`FIXED_COLUMNS`] order.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of the fixed-column range.
    pub fn fixed_field(&self, index: usize) -> Option<&str> {
        match index {
            0 => self.seqid(),
            1 => self.source(),
            2 => self.ty(),
            3 => self.start(),
            4 => self.end(),
            5 => self.score(),
            6 => self.strand(),
            7 => self.phase(),
            _ => panic!("fixed field index {index} out of range"),
        }
    }
}

impl fmt::Display for Gff3Record {
    /// Re-emits the record as a tab-separated GFF3 line, with `.` standing in
    /// for missing fixed fields.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for index in 0..FIXED_COLUMNS.len() {
            if index > 0 {
                f.write_str("\t")?;
            }
            f.write_str(self.fixed_field(index).unwrap_or(MISSING))?;
        }
        write!(f, "\t{}", self.attributes)
    }
}

/// Normalizes one fixed-column value, mapping the `.` placeholder to `None`.
fn normalize(raw: &str) -> Option<String> {
    if raw == MISSING {
        None
    } else {
        Some(raw.to_string())
    }
}
