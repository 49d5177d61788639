use std::collections::{BTreeSet, HashMap};

use memchr::memchr;

use crate::reader::{ReaderError, ReaderResult};
use crate::record::Gff3Record;

/// Splits one attribute-list entry on its first `=` into `(key, value)`.
///
/// Returns `None` when the entry carries no `=` at all. Everything after the
/// first `=` belongs to the value, so URL-encoded values like
/// `Dbxref=GeneID=100` keep their embedded separators.
pub(crate) fn split_entry(entry: &str) -> Option<(&str, &str)> {
    memchr(b'=', entry.as_bytes()).map(|pos| (&entry[..pos], &entry[pos + 1..]))
}

/// Decodes one raw attribute column into a key→value map.
///
/// Entries are separated by `;`. A repeated key within one record collapses
/// last-write-wins; empty entries (a trailing `;`, or an entirely empty
/// column) contribute nothing. Keys and values are kept verbatim: no
/// trimming, no quote or percent decoding.
///
/// # Errors
///
/// Returns [`ReaderError::MalformedAttribute`] for a non-empty entry without
/// a `=` separator.
pub fn decode_attributes(raw: &str, line: usize) -> ReaderResult<HashMap<String, String>> {
    let mut pairs = HashMap::new();
    for entry in raw.split(';') {
        if entry.is_empty() {
            continue;
        }
        let (key, value) = split_entry(entry).ok_or_else(|| ReaderError::MalformedAttribute {
            line,
            entry: entry.to_string(),
        })?;
        pairs.insert(key.to_string(), value.to_string());
    }
    Ok(pairs)
}

/// Collects the distinct attribute keys observed across all records.
///
/// One linear pass over every record's raw attribute column. The returned
/// list is sorted lexicographically, which is the deterministic column order
/// used by the attribute table for every row.
///
/// # Errors
///
/// Returns [`ReaderError::MalformedAttribute`] for the first non-empty entry
/// without a `=` separator, with the offending record's line number.
pub fn discover_keys(records: &[Gff3Record]) -> ReaderResult<Vec<String>> {
    let mut keys: BTreeSet<String> = BTreeSet::new();
    for record in records {
        for entry in record.attributes().split(';') {
            if entry.is_empty() {
                continue;
            }
            let (key, _) = split_entry(entry).ok_or_else(|| ReaderError::MalformedAttribute {
                line: record.line(),
                entry: entry.to_string(),
            })?;
            if !keys.contains(key) {
                keys.insert(key.to_string());
            }
        }
    }
    Ok(keys.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Gff3Record;

    fn record(attributes: &str, line: usize) -> Gff3Record {
        Gff3Record::from_parts(
            &["chr1", "src", "gene", "1", "100", ".", "+", "."],
            attributes,
            line,
        )
    }

    #[test]
    fn decodes_simple_pairs() {
        let pairs = decode_attributes("ID=gene1;Name=abc", 1).unwrap();
        assert_eq!(pairs.get("ID").map(String::as_str), Some("gene1"));
        assert_eq!(pairs.get("Name").map(String::as_str), Some("abc"));
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn splits_on_first_equals_only() {
        let pairs = decode_attributes("Dbxref=GeneID=100", 1).unwrap();
        assert_eq!(pairs.get("Dbxref").map(String::as_str), Some("GeneID=100"));
    }

    #[test]
    fn repeated_key_keeps_last_value() {
        let pairs = decode_attributes("ID=1;ID=2", 1).unwrap();
        assert_eq!(pairs.get("ID").map(String::as_str), Some("2"));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn tolerates_trailing_semicolon() {
        let pairs = decode_attributes("ID=gene1;", 1).unwrap();
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn empty_column_decodes_to_nothing() {
        let pairs = decode_attributes("", 1).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn rejects_entry_without_separator() {
        let err = decode_attributes("foo", 12).unwrap_err();
        match err {
            ReaderError::MalformedAttribute { line, entry } => {
                assert_eq!(line, 12);
                assert_eq!(entry, "foo");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn discovers_sorted_union_of_keys() {
        let records = vec![
            record("b=1;a=2", 1),
            record("c=3", 2),
            record("a=4", 3),
        ];
        let keys = discover_keys(&records).unwrap();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn discovery_reports_offending_line() {
        let records = vec![record("ID=ok", 1), record("broken", 9)];
        let err = discover_keys(&records).unwrap_err();
        match err {
            ReaderError::MalformedAttribute { line, .. } => assert_eq!(line, 9),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
