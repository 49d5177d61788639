use polars::prelude::{Column, DataFrame};

use crate::attributes::decode_attributes;
use crate::reader::{ReaderError, ReaderResult};
use crate::record::{Gff3Record, FIXED_COLUMNS};

/// Builds the fixed-column table: one String column per GFF3 fixed field,
/// one row per record in input order, nulls where the source carried the `.`
/// placeholder.
pub fn fixed_table(records: &[Gff3Record]) -> ReaderResult<DataFrame> {
    let columns = FIXED_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<Option<String>> = records
                .iter()
                .map(|record| record.fixed_field(index).map(str::to_string))
                .collect();
            Column::new((*name).into(), values)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Builds the sparse attribute table: one String column per discovered key,
/// one row per record in input order, nulls where a record lacks the key.
///
/// `keys` fixes the column order; every row is emitted against that same
/// order, so each cell is a decoded value or a null, never absent. This is
/// the dominant assembly cost: one lookup per record per key.
///
/// # Errors
///
/// Returns [`ReaderError::MalformedAttribute`] if any record's attribute
/// column fails to decode.
pub fn attribute_table(records: &[Gff3Record], keys: &[String]) -> ReaderResult<DataFrame> {
    let mut columns: Vec<Vec<Option<String>>> = (0..keys.len())
        .map(|_| Vec::with_capacity(records.len()))
        .collect();

    for record in records {
        let mut decoded = decode_attributes(record.attributes(), record.line())?;
        for (slot, key) in columns.iter_mut().zip(keys) {
            slot.push(decoded.remove(key));
        }
    }

    let columns = keys
        .iter()
        .zip(columns)
        .map(|(key, values)| Column::new(key.as_str().into(), values))
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Positionally merges the fixed and attribute tables.
///
/// This is an index-based join: row *i* of the output is fixed row *i*
/// followed by attribute row *i*. There is no join key; alignment holds by
/// construction, both tables being built from the same record sequence.
///
/// # Errors
///
/// Returns [`ReaderError::RowCountMismatch`] if the two tables disagree on
/// their heights; such a mismatch is a pipeline defect, not a data problem.
pub fn merge(fixed: &DataFrame, attributes: &DataFrame) -> ReaderResult<DataFrame> {
    if attributes.width() == 0 {
        return Ok(fixed.clone());
    }
    if fixed.height() != attributes.height() {
        return Err(ReaderError::RowCountMismatch {
            fixed: fixed.height(),
            attributes: attributes.height(),
        });
    }
    Ok(fixed.hstack(attributes.get_columns())?)
}
