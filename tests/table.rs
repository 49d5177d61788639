use std::io::Cursor;

use gff3tab::{parse_reader, ReaderError, FIXED_COLUMNS};

fn column_names(table: &polars::prelude::DataFrame) -> Vec<String> {
    table
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

#[test]
fn test_fixed_table_only() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tID=gene1;Name=abc\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), false).unwrap();

    assert_eq!(table.height(), 1);
    assert_eq!(column_names(&table), FIXED_COLUMNS);

    assert_eq!(table.column("Seqid").unwrap().str().unwrap().get(0), Some("chr1"));
    assert_eq!(table.column("Source").unwrap().str().unwrap().get(0), Some("srcA"));
    assert_eq!(table.column("Type").unwrap().str().unwrap().get(0), Some("gene"));
    assert_eq!(table.column("Start").unwrap().str().unwrap().get(0), Some("1"));
    assert_eq!(table.column("End").unwrap().str().unwrap().get(0), Some("100"));
    assert_eq!(table.column("Score").unwrap().str().unwrap().get(0), None);
    assert_eq!(table.column("Strand").unwrap().str().unwrap().get(0), Some("+"));
    assert_eq!(table.column("Phase").unwrap().str().unwrap().get(0), None);
}

#[test]
fn test_attribute_expansion() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tID=gene1;Name=abc\n\
                chr1\tsrcA\tgene\t200\t300\t.\t+\t.\tID=gene2\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();

    assert_eq!(table.height(), 2);
    assert_eq!(table.width(), FIXED_COLUMNS.len() + 2);

    let id = table.column("ID").unwrap().str().unwrap();
    assert_eq!(id.get(0), Some("gene1"));
    assert_eq!(id.get(1), Some("gene2"));

    let name = table.column("Name").unwrap().str().unwrap();
    assert_eq!(name.get(0), Some("abc"));
    assert_eq!(name.get(1), None);
}

#[test]
fn test_attribute_columns_sorted_after_fixed() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tbeta=1;alpha=2\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();

    let mut expected: Vec<String> = FIXED_COLUMNS.iter().map(|name| name.to_string()).collect();
    expected.push("alpha".to_string());
    expected.push("beta".to_string());
    assert_eq!(column_names(&table), expected);
}

#[test]
fn test_fixed_columns_unchanged_by_merge() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tID=gene1\n\
                chr2\tsrcB\texon\t5\t50\t.\t-\t1\tID=exon1;Parent=gene1\n";
    let fixed = parse_reader(Cursor::new(data.as_bytes()), false).unwrap();
    let combined = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();

    for name in FIXED_COLUMNS {
        let left = fixed.column(name).unwrap().str().unwrap();
        let right = combined.column(name).unwrap().str().unwrap();
        for row in 0..fixed.height() {
            assert_eq!(left.get(row), right.get(row), "column {name}, row {row}");
        }
    }
}

#[test]
fn test_repeated_key_keeps_last_value() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tID=1;ID=2\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();
    assert_eq!(table.column("ID").unwrap().str().unwrap().get(0), Some("2"));
}

#[test]
fn test_malformed_attribute_fails_parse() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tfoo\n";

    // the raw column is untouched unless expansion is requested
    let table = parse_reader(Cursor::new(data.as_bytes()), false).unwrap();
    assert_eq!(table.height(), 1);

    let err = parse_reader(Cursor::new(data.as_bytes()), true).unwrap_err();
    match err {
        ReaderError::MalformedAttribute { line, entry } => {
            assert_eq!(line, 1);
            assert_eq!(entry, "foo");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_comments_only_input() {
    let data = "##gff-version 3\n# annotated by hand\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();
    assert_eq!(table.height(), 0);
    assert_eq!(column_names(&table), FIXED_COLUMNS);
}

#[test]
fn test_empty_attribute_column_yields_null_row() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tID=gene1\n\
                chr1\tsrcA\tregion\t1\t1000\t.\t+\t.\t\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();

    assert_eq!(table.height(), 2);
    let id = table.column("ID").unwrap().str().unwrap();
    assert_eq!(id.get(0), Some("gene1"));
    assert_eq!(id.get(1), None);
}

#[test]
fn test_all_attribute_columns_empty() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\t\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();
    assert_eq!(table.height(), 1);
    assert_eq!(column_names(&table), FIXED_COLUMNS);
}

#[test]
fn test_value_with_embedded_equals() {
    let data = "chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tDbxref=GeneID=100;ID=g1\n";
    let table = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();
    assert_eq!(
        table.column("Dbxref").unwrap().str().unwrap().get(0),
        Some("GeneID=100")
    );
}

#[test]
fn test_row_counts_align() {
    let data = "##gff-version 3\n\
                chr1\tsrcA\tgene\t1\t100\t.\t+\t.\tID=g1\n\
                chr1\tsrcA\texon\t1\t50\t.\t+\t0\tID=e1;Parent=g1\n\
                chr1\tsrcA\texon\t60\t100\t.\t+\t0\tID=e2;Parent=g1;Note=short\n";
    let fixed = parse_reader(Cursor::new(data.as_bytes()), false).unwrap();
    let combined = parse_reader(Cursor::new(data.as_bytes()), true).unwrap();

    assert_eq!(fixed.height(), 3);
    assert_eq!(combined.height(), 3);

    // every discovered key is a column on every row
    for name in ["ID", "Parent", "Note"] {
        let column = combined.column(name).unwrap();
        assert_eq!(column.len(), 3);
    }
}
