use oath_speaker::ingest::{table_name, Dataset, IngestError};

#[test]
fn test_parse_well_formed_csv() {
    let dataset = Dataset::parse("readings.csv", b"Status,Value\nActive,10\nIdle,20\n").unwrap();

    assert_eq!(dataset.table, "readings");
    assert_eq!(dataset.columns, vec!["Status", "Value"]);
    assert_eq!(
        dataset.rows,
        vec![vec!["Active", "10"], vec!["Idle", "20"]]
    );
}

#[test]
fn test_parse_crlf_line_endings() {
    let dataset = Dataset::parse("readings.csv", b"Status,Value\r\nActive,10\r\n").unwrap();
    assert_eq!(dataset.rows, vec![vec!["Active", "10"]]);
}

#[test]
fn test_parse_quoted_fields() {
    let dataset = Dataset::parse("notes.csv", b"Status,Note\nActive,\"a, b\"\n").unwrap();
    assert_eq!(dataset.rows, vec![vec!["Active", "a, b"]]);
}

#[test]
fn test_parse_header_only_is_valid() {
    let dataset = Dataset::parse("readings.csv", b"Status,Value\n").unwrap();
    assert_eq!(dataset.columns, vec!["Status", "Value"]);
    assert!(dataset.rows.is_empty());
}

#[test]
fn test_parse_rejects_empty_content() {
    let err = Dataset::parse("readings.csv", b"").unwrap_err();
    assert!(matches!(err, IngestError::EmptyHeader));
}

#[test]
fn test_parse_rejects_ragged_rows() {
    let err = Dataset::parse("readings.csv", b"Status,Value\nActive\n").unwrap_err();
    assert!(matches!(err, IngestError::Csv(_)));
}

#[test]
fn test_parse_rejects_non_utf8() {
    let err = Dataset::parse("readings.csv", &[0xff, 0xfe, 0x00]).unwrap_err();
    assert!(matches!(err, IngestError::Encoding(_)));
}

#[test]
fn test_table_name_strips_extension() {
    assert_eq!(table_name("readings.csv").unwrap(), "readings");
}

#[test]
fn test_table_name_truncates_at_first_dot() {
    assert_eq!(table_name("a.b.csv").unwrap(), "a");
}

#[test]
fn test_table_name_without_extension_uses_whole_name() {
    assert_eq!(table_name("archive").unwrap(), "archive");
}

#[test]
fn test_table_name_rejects_leading_dot() {
    assert!(matches!(
        table_name(".csv").unwrap_err(),
        IngestError::BadTableName(_)
    ));
}

#[test]
fn test_table_name_rejects_empty_name() {
    assert!(matches!(
        table_name("").unwrap_err(),
        IngestError::BadTableName(_)
    ));
}
