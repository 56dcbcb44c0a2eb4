//! Reading JTL result logs.
//!
//! JMeter writes its results as plain CSV. Only the first three columns are
//! consulted by the report pipeline: `timeStamp`, `elapsed` and `label`.

pub mod datetime;
pub mod quoting;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::Jtl2JsonError;

pub use datetime::{format_datetime, format_datetime_in, DATETIME_FORMAT};

/// Column holding the sample start time as epoch seconds.
pub const TIMESTAMP_COLUMN: usize = 0;
/// Column holding the elapsed time in milliseconds.
pub const ELAPSED_COLUMN: usize = 1;
/// Column holding the sampler label.
pub const LABEL_COLUMN: usize = 2;

/// One line of a JTL file, split into its fields.
pub type JtlRow = Vec<String>;

/// Read every row of a comma-separated stream into memory.
///
/// The first line is returned like any other row; header handling is left to
/// the aggregation step. Rows must all have the same number of fields, and
/// quotes must follow [`quoting::check_quoting`].
pub fn read_rows<R: Read>(mut reader: R) -> Result<Vec<JtlRow>, Jtl2JsonError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    quoting::check_quoting(&data)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data.as_slice());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    tracing::debug!(rows = rows.len(), "read JTL rows");
    Ok(rows)
}

/// Open a JTL file from disk and read all of its rows.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<JtlRow>, Jtl2JsonError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "opening JTL file");
    let file = File::open(path)?;
    read_rows(file)
}

/// Fetch a column from a row, failing with a parse error when the row is too
/// short. `row_number` is one-based and only used for the message.
pub fn field(row: &[String], column: usize, row_number: usize) -> Result<&str, Jtl2JsonError> {
    row.get(column).map(String::as_str).ok_or_else(|| {
        Jtl2JsonError::Parse(format!(
            "row {row_number}: expected at least {} fields, found {}",
            column + 1,
            row.len()
        ))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
timeStamp,elapsed,label,responseCode
1700000000,100,Home,200
1700000001,200,Home,200
1700000002,50,Login,200
";

    // -----------------------------------------------------------------------
    // read_rows
    // -----------------------------------------------------------------------

    #[test]
    fn read_rows_keeps_header_as_first_row() {
        let rows = read_rows(SAMPLE.as_bytes()).expect("sample should parse");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], "timeStamp");
        assert_eq!(rows[0][2], "label");
    }

    #[test]
    fn read_rows_preserves_field_order() {
        let rows = read_rows(SAMPLE.as_bytes()).expect("sample should parse");
        assert_eq!(rows[3], vec!["1700000002", "50", "Login", "200"]);
    }

    #[test]
    fn read_rows_handles_quoted_fields() {
        let data = "1700000000,120,\"Search, results\",\"say \"\"hi\"\"\"\n";
        let rows = read_rows(data.as_bytes()).expect("quoted fields should parse");
        assert_eq!(rows[0][2], "Search, results");
        assert_eq!(rows[0][3], "say \"hi\"");
    }

    #[test]
    fn read_rows_rejects_unterminated_quote() {
        let data = "1700000000,100,Home\n1700000001,200,\"Home\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Jtl2JsonError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn read_rows_rejects_bare_quote() {
        let err = read_rows("1700000000,100,Ho\"me\n".as_bytes()).unwrap_err();
        assert!(matches!(err, Jtl2JsonError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn read_rows_empty_input_yields_no_rows() {
        let rows = read_rows("".as_bytes()).expect("empty input is not malformed");
        assert!(rows.is_empty());
    }

    #[test]
    fn read_rows_rejects_inconsistent_row_lengths() {
        let data = "1700000000,100,Home\n1700000001,200\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Jtl2JsonError::Parse(_)));
    }

    #[test]
    fn read_rows_rejects_invalid_utf8() {
        let data: &[u8] = b"1700000000,100,\xff\xfe\n";
        let err = read_rows(data).unwrap_err();
        assert!(matches!(err, Jtl2JsonError::Parse(_)));
    }

    // -----------------------------------------------------------------------
    // read_file
    // -----------------------------------------------------------------------

    #[test]
    fn read_file_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir should be created");
        let path = dir.path().join("results.jtl");
        std::fs::write(&path, SAMPLE).expect("writing sample should succeed");

        let rows = read_file(&path).expect("read_file should succeed");
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn read_file_missing_file_is_io_error() {
        let err = read_file("/nonexistent/path/results.jtl").unwrap_err();
        assert!(matches!(err, Jtl2JsonError::Io(_)));
    }

    // -----------------------------------------------------------------------
    // field
    // -----------------------------------------------------------------------

    #[test]
    fn field_returns_requested_column() {
        let row: JtlRow = vec!["1".into(), "2".into(), "Home".into()];
        assert_eq!(field(&row, LABEL_COLUMN, 1).unwrap(), "Home");
    }

    #[test]
    fn field_short_row_is_parse_error_with_row_number() {
        let row: JtlRow = vec!["1".into(), "2".into()];
        let err = field(&row, LABEL_COLUMN, 7).unwrap_err();
        match err {
            Jtl2JsonError::Parse(msg) => assert!(msg.contains("row 7")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
