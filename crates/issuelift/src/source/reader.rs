//! Newline-delimited JSON decoding of the export file.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::types::SourceIssue;
use crate::error::{MigrationError, Result};

/// Read every issue from the export at `path`, in file order.
///
/// The whole file is rejected on the first record that fails to decode.
pub fn read_export(path: impl AsRef<Path>) -> Result<Vec<SourceIssue>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| MigrationError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let issues = parse_export(BufReader::new(file)).map_err(|e| match e {
        MigrationError::SourceRead { source, .. } => MigrationError::SourceRead {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::debug!(path = %path.display(), issues = issues.len(), "Read export");
    Ok(issues)
}

/// Decode issues from a newline-delimited JSON stream.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn parse_export(reader: impl BufRead) -> Result<Vec<SourceIssue>> {
    let mut issues = Vec::new();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|source| MigrationError::SourceRead {
            path: Default::default(),
            source,
        })?;
        if line.trim_ascii().is_empty() {
            continue;
        }

        let issue: SourceIssue =
            serde_json::from_slice(&line).map_err(|source| MigrationError::MalformedRecord {
                line: index + 1,
                source,
            })?;
        issues.push(issue);
    }

    Ok(issues)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use super::*;

    const TWO_ISSUES: &str = concat!(
        r#"{"iid":3,"title":"Third","description":"c","author_id":1,"created_at":"2020-01-03T00:00:00Z"}"#,
        "\n",
        "\n",
        r#"{"iid":1,"title":"First","description":"a","author_id":2,"created_at":"2020-01-01T00:00:00Z"}"#,
        "\n",
    );

    #[test]
    fn test_parse_export_keeps_file_order_and_skips_blank_lines() {
        let issues = parse_export(Cursor::new(TWO_ISSUES)).unwrap();
        let ids: Vec<_> = issues.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_parse_export_reports_malformed_line() {
        let input = format!("{TWO_ISSUES}{{\"iid\": \"not-a-number\"}}\n");
        let err = parse_export(Cursor::new(input)).unwrap_err();
        match err {
            MigrationError::MalformedRecord { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_rejects_truncated_record() {
        let err = parse_export(Cursor::new("{\"iid\": 1, \"title\": \n")).unwrap_err();
        assert!(matches!(err, MigrationError::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_parse_export_reports_invalid_utf8_line() {
        let mut input = TWO_ISSUES.as_bytes().to_vec();
        input.extend_from_slice(b"{\"iid\":2,\"title\":\"\xff\"}\n");

        let err = parse_export(Cursor::new(input)).unwrap_err();
        match err {
            MigrationError::MalformedRecord { line, .. } => assert_eq!(line, 4),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_export_accepts_crlf_lines() {
        let input = TWO_ISSUES.replace('\n', "\r\n");
        let issues = parse_export(Cursor::new(input)).unwrap();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_read_export_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_ISSUES.as_bytes()).unwrap();

        let issues = read_export(file.path()).unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].title, "First");
    }

    #[test]
    fn test_read_export_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.ndjson");

        let err = read_export(&path).unwrap_err();
        match err {
            MigrationError::SourceRead { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
