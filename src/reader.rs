//! Line-oriented readers for accounting files.
//!
//! These helpers never fail: a missing, unreadable or short file yields an
//! empty result. Each call opens, reads and closes the file once.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::trace;

pub const NEWLINE: u8 = b'\n';
pub const NUL: u8 = b'\0';

fn open(path: &Path) -> Option<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Some(BufReader::new(file)),
        Err(e) => {
            trace!("Cannot open {}: {}", path.display(), e);
            None
        }
    }
}

/// Returns line `index` (0-based) of `path` without its line terminator.
/// Invalid UTF-8 is replaced lossily, so a process name with arbitrary
/// bytes does not hide the rest of the record.
pub fn read_line_raw(path: &Path, index: usize) -> Option<String> {
    let reader = open(path)?;
    match reader.split(NEWLINE).nth(index)? {
        Ok(bytes) => Some(decode(&bytes, NEWLINE)),
        Err(e) => {
            trace!("Read error in {}: {}", path.display(), e);
            None
        }
    }
}

fn decode(bytes: &[u8], delimiter: u8) -> String {
    let mut record = String::from_utf8_lossy(bytes).into_owned();
    if delimiter == NEWLINE && record.ends_with('\r') {
        record.pop();
    }
    record
}

/// Returns line `index` (0-based) of `path` split on whitespace.
/// Empty when the file has fewer than `index + 1` lines or cannot be opened.
pub fn read_line(path: &Path, index: usize) -> Vec<String> {
    read_line_raw(path, index)
        .map(|line| tokenize(&line))
        .unwrap_or_default()
}

/// Splits the whole file on `delimiter`. A trailing delimiter does not
/// produce an empty final record. Invalid UTF-8 is replaced lossily.
pub fn read_all_lines(path: &Path, delimiter: u8) -> Vec<String> {
    let Some(reader) = open(path) else {
        return Vec::new();
    };

    let mut out = Vec::new();
    for chunk in reader.split(delimiter) {
        match chunk {
            Ok(bytes) => out.push(decode(&bytes, delimiter)),
            Err(e) => {
                trace!("Read error in {}: {}", path.display(), e);
                break;
            }
        }
    }
    out
}

pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_line_tokens() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("meminfo");
        std::fs::write(&path, "MemTotal:  2000000 kB\nMemFree:    500000 kB\n")
            .expect("Failed to write file");

        assert_eq!(read_line(&path, 0), vec!["MemTotal:", "2000000", "kB"]);
        assert_eq!(read_line(&path, 1), vec!["MemFree:", "500000", "kB"]);
    }

    #[test]
    fn test_read_line_past_end_is_empty() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("short");
        std::fs::write(&path, "only one line\n").expect("Failed to write file");

        assert!(read_line(&path, 1).is_empty());
        assert!(read_line_raw(&path, 5).is_none());
    }

    #[test]
    fn test_read_line_missing_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("does-not-exist");

        assert!(read_line(&path, 0).is_empty());
        assert!(read_all_lines(&path, NEWLINE).is_empty());
    }

    #[test]
    fn test_read_line_raw_keeps_spacing() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("version");
        std::fs::write(&path, "Linux version  6.1.0 (gcc)\n").expect("Failed to write file");

        assert_eq!(
            read_line_raw(&path, 0).as_deref(),
            Some("Linux version  6.1.0 (gcc)")
        );
    }

    #[test]
    fn test_read_all_lines_nul_delimited() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("cmdline");
        std::fs::write(&path, b"/usr/bin/python3\0-m\0http.server\0").expect("Failed to write");

        assert_eq!(
            read_all_lines(&path, NUL),
            vec!["/usr/bin/python3", "-m", "http.server"]
        );
    }

    #[test]
    fn test_read_all_lines_strips_carriage_return() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("crlf");
        std::fs::write(&path, "a\r\nb\n").expect("Failed to write file");

        assert_eq!(read_all_lines(&path, NEWLINE), vec!["a", "b"]);
    }

    #[test]
    fn test_read_line_raw_invalid_utf8() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("stat");
        std::fs::write(&path, b"header\n5 (bad\xffname) S 1\r\n").expect("Failed to write file");

        assert_eq!(
            read_line_raw(&path, 1).as_deref(),
            Some("5 (bad\u{FFFD}name) S 1")
        );
        assert_eq!(read_line(&path, 1).len(), 4);
    }
}
