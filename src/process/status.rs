//! Field lookup in `/proc/<pid>/status`.

use crate::error::{parse_number, ProcError, ProcResult};
use crate::schema::{keyed_line, StatusField};
use std::path::Path;

/// First value token of a status field (`VmRSS:   2048 kB` → `"2048"`,
/// `Uid: 1000 1000 1000 1000` → `"1000"`, the real UID).
pub fn status_value<'a, S: AsRef<str>>(
    path: &Path,
    lines: &'a [S],
    field: StatusField,
) -> ProcResult<&'a str> {
    let layout = field.layout();
    let line = keyed_line(lines, layout).ok_or_else(|| ProcError::MissingKey {
        path: path.to_path_buf(),
        key: layout.key,
    })?;
    line.split_whitespace()
        .nth(1)
        .ok_or_else(|| ProcError::ShortRecord {
            path: path.to_path_buf(),
            expected: 2,
            found: 1,
        })
}

/// Resident set size in whole megabytes.
pub fn resident_mb<S: AsRef<str>>(path: &Path, lines: &[S]) -> ProcResult<u64> {
    let raw = status_value(path, lines, StatusField::VmRss)?;
    let kb: u64 = parse_number(path, "VmRSS", raw)?;
    Ok(kb / 1024)
}
