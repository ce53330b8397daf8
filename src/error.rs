//! Error types for accounting file parsing.
//!
//! Parsers return `ProcError` internally. Public accessors log it and fall
//! back to a zero or empty default, so callers never see it directly.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ProcError {
    #[error("{}: file unavailable or empty", path.display())]
    Unavailable { path: PathBuf },

    #[error("{}: expected at least {expected} fields, got {found}", path.display())]
    ShortRecord {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("{}: field `{field}` is not a number: {value:?}", path.display())]
    InvalidNumber {
        path: PathBuf,
        field: &'static str,
        value: String,
    },

    #[error("{}: key `{key}` not found", path.display())]
    MissingKey { path: PathBuf, key: &'static str },
}

pub type ProcResult<T> = Result<T, ProcError>;

/// Parses one numeric token, naming the field on failure.
pub fn parse_number<T: std::str::FromStr>(
    path: &std::path::Path,
    field: &'static str,
    raw: &str,
) -> ProcResult<T> {
    raw.parse::<T>().map_err(|_| ProcError::InvalidNumber {
        path: path.to_path_buf(),
        field,
        value: raw.to_string(),
    })
}

/// Collapses a parse result to its value, or the type's default after
/// logging why the data was unusable.
pub fn or_default<T: Default>(result: ProcResult<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!("{}", e);
            T::default()
        }
    }
}
