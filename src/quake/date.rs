//! Conversion of user-entered dates into the feed's query format.

use thiserror::Error;

/// Date input errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("malformed date {input:?}: expected dd.mm.yyyy, found {segments} segment(s)")]
    Malformed { input: String, segments: usize },
}

/// Convert `dd.mm.yyyy` into `yyyy-mm-dd`.
///
/// Segments are only reordered; calendar validity is not checked.
pub fn normalize_date(input: &str) -> Result<String, DateError> {
    let input = input.trim();
    let parts: Vec<&str> = input.split('.').collect();

    match parts.as_slice() {
        [day, month, year] => Ok(format!("{}-{}-{}", year, month, day)),
        _ => Err(DateError::Malformed {
            input: input.to_string(),
            segments: parts.len(),
        }),
    }
}
