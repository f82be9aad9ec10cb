use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Malformed pattern table {file} at {path}: {reason}")]
pub struct PatternError {
    pub file: String,
    pub path: String,
    pub reason: String,
}
