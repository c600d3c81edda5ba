use thiserror::Error;

/// Failures that abort a join invocation.
///
/// A price that cannot be resolved for an anchor is not an error; it is carried
/// as `None` and the row is removed during assembly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JoinError {
    #[error("missing column '{column}' in {table} table")]
    MissingColumn { table: &'static str, column: String },

    #[error("invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        column: String,
        row: usize,
        value: String,
    },

    #[error("malformed post timestamp '{value}' at row {row_id}")]
    MalformedTimestamp { row_id: usize, value: String },

    #[error("invalid interval token '{0}' (expected <N>min or <N>hr)")]
    InvalidInterval(String),

    #[error("invalid keyword pattern '{pattern}': {reason}")]
    InvalidKeywordPattern { pattern: String, reason: String },

    #[error("unknown timezone '{0}'")]
    InvalidTimezone(String),

    #[error("invalid join options: {0}")]
    InvalidOptions(String),
}
