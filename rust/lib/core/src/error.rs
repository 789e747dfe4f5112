use thiserror::Error;

/// Errors raised by in-memory model operations.
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    #[error("{section} row {row} out of range ({len} rows)")]
    RowOutOfRange {
        section: &'static str,
        row: usize,
        len: usize,
    },

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("unknown view: {0}")]
    UnknownView(String),
}
