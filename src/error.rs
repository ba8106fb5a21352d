//! Error types for the cash-flow simplifier.

use thiserror::Error;

/// Result type alias for simplifier operations
pub type Result<T> = std::result::Result<T, SettleError>;

/// Errors that abort a simplification run.
#[derive(Error, Debug)]
pub enum SettleError {
    /// Failed to open, read or write a stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reading or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A net balance does not fit in an `i64`
    #[error("Balance of participant '{participant}' overflows the supported amount range")]
    BalanceOverflow { participant: String },

    /// Input ended before every announced record was entered
    #[error("Input closed after {received} of {expected} transactions")]
    InputClosed { expected: usize, received: usize },
}

/// Reasons a single raw debt record is rejected.
///
/// These are recoverable: the console loop re-prompts and the CSV reader
/// skips the row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Line did not split into exactly `from to amount`
    #[error("expected 3 fields (from to amount), found {found}")]
    FieldCount { found: usize },

    /// Amount is not an integer
    #[error("amount '{0}' is not an integer")]
    InvalidAmount(String),

    #[error("amount {0} is negative")]
    NegativeAmount(i64),

    #[error("participant name is empty")]
    EmptyParticipant,
}
