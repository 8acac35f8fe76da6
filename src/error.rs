//! Error types for the ACH file writer.

use thiserror::Error;

/// Result type alias for writer operations
pub type Result<T> = std::result::Result<T, AchError>;

/// Errors that can occur while building or rendering an ACH file.
#[derive(Error, Debug)]
pub enum AchError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// A value does not fit the fixed width of its field
    #[error("{field} is {len} characters, field width is {width}")]
    FieldTooLong {
        field: &'static str,
        width: usize,
        len: usize,
    },

    /// A value has the wrong shape for its field
    #[error("Invalid {field} {value:?}: {reason}")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    /// Routing prefix is not exactly 8 digits
    #[error("Routing number must be exactly 8 digits, got {0:?}")]
    InvalidRoutingNumber(String),

    /// Transaction code is not exactly 2 digits
    #[error("Transaction code must be exactly 2 digits, got {0:?}")]
    InvalidTransactionCode(String),

    /// Transaction code is neither a debit nor a credit
    #[error("Transaction code {code} on entry {trace} is neither a debit nor a credit")]
    UnclassifiableTransactionCode { code: String, trace: String },

    /// Payment type code is not R, S or blank
    #[error("Invalid payment type code {0:?}, must be 'R' or 'S'")]
    InvalidPaymentTypeCode(String),

    /// Amounts are never negative
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(String),

    /// Amount in cents does not fit its field
    #[error("{field} of {amount} exceeds {width} digits of cents")]
    AmountOverflow {
        field: &'static str,
        amount: String,
        width: usize,
    },

    /// Addenda sequence number does not match the owning entry's trace number
    #[error("Addenda sequence number {actual} does not match trace number suffix {expected}")]
    AddendaSequenceMismatch { expected: String, actual: String },

    /// Entry variant differs from the batch's Standard Entry Class
    #[error("Cannot add {entry} entry to {batch} batch")]
    EntryClassMismatch { batch: String, entry: String },

    /// Invalid instruction row in the input CSV
    #[error("Invalid instruction at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Duplicate trace number within one file
    #[error("Duplicate trace number {trace} at row {row}")]
    DuplicateTraceNumber { trace: String, row: usize },

    /// Trace number already used by another entry in the same batch or file
    #[error("Trace number {0} is already used in this file")]
    TraceNumberInUse(String),

    /// Batch numbers must increase through the file
    #[error("Batch number {batch_number} does not follow batch number {previous}")]
    BatchNumberOutOfOrder { previous: u32, batch_number: u32 },

    /// Missing command-line arguments
    #[error(
        "Missing arguments. Usage: nacha-writer <entries.csv> <immediate-destination> <immediate-origin> [destination-name] [origin-name]"
    )]
    MissingArgument,
}
