//! Error types for trigger parsing.

use thiserror::Error;

/// Errors that can occur when decoding a trigger specification.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// Input could not be decoded into any trigger variant: not an object,
    /// missing or unrecognized `type` discriminant, or a field present with
    /// the wrong JSON type.
    #[error("invalid trigger input: {0}")]
    InvalidInput(String),

    /// A field decoded successfully but failed validation.
    #[error("invalid trigger field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}
