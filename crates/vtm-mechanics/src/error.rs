//! Error types for the dice engine and character sheet.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A roll parameter is out of range (negative pool or hunger, difficulty below 1).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The dice source could not produce a face.
    #[error("random source error: {0}")]
    RandomSource(String),

    /// A stored character record could not be read as a sheet.
    #[error("invalid character sheet: {0}")]
    InvalidSheet(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
