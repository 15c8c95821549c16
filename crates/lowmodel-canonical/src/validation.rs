use thiserror::Error;

/// Validation errors for canonical primitives.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// When an encoded value cannot be decoded.
    #[error("{field} ('{value}') is not valid {encoding}")]
    InvalidEncoding {
        /// Field name that failed validation.
        field: &'static str,
        /// Expected encoding.
        encoding: &'static str,
        /// Offending value.
        value: String,
    },
    /// When decoded bytes have the wrong length.
    #[error("{field} has {actual} bytes, expected {expected}")]
    InvalidLength {
        /// Field name that failed validation.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },
}
