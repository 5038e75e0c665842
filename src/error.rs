//! Errors reported while building a predictor.

use thiserror::Error;

/// Errors thrown when a [`crate::config::PredictorConfig`] cannot be used to
/// build a predictor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The predictor name does not match any known predictor.
    #[error("unknown predictor type '{0}'")]
    UnknownPredictor(String),

    /// A table width of zero would produce a degenerate table.
    #[error("{field} must be at least 1 bit for the {predictor} predictor")]
    ZeroWidth {
        /// Name of the offending field.
        field: &'static str,
        /// Name of the selected predictor.
        predictor: &'static str,
    },

    /// A table width is too large to allocate.
    #[error("{field} is {bits} bits, the limit is {max}")]
    WidthTooLarge {
        /// Name of the offending field.
        field: &'static str,
        /// Requested width.
        bits: usize,
        /// Largest supported width.
        max: usize,
    },
}
