//! Product lookup errors.

use thiserror::Error;

/// Errors raised while looking up a kurti by its product code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The code is too short to be a valid product code. The backend is never
    /// contacted for such codes.
    #[error("product code {code:?} is too short; expected at least {min} characters")]
    InvalidCode {
        /// The rejected code, as entered.
        code: String,

        /// Minimum accepted length.
        min: usize,
    },

    /// No product exists with the given code.
    #[error("product not found: {0}")]
    NotFound(String),

    /// The lookup backend failed or returned a business error.
    #[error("product lookup failed: {0}")]
    Backend(String),
}
