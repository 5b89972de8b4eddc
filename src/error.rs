//! Error types for spargraph.
//!
//! Only configuration and shape mistakes surface as errors. A vertex that is
//! still uncolored after the iteration cap is routed to the serial fallback,
//! never reported. Malformed CSR handed to a kernel directly is a caller bug.

use thiserror::Error;

/// Result type alias using spargraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when configuring or invoking a kernel
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unrecognized distance-2 coloring variant selector
    #[error("Unknown distance-2 coloring algorithm '{name}'")]
    UnknownAlgorithm {
        /// The selector that failed to parse
        name: String,
    },

    /// A configuration value is out of range or the document did not parse
    #[error("Invalid configuration field '{field}': {reason}")]
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// CSR parts do not describe a valid compressed adjacency
    #[error("Malformed CSR adjacency: {reason}")]
    MalformedCsr {
        /// What check failed
        reason: String,
    },

    /// The transpose handed to the coloring engine does not match the forward graph
    #[error(
        "Transpose shape mismatch: forward is {rows}x{cols} with {edges} entries, \
         transpose is {t_rows}x{t_cols} with {t_edges} entries"
    )]
    TransposeMismatch {
        /// Forward row count
        rows: usize,
        /// Forward column count
        cols: usize,
        /// Forward entry count
        edges: usize,
        /// Transpose row count
        t_rows: usize,
        /// Transpose column count
        t_cols: usize,
        /// Transpose entry count
        t_edges: usize,
    },
}

impl Error {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedCsr {
            reason: reason.into(),
        }
    }
}
