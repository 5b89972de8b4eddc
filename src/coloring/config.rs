//! Coloring configuration and variant selection.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Forbidden-color representation used by the speculative phase.
///
/// All variants produce a valid distance-2 coloring; they differ only in speed
/// and, through scan order effects, in the number of colors used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Distance2Algorithm {
    /// Plain 64-slot boolean window, re-scanned per window offset.
    #[default]
    Vb,
    /// One `u64` mask per 64-color window.
    VbBit,
    /// Bitmask plus in-place filtering of fully-colored neighbor rows.
    VbBitEf,
}

impl Distance2Algorithm {
    /// All variants, in declaration order.
    pub const ALL: [Distance2Algorithm; 3] = [Self::Vb, Self::VbBit, Self::VbBitEf];

    /// Canonical selector string.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vb => "vb",
            Self::VbBit => "vb_bit",
            Self::VbBitEf => "vb_bit_ef",
        }
    }

    /// Whether the variant needs a private mutable copy of the forward rows.
    pub const fn uses_edge_filtering(self) -> bool {
        matches!(self, Self::VbBitEf)
    }
}

impl FromStr for Distance2Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vb" | "d2" | "coloring_d2" | "coloring_d2_vb" => Ok(Self::Vb),
            "vb_bit" | "coloring_d2_vb_bit" => Ok(Self::VbBit),
            "vb_bit_ef" | "coloring_d2_vb_bit_ef" => Ok(Self::VbBitEf),
            _ => Err(Error::UnknownAlgorithm { name: s.to_string() }),
        }
    }
}

impl TryFrom<String> for Distance2Algorithm {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Distance2Algorithm> for String {
    fn from(value: Distance2Algorithm) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Distance2Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters of one [`color_distance2`](super::color_distance2) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColoringConfig {
    /// Speculative-phase strategy.
    pub algorithm: Distance2Algorithm,
    /// Minimum number of list entries handed to one worker.
    /// Lists shorter than `100 * chunk_size` use a chunk of 1.
    pub chunk_size: usize,
    /// Speculate/detect rounds before the serial fallback takes over.
    pub max_iterations: usize,
    /// Record phase timings and emit per-iteration `debug` events.
    pub verbose: bool,
}

impl Default for ColoringConfig {
    fn default() -> Self {
        Self {
            algorithm: Distance2Algorithm::default(),
            chunk_size: 1,
            max_iterations: 200,
            verbose: false,
        }
    }
}

impl ColoringConfig {
    /// Default configuration with the given algorithm.
    pub fn new(algorithm: Distance2Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets the speculative-phase strategy.
    pub fn with_algorithm(mut self, algorithm: Distance2Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the minimum per-worker chunk length.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Enables or disables timing and per-iteration logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks value ranges.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if `chunk_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::invalid_config("chunk_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// [`Error::UnknownAlgorithm`] for an unrecognized `algorithm` selector,
    /// [`Error::InvalidConfig`] if the document does not parse or fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::invalid_config("config", e.to_string()))?;
        if let Some(name) = value.get("algorithm").and_then(serde_json::Value::as_str) {
            name.parse::<Distance2Algorithm>()?;
        }
        let config: Self =
            serde_json::from_value(value).map_err(|e| Error::invalid_config("config", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Chunk length for a list of `len` entries.
    pub(crate) fn effective_chunk(&self, len: usize) -> usize {
        if len < self.chunk_size.saturating_mul(100) {
            1
        } else {
            self.chunk_size
        }
    }
}
