//! Configuration for SparseStore
//!
//! Construction options with sensible defaults.

use crate::error::{Result, SparseError};

/// Default merge threshold, in entries (not bytes): 16 Ki
pub const DEFAULT_MIN_CONTIGUOUS: usize = 16 << 10;

/// Configuration for a Store instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Compaction Configuration
    // -------------------------------------------------------------------------
    /// Max combined length (in entries) of two touching segments that are
    /// still merged into one physical segment.
    ///
    /// `1` never merges anything, since no two non-empty segments fit.
    pub min_contiguous: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_contiguous: DEFAULT_MIN_CONTIGUOUS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the options are usable
    pub fn validate(&self) -> Result<()> {
        if self.min_contiguous == 0 {
            return Err(SparseError::Config(
                "min_contiguous must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the merge threshold (in entries)
    pub fn min_contiguous(mut self, entries: usize) -> Self {
        self.config.min_contiguous = entries;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
