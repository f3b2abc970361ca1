// In: src/config.rs

//! The single source of truth for all lexisub codec configuration.
//!
//! `LexisubConfig` is created once at the application boundary (from a JSON file,
//! a JSON string, or `Default`) and then passed down through the system as a
//! shared, read-only `Arc<LexisubConfig>`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LexisubError;
use crate::kernels::tokenizer::DelimiterSet;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// Selects the container layout and, with it, the delimiter set used by the
/// tokenizer. The two variants are not interchangeable: a container must be
/// decoded with the format it was encoded with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContainerFormat {
    /// **Default:** one escape byte followed by the body. Words are separated by
    /// the full delimiter set (whitespace, common punctuation and NUL).
    #[default]
    Minimal,

    /// Escape byte, then the leading and trailing space-run lengths as u32 LE,
    /// then the body of the space-trimmed input. Only plain spaces delimit words.
    SpaceRun,
}

impl ContainerFormat {
    /// The delimiter set the tokenizer uses for this format.
    pub fn delimiters(self) -> DelimiterSet {
        match self {
            ContainerFormat::Minimal => DelimiterSet::standard(),
            ContainerFormat::SpaceRun => DelimiterSet::spaces_only(),
        }
    }
}

/// The optional general-purpose compressor applied after substitution by the
/// file-level API. The in-memory codec never applies it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum EntropyStage {
    /// **Default:** write the container as-is.
    #[default]
    None,

    /// Wrap the container in a length-prefixed Zstandard frame.
    Zstd {
        #[serde(default = "default_zstd_level")]
        level: i32,
    },
}

fn default_zstd_level() -> i32 {
    3
}

//==================================================================================
// II. The Unified LexisubConfig
//==================================================================================

/// The single, unified configuration for an encode or decode run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LexisubConfig {
    /// The container layout (and delimiter set) in use.
    #[serde(default)]
    pub format: ContainerFormat,

    /// **The number of parallel workers per encode/decode call.**
    /// Output is byte-identical for every value; only throughput changes.
    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    /// Secondary compression stage used by `bridge::files`.
    #[serde(default)]
    pub entropy: EntropyStage,

    /// Upper bound on one decoded output. Space-run lengths come from the
    /// container header and are checked against it before any allocation.
    #[serde(default = "default_max_output_bytes")]
    pub max_output_bytes: u64,
}

impl Default for LexisubConfig {
    fn default() -> Self {
        Self {
            format: ContainerFormat::default(),
            worker_count: default_worker_count(),
            entropy: EntropyStage::default(),
            max_output_bytes: default_max_output_bytes(),
        }
    }
}

/// Helper for `serde` to provide a default for `worker_count`.
fn default_worker_count() -> usize {
    4
}

fn default_max_output_bytes() -> u64 {
    1 << 30 // 1 GiB
}

impl LexisubConfig {
    /// Parses and validates a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LexisubError> {
        let config: LexisubConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LexisubError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_format(mut self, format: ContainerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_entropy(mut self, entropy: EntropyStage) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: u64) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    /// Rejects settings that would make an operation fail halfway through.
    pub fn validate(&self) -> Result<(), LexisubError> {
        if self.worker_count == 0 {
            return Err(LexisubError::InvalidWorkerCount(self.worker_count));
        }
        if let EntropyStage::Zstd { level } = self.entropy {
            if !(1..=22).contains(&level) {
                return Err(LexisubError::Config(format!(
                    "zstd level {} is outside the supported range 1..=22",
                    level
                )));
            }
        }
        Ok(())
    }
}

//==================================================================================
// III. Unit Tests
//==================================================================================
