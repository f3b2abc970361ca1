// In: src/error.rs

//! This module defines the single, unified error type for the entire lexisub library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every variant is fatal to the operation that produced it. Nothing in the codec
//! retries, and no partial substitution output is ever handed back to the caller.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexisubError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// One of the two dictionary line lists could not be opened or read.
    #[error("Failed to read dictionary source '{path}': {source}")]
    DictionaryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Every usable byte value already occurs in the input (or is reserved),
    /// so no escape marker can be chosen.
    #[error("No escape byte available: every usable byte value occurs in the input")]
    NoEscapeByteAvailable,

    /// The destination for the final bytes could not be opened or written.
    #[error("Failed to write output '{path}': {source}")]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The byte-buffer provider could not read the input.
    #[error("Failed to read input '{path}': {source}")]
    InputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid worker count {0}: at least one worker is required")]
    InvalidWorkerCount(usize),

    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Space run of {0} bytes does not fit the 32-bit container header field")]
    SpaceRunOverflow(usize),

    // =========================================================================
    // === Worker Failures (promoted to whole-operation failures)
    // =========================================================================
    #[error("Worker for partition {partition} failed to reserve {requested} bytes")]
    Allocation { partition: usize, requested: usize },

    #[error("Worker for partition {0} panicked")]
    WorkerPanicked(usize),

    /// A decoded output would exceed the configured size limit.
    #[error("Decoded output of {requested} bytes exceeds the {limit}-byte limit")]
    OutputTooLarge { requested: u64, limit: u64 },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config file.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Zstd operation failed: {0}")]
    ZstdError(String),
}
