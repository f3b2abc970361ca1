//! This file is the root of the `lexisub` Rust crate.
//!
//! lexisub is a dictionary-substitution text codec: it replaces frequent words
//! with short symbols (and back), splitting the work across parallel workers
//! while producing byte-identical output for any worker count.
//!
//! Its responsibilities here are strictly limited to declaring the top-level
//! modules and re-exporting the public surface.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod bridge;
pub mod config;
pub mod kernels;
pub mod pipeline;

mod error;

//==================================================================================
// 2. Public Re-exports
//==================================================================================
pub use bridge::{
    analyze_container, compress_file, decode, decompress_file, encode, Compressor, Container,
    ContainerStats, Decompressor, SpaceRun,
};
pub use config::{ContainerFormat, EntropyStage, LexisubConfig};
pub use error::LexisubError;
pub use kernels::{DictionaryTable, LookupDirection, ShortSymbolIndex};
pub use observability::enable_verbose_logging;
pub use pipeline::SubstitutionStats;
