// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of the lexisub library. It owns the
// container format and everything that touches paths; the `pipeline` engine
// underneath only ever sees byte slices and a loaded dictionary.
//
// Data Flow (Encoding):
//
//   1. [Stateful Facade (Compressor)]       -> dictionary loaded once (Compress direction)
//         |
//         `-> a. picks the escape byte (input + delimiters + symbol lead bytes excluded)
//         `-> b. trims space runs (SpaceRun format only)
//         `-> c. calls `pipeline::encode_body`
//         |
//   2. [Container]                           -> header + body, `to_bytes()`
//
//
// Data Flow (Decoding):
//
//   1. [Container::from_bytes(format)]      -> header parsed for an explicit format
//         |
//   2. [Stateful Facade (Decompressor)]     -> dictionary loaded once (Decompress direction)
//         |
//         `-> a. calls `pipeline::decode_body`
//         `-> b. restores space runs (SpaceRun format only)
//
//   `stateless_api` wraps both facades for one-shot calls; `files` adds the
//   byte-buffer reader/writer and the optional zstd stage.
//
// ====================================================================================
pub mod compressor;
pub mod decompressor;
pub mod files;
pub mod format;
pub mod stateless_api;

// --- High-Level Stateful API ---
pub use compressor::Compressor;
pub use decompressor::Decompressor;

// --- Low-Level Stateless API ---
pub use files::{compress_file, decompress_file, FileReport};
pub use stateless_api::{analyze_container, decode, decode_with_config, encode, encode_with_config};

// --- Format Constants and Structs ---
pub use format::{Container, ContainerStats, SpaceRun, MINIMAL_HEADER_LEN, SPACE_RUN_HEADER_LEN};
