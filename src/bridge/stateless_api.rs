// In: src/bridge/stateless_api.rs

use std::path::Path;
use std::sync::Arc;

use crate::bridge::compressor::Compressor;
use crate::bridge::decompressor::Decompressor;
use crate::bridge::format::{Container, ContainerStats};
use crate::config::{ContainerFormat, LexisubConfig};
use crate::error::LexisubError;

fn config_for(worker_count: usize, format: ContainerFormat) -> Result<Arc<LexisubConfig>, LexisubError> {
    let config = LexisubConfig::default()
        .with_worker_count(worker_count)
        .with_format(format);
    // Reject a bad worker count before any dictionary I/O happens.
    config.validate()?;
    Ok(Arc::new(config))
}

/// Encodes `input` into a minimal-format container using the dictionary at
/// the two paths. The dictionary is loaded for this call only.
pub fn encode(
    word_dict_path: impl AsRef<Path>,
    symbol_dict_path: impl AsRef<Path>,
    input: &[u8],
    worker_count: usize,
) -> Result<Container, LexisubError> {
    let config = config_for(worker_count, ContainerFormat::Minimal)?;
    encode_with_config(word_dict_path, symbol_dict_path, input, config)
}

/// Decodes a container produced by [`encode`] (or by a compressor with the
/// same dictionary and format).
pub fn decode(
    word_dict_path: impl AsRef<Path>,
    symbol_dict_path: impl AsRef<Path>,
    input: &Container,
    worker_count: usize,
) -> Result<Vec<u8>, LexisubError> {
    let config = config_for(worker_count, input.format())?;
    decode_with_config(word_dict_path, symbol_dict_path, input, config)
}

pub fn encode_with_config(
    word_dict_path: impl AsRef<Path>,
    symbol_dict_path: impl AsRef<Path>,
    input: &[u8],
    config: Arc<LexisubConfig>,
) -> Result<Container, LexisubError> {
    Compressor::from_files(word_dict_path, symbol_dict_path, config)?.compress(input)
}

pub fn decode_with_config(
    word_dict_path: impl AsRef<Path>,
    symbol_dict_path: impl AsRef<Path>,
    input: &Container,
    config: Arc<LexisubConfig>,
) -> Result<Vec<u8>, LexisubError> {
    Decompressor::from_files(word_dict_path, symbol_dict_path, config)?.decompress(input)
}

/// Reads a serialized container's header without decoding the body.
pub fn analyze_container(
    bytes: &[u8],
    format: ContainerFormat,
) -> Result<ContainerStats, LexisubError> {
    let container = Container::from_bytes(bytes, format)?;
    Ok(ContainerStats {
        format,
        escape_byte: container.escape_byte,
        space_run: container.space_run,
        header_size: container.header_len(),
        body_size: container.body.len(),
        total_size: bytes.len(),
    })
}
