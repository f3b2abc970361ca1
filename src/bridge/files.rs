//! File-level compression: the byte-buffer reader and writer around the codec.
//!
//! Input is read whole, the container is built in memory, the optional
//! entropy stage is applied, and only then is the destination written. A
//! failed run therefore never leaves a partial output file behind it.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::bridge::compressor::Compressor;
use crate::bridge::decompressor::Decompressor;
use crate::bridge::format::Container;
use crate::config::{EntropyStage, LexisubConfig};
use crate::error::LexisubError;
use crate::kernels;
use crate::pipeline::SubstitutionStats;

/// Sizes and counts from one file-level run.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub input_bytes: usize,
    pub container_bytes: usize,
    pub output_bytes: usize,
    pub stats: SubstitutionStats,
}

fn read_input(path: &Path) -> Result<Vec<u8>, LexisubError> {
    std::fs::read(path).map_err(|source| LexisubError::InputIo {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), LexisubError> {
    std::fs::write(path, bytes).map_err(|source| LexisubError::OutputIo {
        path: path.to_path_buf(),
        source,
    })
}

/// Encodes `input_path` into `output_path`.
pub fn compress_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    word_dict_path: impl AsRef<Path>,
    symbol_dict_path: impl AsRef<Path>,
    config: Arc<LexisubConfig>,
) -> Result<FileReport, LexisubError> {
    let compressor = Compressor::from_files(word_dict_path, symbol_dict_path, config.clone())?;
    let input = read_input(input_path.as_ref())?;

    let (container, stats) = compressor.compress_with_stats(&input)?;
    let container_bytes = container.to_bytes();
    let container_len = container_bytes.len();
    let output = match config.entropy {
        EntropyStage::None => container_bytes,
        EntropyStage::Zstd { level } => kernels::zstd::encode(&container_bytes, level)?,
    };

    write_output(output_path.as_ref(), &output)?;
    log::info!(
        "Compressed '{}' -> '{}': {} -> {} bytes",
        input_path.as_ref().display(),
        output_path.as_ref().display(),
        input.len(),
        output.len()
    );
    Ok(FileReport {
        input_bytes: input.len(),
        container_bytes: container_len,
        output_bytes: output.len(),
        stats,
    })
}

/// Decodes `input_path` (written by [`compress_file`] with the same config)
/// into `output_path`.
pub fn decompress_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    word_dict_path: impl AsRef<Path>,
    symbol_dict_path: impl AsRef<Path>,
    config: Arc<LexisubConfig>,
) -> Result<FileReport, LexisubError> {
    let decompressor = Decompressor::from_files(word_dict_path, symbol_dict_path, config.clone())?;
    let input = read_input(input_path.as_ref())?;
    let input_len = input.len();

    let container_bytes = match config.entropy {
        EntropyStage::None => input,
        EntropyStage::Zstd { .. } => kernels::zstd::decode(&input)?,
    };
    let container = Container::from_bytes(&container_bytes, config.format)?;
    let (output, stats) = decompressor.decompress_with_stats(&container)?;

    write_output(output_path.as_ref(), &output)?;
    log::info!(
        "Decompressed '{}' -> '{}': {} -> {} bytes",
        input_path.as_ref().display(),
        output_path.as_ref().display(),
        input_len,
        output.len()
    );
    Ok(FileReport {
        input_bytes: input_len,
        container_bytes: container_bytes.len(),
        output_bytes: output.len(),
        stats,
    })
}
