//! The stateful decoding facade, mirroring `Compressor`.

use std::path::Path;
use std::sync::Arc;

use crate::bridge::format::Container;
use crate::config::LexisubConfig;
use crate::error::LexisubError;
use crate::kernels::dictionary::{DictionaryTable, LookupDirection};
use crate::pipeline::executor::reserve_output;
use crate::pipeline::{decode_body, SubstitutionStats};

pub struct Decompressor {
    table: DictionaryTable,
    config: Arc<LexisubConfig>,
}

impl Decompressor {
    /// Loads the word and symbol lists from disk, keyed by symbol.
    pub fn from_files(
        word_path: impl AsRef<Path>,
        symbol_path: impl AsRef<Path>,
        config: Arc<LexisubConfig>,
    ) -> Result<Self, LexisubError> {
        config.validate()?;
        let table = DictionaryTable::load(
            word_path,
            symbol_path,
            LookupDirection::Decompress,
            config.format.delimiters(),
        )?;
        Ok(Self { table, config })
    }

    pub fn from_lists(
        words: &[u8],
        symbols: &[u8],
        config: Arc<LexisubConfig>,
    ) -> Result<Self, LexisubError> {
        config.validate()?;
        let table = DictionaryTable::from_lists(
            words,
            symbols,
            LookupDirection::Decompress,
            config.format.delimiters(),
        );
        Ok(Self { table, config })
    }

    pub fn config(&self) -> &LexisubConfig {
        &self.config
    }

    pub fn table(&self) -> &DictionaryTable {
        &self.table
    }

    /// Parses `bytes` with the configured container format, then decodes it.
    pub fn decompress_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, LexisubError> {
        let container = Container::from_bytes(bytes, self.config.format)?;
        self.decompress(&container)
    }

    pub fn decompress(&self, container: &Container) -> Result<Vec<u8>, LexisubError> {
        self.decompress_with_stats(container).map(|(output, _)| output)
    }

    /// Decodes a container. Its layout must match the configured format, which
    /// also fixes the delimiter set the body was tokenized with.
    pub fn decompress_with_stats(
        &self,
        container: &Container,
    ) -> Result<(Vec<u8>, SubstitutionStats), LexisubError> {
        let format = container.format();
        if format != self.config.format {
            return Err(LexisubError::Config(format!(
                "container uses the {:?} format but the decompressor is configured for {:?}",
                format, self.config.format
            )));
        }

        // Runs come straight from the header; reject oversized ones before
        // decoding anything.
        let runs = container
            .space_run
            .map_or(0, |run| run.leading as u64 + run.trailing as u64);
        self.check_output_len(runs)?;

        let (decoded, stats) = decode_body(
            &container.body,
            &self.table,
            format.delimiters(),
            container.escape_byte,
            self.config.worker_count,
        )?;
        let total = runs + decoded.len() as u64;
        self.check_output_len(total)?;

        let output = match container.space_run {
            None => decoded,
            Some(run) => {
                // Only a 32-bit target can fail this conversion.
                let requested = usize::try_from(total).map_err(|_| {
                    LexisubError::OutputTooLarge {
                        requested: total,
                        limit: self.config.max_output_bytes,
                    }
                })?;
                let mut output = reserve_output(0, requested)?;
                output.resize(run.leading as usize, b' ');
                output.extend_from_slice(&decoded);
                output.resize(requested, b' ');
                output
            }
        };

        log::info!(
            "Decoded {} bytes into {} ({:?}, {} substituted, {} escaped, {} workers)",
            container.encoded_len(),
            output.len(),
            format,
            stats.substituted,
            stats.escaped,
            self.config.worker_count,
        );
        Ok((output, stats))
    }

    fn check_output_len(&self, requested: u64) -> Result<(), LexisubError> {
        let limit = self.config.max_output_bytes;
        if requested > limit {
            return Err(LexisubError::OutputTooLarge { requested, limit });
        }
        Ok(())
    }
}
