//! The stateful encoding facade.
//!
//! A `Compressor` loads its dictionary once and can then encode any number of
//! buffers. The table is never mutated after construction, so one
//! `Compressor` can be shared across threads.

use std::path::Path;
use std::sync::Arc;

use crate::bridge::format::{Container, SpaceRun};
use crate::config::{ContainerFormat, LexisubConfig};
use crate::error::LexisubError;
use crate::kernels::dictionary::{DictionaryTable, LookupDirection};
use crate::kernels::escape::select_escape_reserved;
use crate::pipeline::{encode_body, SubstitutionStats};

pub struct Compressor {
    table: DictionaryTable,
    config: Arc<LexisubConfig>,
}

impl Compressor {
    /// Loads the word and symbol lists from disk.
    pub fn from_files(
        word_path: impl AsRef<Path>,
        symbol_path: impl AsRef<Path>,
        config: Arc<LexisubConfig>,
    ) -> Result<Self, LexisubError> {
        config.validate()?;
        let table = DictionaryTable::load(
            word_path,
            symbol_path,
            LookupDirection::Compress,
            config.format.delimiters(),
        )?;
        Ok(Self { table, config })
    }

    /// Builds the dictionary from in-memory line lists.
    pub fn from_lists(
        words: &[u8],
        symbols: &[u8],
        config: Arc<LexisubConfig>,
    ) -> Result<Self, LexisubError> {
        config.validate()?;
        let table = DictionaryTable::from_lists(
            words,
            symbols,
            LookupDirection::Compress,
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

    pub fn compress(&self, input: &[u8]) -> Result<Container, LexisubError> {
        self.compress_with_stats(input).map(|(container, _)| container)
    }

    pub fn compress_with_stats(
        &self,
        input: &[u8],
    ) -> Result<(Container, SubstitutionStats), LexisubError> {
        let format = self.config.format;
        let delimiters = format.delimiters();

        // The escape byte must not collide with data, delimiters or the first
        // byte of any symbol.
        let reserved = delimiters
            .as_byte_set()
            .union(self.table.symbol_lead_bytes());
        let escape_byte = select_escape_reserved(input, &reserved)?;

        let (core, space_run) = match format {
            ContainerFormat::Minimal => (input, None),
            ContainerFormat::SpaceRun => {
                let (run, core) = SpaceRun::split(input)?;
                (core, Some(run))
            }
        };

        let (body, stats) = encode_body(
            core,
            &self.table,
            delimiters,
            escape_byte,
            self.config.worker_count,
        )?;

        let container = Container {
            escape_byte,
            space_run,
            body,
        };
        log::info!(
            "Encoded {} bytes into {} ({:?}, escape 0x{:02x}, {} substituted, {} escaped, {} workers)",
            input.len(),
            container.encoded_len(),
            format,
            escape_byte,
            stats.substituted,
            stats.escaped,
            self.config.worker_count,
        );
        Ok((container, stats))
    }
}
