//! The dictionary table: word <-> symbol associations loaded from two
//! line-aligned lists.
//!
//! Line N of the word list pairs with line N of the symbol list. Pairing stops
//! as soon as either list runs out, and a pair with an empty side is skipped.
//! The `LookupDirection` decides which side becomes the hash key:
//!
//! - `Compress`:   word -> symbol. Every symbol of 1..=3 bytes is marked present
//!   in the short-symbol index so the encoder can detect literal collisions.
//! - `Decompress`: symbol -> word. Every symbol of 1..=3 bytes is recorded in
//!   the short-symbol index together with its word.
//!
//! The table is built once per run and is read-only afterwards; workers share
//! it by reference.

use std::path::Path;

use hashbrown::{HashMap, HashSet};

use crate::error::LexisubError;
use crate::kernels::escape::ByteSet;
use crate::kernels::short_symbol::{ShortSymbolIndex, MAX_SHORT_KEY_LEN};
use crate::kernels::tokenizer::DelimiterSet;

//==================================================================================
// 1. Entries & Direction
//==================================================================================

/// Which side of each entry is looked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupDirection {
    /// word -> symbol
    Compress,
    /// symbol -> word
    Decompress,
}

/// One word/symbol association. Neither side is ever empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub word: Box<[u8]>,
    pub symbol: Box<[u8]>,
}

impl DictionaryEntry {
    /// Returns `None` when either side is empty.
    pub fn new(word: &[u8], symbol: &[u8]) -> Option<Self> {
        if word.is_empty() || symbol.is_empty() {
            return None;
        }
        Some(Self {
            word: word.into(),
            symbol: symbol.into(),
        })
    }
}

/// Splits a line list on `\n`, stripping a trailing `\r` from each line.
/// A final newline does not start an extra line.
fn lines(source: &[u8]) -> impl Iterator<Item = &[u8]> {
    let source = source.strip_suffix(b"\n").unwrap_or(source);
    source
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

/// Pairs the two line lists into entries, skipping pairs with a blank side.
pub fn pair_entries(words: &[u8], symbols: &[u8]) -> Vec<DictionaryEntry> {
    lines(words)
        .zip(lines(symbols))
        .filter_map(|(word, symbol)| DictionaryEntry::new(word, symbol))
        .collect()
}

//==================================================================================
// 2. The Table
//==================================================================================

#[derive(Clone, Debug)]
pub struct DictionaryTable {
    direction: LookupDirection,
    map: HashMap<Box<[u8]>, Box<[u8]>>,
    /// Registered symbols longer than the short index covers.
    long_symbols: HashSet<Box<[u8]>>,
    /// First byte of every registered symbol.
    symbol_lead_bytes: ByteSet,
    index: ShortSymbolIndex,
    dropped: usize,
}

impl DictionaryTable {
    /// A table with no entries. Every lookup misses.
    pub fn empty(direction: LookupDirection) -> Self {
        Self {
            direction,
            map: HashMap::new(),
            long_symbols: HashSet::new(),
            symbol_lead_bytes: ByteSet::new(),
            index: ShortSymbolIndex::new(),
            dropped: 0,
        }
    }

    /// Builds the table from already-paired entries.
    ///
    /// Entries whose symbol contains a byte of `delimiters` are dropped: the
    /// tokenizer would split such a symbol, so it could never be decoded.
    /// For duplicate keys the later entry wins.
    pub fn from_entries<I>(entries: I, direction: LookupDirection, delimiters: DelimiterSet) -> Self
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let mut table = Self::empty(direction);
        for entry in entries {
            if delimiters.any_in(&entry.symbol) {
                log::warn!(
                    "Dropping dictionary entry '{}': symbol '{}' contains a delimiter byte",
                    String::from_utf8_lossy(&entry.word),
                    String::from_utf8_lossy(&entry.symbol),
                );
                table.dropped += 1;
                continue;
            }
            table.add(entry);
        }
        table
    }

    /// Builds the table from the raw contents of the two line lists.
    pub fn from_lists(
        words: &[u8],
        symbols: &[u8],
        direction: LookupDirection,
        delimiters: DelimiterSet,
    ) -> Self {
        Self::from_entries(pair_entries(words, symbols), direction, delimiters)
    }

    /// Reads both line lists from disk and builds the table.
    pub fn load(
        word_path: impl AsRef<Path>,
        symbol_path: impl AsRef<Path>,
        direction: LookupDirection,
        delimiters: DelimiterSet,
    ) -> Result<Self, LexisubError> {
        let words = read_source(word_path.as_ref())?;
        let symbols = read_source(symbol_path.as_ref())?;
        let table = Self::from_lists(&words, &symbols, direction, delimiters);

        log::info!(
            "Loaded {} dictionary entries ({:?}, {} short symbols, {} dropped)",
            table.len(),
            direction,
            table.index.len(),
            table.dropped,
        );
        Ok(table)
    }

    fn add(&mut self, entry: DictionaryEntry) {
        let DictionaryEntry { word, symbol } = entry;

        self.symbol_lead_bytes.insert(symbol[0]);
        if symbol.len() <= MAX_SHORT_KEY_LEN {
            match self.direction {
                LookupDirection::Compress => self.index.insert(&symbol, &[]),
                LookupDirection::Decompress => self.index.insert(&symbol, &word),
            };
        } else {
            self.long_symbols.insert(symbol.clone());
        }

        match self.direction {
            LookupDirection::Compress => self.map.insert(word, symbol),
            LookupDirection::Decompress => self.map.insert(symbol, word),
        };
    }

    pub fn direction(&self) -> LookupDirection {
        self.direction
    }

    /// General hash lookup, valid for keys of every length.
    #[inline]
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.map.get(key).map(|value| &value[..])
    }

    #[inline]
    pub fn short_index(&self) -> &ShortSymbolIndex {
        &self.index
    }

    /// True if `bytes` equals any registered symbol, whatever its length.
    #[inline]
    pub fn is_symbol(&self, bytes: &[u8]) -> bool {
        if bytes.len() <= MAX_SHORT_KEY_LEN {
            self.index.contains(bytes)
        } else {
            self.long_symbols.contains(bytes)
        }
    }

    pub fn symbol_lead_bytes(&self) -> &ByteSet {
        &self.symbol_lead_bytes
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of entries rejected at load time.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>, LexisubError> {
    std::fs::read(path).map_err(|source| LexisubError::DictionaryIo {
        path: path.to_path_buf(),
        source,
    })
}

//==================================================================================
// 3. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn compress_table(words: &[u8], symbols: &[u8]) -> DictionaryTable {
        DictionaryTable::from_lists(
            words,
            symbols,
            LookupDirection::Compress,
            DelimiterSet::standard(),
        )
    }

    fn decompress_table(words: &[u8], symbols: &[u8]) -> DictionaryTable {
        DictionaryTable::from_lists(
            words,
            symbols,
            LookupDirection::Decompress,
            DelimiterSet::standard(),
        )
    }

    #[test]
    fn test_compress_direction_maps_word_to_symbol() {
        let table = compress_table(b"the\nis\n", b"A\nB\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b"the"), Some(&b"A"[..]));
        assert_eq!(table.get(b"is"), Some(&b"B"[..]));
        assert_eq!(table.get(b"A"), None);
        assert!(table.short_index().contains(b"A"));
        assert!(table.is_symbol(b"B"));
        assert!(!table.is_symbol(b"the"));
    }

    #[test]
    fn test_decompress_direction_maps_symbol_to_word() {
        let table = decompress_table(b"the\nbecause\n", b"A\nBcd\n");
        assert_eq!(table.get(b"A"), Some(&b"the"[..]));
        assert_eq!(
            table.short_index().lookup(b"Bcd"),
            Some((&b"because"[..], 7))
        );
    }

    #[test]
    fn test_blank_lines_skip_the_pair() {
        let table = compress_table(b"the\n\ncat\ndog", b"A\nB\n\nD");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b"the"), Some(&b"A"[..]));
        assert_eq!(table.get(b"dog"), Some(&b"D"[..]));
        assert_eq!(table.get(b"cat"), None);
        assert!(!table.is_symbol(b"B"));
    }

    #[test]
    fn test_pairing_stops_at_shorter_list() {
        let table = compress_table(b"one\ntwo\nthree", b"1\n2");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b"three"), None);
    }

    #[test]
    fn test_crlf_line_endings_are_stripped() {
        let table = compress_table(b"the\r\nis\r\n", b"A\r\nB\r\n");
        assert_eq!(table.get(b"the"), Some(&b"A"[..]));
        assert_eq!(table.get(b"is"), Some(&b"B"[..]));
    }

    #[test]
    fn test_duplicate_key_last_line_wins() {
        let table = compress_table(b"the\nthe", b"A\nB");
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b"the"), Some(&b"B"[..]));
        // Both symbols stay registered for collision checks.
        assert!(table.is_symbol(b"A"));
        assert!(table.is_symbol(b"B"));
    }

    #[test]
    fn test_long_symbols_are_registered_outside_the_index() {
        let table = compress_table(b"international", b"INTL");
        assert!(table.is_symbol(b"INTL"));
        assert!(table.short_index().is_empty());
    }

    #[test]
    fn test_symbol_with_delimiter_is_dropped() {
        let table = compress_table(b"the\nhello", b"A\nB C");
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped(), 1);
        assert_eq!(table.get(b"hello"), None);
    }

    #[test]
    fn test_symbol_lead_bytes() {
        let table = compress_table(b"the\nand", b"Xy\nQ");
        assert!(table.symbol_lead_bytes().contains(b'X'));
        assert!(table.symbol_lead_bytes().contains(b'Q'));
        assert!(!table.symbol_lead_bytes().contains(b'y'));
    }

    #[test]
    fn test_empty_lists_build_an_empty_table() {
        let table = compress_table(b"", b"");
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_dictionary_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        std::fs::write(&words, b"the\n").unwrap();
        let missing = dir.path().join("missing.txt");

        let result = DictionaryTable::load(
            &words,
            &missing,
            LookupDirection::Compress,
            DelimiterSet::standard(),
        );
        match result {
            Err(LexisubError::DictionaryIo { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected DictionaryIo, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_load_reads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        let symbols = dir.path().join("symbols.txt");
        std::fs::write(&words, b"the\nis\n").unwrap();
        std::fs::write(&symbols, b"A\nB\n").unwrap();

        let table = DictionaryTable::load(
            &words,
            &symbols,
            LookupDirection::Decompress,
            DelimiterSet::standard(),
        )
        .unwrap();
        assert_eq!(table.get(b"B"), Some(&b"is"[..]));
    }
}
