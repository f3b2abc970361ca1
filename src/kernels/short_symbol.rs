//! Direct-addressed lookup for byte-string keys of length 1 to 3.
//!
//! Most dictionary symbols are one to three bytes long, so the hot path of
//! both directions goes through this index instead of hashing. Keys address
//! slots directly:
//!
//! - 1-byte keys: a dense table of 256 slots.
//! - 2-byte keys: a dense table of 65 536 slots.
//! - 3-byte keys: 65 536 lazily allocated pages of 256 slots, selected by the
//!   first two bytes.
//!
//! A slot holds `0` when absent, otherwise a 1-based index into the stored
//! replacement values. The general hash map in `DictionaryTable` remains the
//! source of truth for every key length; this index only mirrors the short ones.

const ABSENT: u32 = 0;
const PAGE_SIZE: usize = 256;
const PAIR_SLOTS: usize = 256 * 256;

/// Longest key the index accepts.
pub const MAX_SHORT_KEY_LEN: usize = 3;

#[derive(Clone, Debug)]
pub struct ShortSymbolIndex {
    singles: Box<[u32]>,
    pairs: Box<[u32]>,
    triples: Vec<Option<Box<[u32]>>>,
    replacements: Vec<Box<[u8]>>,
}

impl Default for ShortSymbolIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortSymbolIndex {
    pub fn new() -> Self {
        Self {
            singles: vec![ABSENT; PAGE_SIZE].into_boxed_slice(),
            pairs: vec![ABSENT; PAIR_SLOTS].into_boxed_slice(),
            triples: vec![None; PAIR_SLOTS],
            replacements: Vec::new(),
        }
    }

    #[inline]
    fn pair_index(a: u8, b: u8) -> usize {
        ((a as usize) << 8) | b as usize
    }

    #[inline]
    fn slot(&self, key: &[u8]) -> u32 {
        match *key {
            [a] => self.singles[a as usize],
            [a, b] => self.pairs[Self::pair_index(a, b)],
            [a, b, c] => self.triples[Self::pair_index(a, b)]
                .as_ref()
                .map_or(ABSENT, |page| page[c as usize]),
            _ => ABSENT,
        }
    }

    fn slot_mut(&mut self, key: &[u8]) -> Option<&mut u32> {
        match *key {
            [a] => Some(&mut self.singles[a as usize]),
            [a, b] => Some(&mut self.pairs[Self::pair_index(a, b)]),
            [a, b, c] => {
                let page = self.triples[Self::pair_index(a, b)]
                    .get_or_insert_with(|| vec![ABSENT; PAGE_SIZE].into_boxed_slice());
                Some(&mut page[c as usize])
            }
            _ => None,
        }
    }

    /// Records `key -> replacement`. A later insert for the same key replaces
    /// the earlier value. Returns `false` (and stores nothing) when the key is
    /// empty or longer than [`MAX_SHORT_KEY_LEN`].
    pub fn insert(&mut self, key: &[u8], replacement: &[u8]) -> bool {
        let next_slot = self.replacements.len() as u32 + 1;
        let Some(slot) = self.slot_mut(key) else {
            return false;
        };
        let current = *slot;
        if current == ABSENT {
            *slot = next_slot;
            self.replacements.push(replacement.into());
        } else {
            self.replacements[(current - 1) as usize] = replacement.into();
        }
        true
    }

    /// True if `key` is a registered short pattern. Keys outside 1..=3 bytes
    /// are always absent.
    #[inline]
    pub fn contains(&self, key: &[u8]) -> bool {
        self.slot(key) != ABSENT
    }

    /// The replacement recorded for `key`, with its length.
    #[inline]
    pub fn lookup(&self, key: &[u8]) -> Option<(&[u8], usize)> {
        match self.slot(key) {
            ABSENT => None,
            slot => {
                let value = &self.replacements[(slot - 1) as usize];
                Some((&value[..], value.len()))
            }
        }
    }

    /// Number of distinct keys stored.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}
