//! Escape-byte selection.
//!
//! The encoder needs one byte value that never occurs as data, so that a span
//! starting with it can only mean "the rest is a literal word that happens to
//! look like a symbol". This module finds the smallest such value.

use bitvec::prelude::*;

use crate::error::LexisubError;

/// A 256-bit presence set over byte values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteSet {
    bits: BitArr!(for 256, in u64, Lsb0),
}

impl ByteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set of every byte value occurring in `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut set = Self::new();
        set.extend(bytes);
        set
    }

    pub fn insert(&mut self, byte: u8) {
        self.bits.set(byte as usize, true);
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.bits.set(byte as usize, true);
        }
    }

    #[inline]
    pub fn contains(&self, byte: u8) -> bool {
        self.bits[byte as usize]
    }

    pub fn union(&self, other: &ByteSet) -> ByteSet {
        let mut bits = self.bits;
        for index in other.bits.iter_ones() {
            bits.set(index, true);
        }
        ByteSet { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }
}

/// Returns the smallest byte value in `1..=255` absent from `buffer`.
///
/// Zero is never selected.
pub fn select_escape(buffer: &[u8]) -> Result<u8, LexisubError> {
    select_escape_reserved(buffer, &ByteSet::new())
}

/// Like [`select_escape`], but also skips every value in `reserved`.
///
/// The encoder reserves the delimiter bytes and the leading byte of every
/// registered symbol, so an escaped span can never be confused with either.
pub fn select_escape_reserved(buffer: &[u8], reserved: &ByteSet) -> Result<u8, LexisubError> {
    let used = ByteSet::from_bytes(buffer).union(reserved);
    (1..=u8::MAX)
        .find(|&candidate| !used.contains(candidate))
        .ok_or(LexisubError::NoEscapeByteAvailable)
}
