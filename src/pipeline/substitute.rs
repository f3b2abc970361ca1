//! The per-token substitution rules for both directions.
//!
//! Encode, for each word:
//! 1. the word is a dictionary key          -> emit its symbol;
//! 2. the word equals a registered symbol   -> emit `escape ++ word`;
//! 3. otherwise                             -> emit the word unchanged.
//!
//! Decode, for each non-delimiter span:
//! 1. the span starts with the escape byte  -> emit the rest literally;
//! 2. a short-index hit (spans of 1..=3 bytes) -> emit the recorded word;
//! 3. a hash-map hit                        -> emit the mapped word;
//! 4. otherwise                             -> emit the span unchanged.

use crate::kernels::dictionary::DictionaryTable;
use crate::kernels::short_symbol::MAX_SHORT_KEY_LEN;
use crate::pipeline::SubstitutionStats;

#[inline]
pub(crate) fn encode_word(
    word: &[u8],
    table: &DictionaryTable,
    escape: u8,
    out: &mut Vec<u8>,
    stats: &mut SubstitutionStats,
) {
    if let Some(symbol) = table.get(word) {
        out.extend_from_slice(symbol);
        stats.substituted += 1;
    } else if table.is_symbol(word) {
        out.push(escape);
        out.extend_from_slice(word);
        stats.escaped += 1;
    } else {
        out.extend_from_slice(word);
        stats.passed_through += 1;
    }
}

#[inline]
pub(crate) fn decode_span(
    span: &[u8],
    table: &DictionaryTable,
    escape: u8,
    out: &mut Vec<u8>,
    stats: &mut SubstitutionStats,
) {
    if let Some((&first, literal)) = span.split_first() {
        if first == escape {
            out.extend_from_slice(literal);
            stats.escaped += 1;
            return;
        }
    }

    if span.len() <= MAX_SHORT_KEY_LEN {
        if let Some((word, _)) = table.short_index().lookup(span) {
            out.extend_from_slice(word);
            stats.substituted += 1;
            return;
        }
    }

    match table.get(span) {
        Some(word) => {
            out.extend_from_slice(word);
            stats.substituted += 1;
        }
        None => {
            out.extend_from_slice(span);
            stats.passed_through += 1;
        }
    }
}
