//! This module contains the pure, stateless building blocks of the codec.
//!
//! Nothing here knows about workers or containers: the kernels tokenize,
//! look up and choose escape markers over plain byte slices, and the
//! `pipeline` layer composes them.

pub mod dictionary;
pub mod escape;
pub mod short_symbol;
pub mod tokenizer;
pub mod zstd;

pub use dictionary::{DictionaryEntry, DictionaryTable, LookupDirection};
pub use escape::{select_escape, select_escape_reserved, ByteSet};
pub use short_symbol::ShortSymbolIndex;
pub use tokenizer::{tokenize, DelimiterSet, Token, TokenKind, Tokenizer};
