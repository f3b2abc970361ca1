//! The optional secondary entropy stage: Zstandard over the finished container.
//!
//! Substitution shrinks frequent words, but the body still carries plenty of
//! byte-level redundancy. The file API can hand the container to this module,
//! which is a panic-free wrapper around the `zstd` crate.
//!
//! ### Frame Layout
//! 1.  **Uncompressed Length (`u64` LE)**: the container size before compression.
//! 2.  **Zstd Stream**: one complete Zstandard frame.

use crate::error::LexisubError;

const LENGTH_PREFIX: usize = std::mem::size_of::<u64>();

/// Compresses `input_bytes` into a length-prefixed Zstandard frame.
pub fn encode(input_bytes: &[u8], level: i32) -> Result<Vec<u8>, LexisubError> {
    let mut output_buf = Vec::with_capacity(LENGTH_PREFIX + input_bytes.len() / 2);

    let uncompressed_len: u64 = input_bytes.len() as u64;
    output_buf.extend_from_slice(&uncompressed_len.to_le_bytes());

    let mut encoder = zstd::stream::Encoder::new(&mut output_buf, level)
        .map_err(|e| LexisubError::ZstdError(e.to_string()))?;
    std::io::Write::write_all(&mut encoder, input_bytes)
        .map_err(|e| LexisubError::ZstdError(e.to_string()))?;
    // The frame is incomplete until `finish` writes its epilogue.
    encoder
        .finish()
        .map_err(|e| LexisubError::ZstdError(e.to_string()))?;

    Ok(output_buf)
}

/// Reverses [`encode`], checking the decoded size against the prefix.
pub fn decode(input_bytes: &[u8]) -> Result<Vec<u8>, LexisubError> {
    let (len_bytes, compressed_data) = input_bytes
        .split_first_chunk::<LENGTH_PREFIX>()
        .ok_or_else(|| {
            LexisubError::ZstdError("Input stream too short to contain size header.".to_string())
        })?;
    let uncompressed_len = u64::from_le_bytes(*len_bytes);

    // The prefix is untrusted, so it only checks the result and never sizes
    // the buffer.
    let mut decompressed_data: Vec<u8> = Vec::new();
    zstd::stream::copy_decode(compressed_data, &mut decompressed_data)
        .map_err(|e| LexisubError::ZstdError(e.to_string()))?;

    if decompressed_data.len() as u64 != uncompressed_len {
        return Err(LexisubError::ZstdError(format!(
            "Decompressed size does not match header. Expected {}, got {}.",
            uncompressed_len,
            decompressed_data.len()
        )));
    }

    Ok(decompressed_data)
}
