//! Body-level encode and decode: plan, fan out, gather.
//!
//! These functions know nothing about headers. The bridge layer chooses the
//! escape byte, strips or restores space runs, and frames the body.

use crate::error::LexisubError;
use crate::kernels::dictionary::{DictionaryTable, LookupDirection};
use crate::kernels::tokenizer::{tokenize, DelimiterSet, TokenKind, Tokenizer};
use crate::pipeline::executor::{gather, reserve_output, run_partitions, PartitionOutput};
use crate::pipeline::planner::{plan_byte_partitions, plan_token_partitions};
use crate::pipeline::substitute::{decode_span, encode_word};
use crate::pipeline::SubstitutionStats;

/// Initial capacity of an encode worker's buffer, as a multiple of its input.
/// Escaping adds at most one byte per word.
const ENCODE_CAPACITY_FACTOR: usize = 2;
/// Initial capacity of a decode worker's buffer, as a multiple of its input.
/// Words are usually longer than their symbols.
const DECODE_CAPACITY_FACTOR: usize = 4;

fn check_preconditions(
    table: &DictionaryTable,
    expected: LookupDirection,
    workers: usize,
) -> Result<(), LexisubError> {
    if workers == 0 {
        return Err(LexisubError::InvalidWorkerCount(workers));
    }
    if table.direction() != expected {
        return Err(LexisubError::Config(format!(
            "dictionary was built for {:?} but the operation needs {:?}",
            table.direction(),
            expected
        )));
    }
    Ok(())
}

/// Substitutes every word of `input` and returns the body.
///
/// `table` must be a `Compress`-direction table and `escape` must not occur in
/// `input`.
pub fn encode_body(
    input: &[u8],
    table: &DictionaryTable,
    delimiters: DelimiterSet,
    escape: u8,
    workers: usize,
) -> Result<(Vec<u8>, SubstitutionStats), LexisubError> {
    check_preconditions(table, LookupDirection::Compress, workers)?;

    let tokens = tokenize(input, delimiters);
    let partitions = plan_token_partitions(tokens.len(), workers);

    let parts = run_partitions(&partitions, |idx, range| {
        let slice = &tokens[range];
        let span_bytes = match (slice.first(), slice.last()) {
            (Some(first), Some(last)) => last.end() - first.start,
            _ => 0,
        };

        let mut bytes = reserve_output(idx, span_bytes * ENCODE_CAPACITY_FACTOR)?;
        let mut stats = SubstitutionStats::default();
        for token in slice {
            match token.kind {
                TokenKind::Delimiter => {
                    bytes.push(input[token.start]);
                    stats.delimiters += 1;
                }
                TokenKind::Word => {
                    encode_word(token.bytes(input), table, escape, &mut bytes, &mut stats)
                }
            }
        }

        log::debug!(
            "encode partition {}: {} tokens, {} -> {} bytes",
            idx,
            slice.len(),
            span_bytes,
            bytes.len()
        );
        Ok(PartitionOutput { bytes, stats })
    })?;

    let (body, stats) = gather(parts)?;
    log_metric!(
        "event" = "encode_body",
        "workers" = workers,
        "tokens" = tokens.len(),
        "input_bytes" = input.len(),
        "body_bytes" = body.len(),
        "substituted" = stats.substituted,
        "escaped" = stats.escaped,
    );
    Ok((body, stats))
}

/// Reverses [`encode_body`].
///
/// `table` must be a `Decompress`-direction table built from the same two line
/// lists, and `escape` must be the byte the body was encoded with.
pub fn decode_body(
    body: &[u8],
    table: &DictionaryTable,
    delimiters: DelimiterSet,
    escape: u8,
    workers: usize,
) -> Result<(Vec<u8>, SubstitutionStats), LexisubError> {
    check_preconditions(table, LookupDirection::Decompress, workers)?;

    let partitions = plan_byte_partitions(body, &delimiters, workers);

    let parts = run_partitions(&partitions, |idx, range| {
        let slice = &body[range];
        let mut bytes = reserve_output(idx, slice.len() * DECODE_CAPACITY_FACTOR)?;
        let mut stats = SubstitutionStats::default();

        for token in Tokenizer::new(slice, delimiters) {
            match token.kind {
                TokenKind::Delimiter => {
                    bytes.push(slice[token.start]);
                    stats.delimiters += 1;
                }
                TokenKind::Word => {
                    decode_span(token.bytes(slice), table, escape, &mut bytes, &mut stats)
                }
            }
        }

        log::debug!(
            "decode partition {}: {} -> {} bytes",
            idx,
            slice.len(),
            bytes.len()
        );
        Ok(PartitionOutput { bytes, stats })
    })?;

    let (output, stats) = gather(parts)?;
    log_metric!(
        "event" = "decode_body",
        "workers" = workers,
        "body_bytes" = body.len(),
        "output_bytes" = output.len(),
        "substituted" = stats.substituted,
        "escaped" = stats.escaped,
    );
    Ok((output, stats))
}
