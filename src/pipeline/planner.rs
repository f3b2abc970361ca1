//! Partition planning for the parallel engine.
//!
//! Encoding partitions the token sequence by index, so token boundaries are
//! respected for free. Decoding has no token list up front and partitions the
//! body by byte offset; each split point is then moved to the nearest span
//! boundary so that no worker starts or stops inside a symbol.

use std::ops::Range;

use crate::kernels::tokenizer::DelimiterSet;

/// `workers` contiguous ranges over `0..token_count`.
///
/// Partition `i` covers `[i * ceil(T/N), (i + 1) * ceil(T/N))`, clipped to `T`.
/// Trailing partitions may be empty when there are fewer tokens than workers.
pub(crate) fn plan_token_partitions(token_count: usize, workers: usize) -> Vec<Range<usize>> {
    let chunk = token_count.div_ceil(workers.max(1));
    (0..workers)
        .map(|i| {
            let start = (i * chunk).min(token_count);
            let end = ((i + 1) * chunk).min(token_count);
            start..end
        })
        .collect()
}

/// `workers` contiguous byte ranges over `body`, each starting and ending on a
/// span boundary. The ranges cover the body exactly once.
pub(crate) fn plan_byte_partitions(
    body: &[u8],
    delimiters: &DelimiterSet,
    workers: usize,
) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let len = body.len();
    let chunk = len.div_ceil(workers);

    let mut bounds = Vec::with_capacity(workers + 1);
    bounds.push(0);
    for i in 1..workers {
        let floor = bounds[i - 1];
        let approx = (i * chunk).clamp(floor, len);
        bounds.push(align_to_boundary(body, delimiters, approx, floor));
    }
    bounds.push(len);

    bounds.windows(2).map(|w| w[0]..w[1]).collect()
}

/// A split at `pos` is safe unless it falls between two non-delimiter bytes.
#[inline]
fn is_span_boundary(body: &[u8], delimiters: &DelimiterSet, pos: usize) -> bool {
    if pos == 0 || pos >= body.len() {
        return true;
    }
    delimiters.contains(body[pos - 1]) || delimiters.contains(body[pos])
}

/// Moves `approx` to the nearest span boundary in `floor..=body.len()`.
///
/// The backward scan stops at `floor` (itself a boundary) and the forward scan
/// at the end of the body, so a boundary is always found. Ties go backward.
/// A span longer than the partition size therefore never gets cut; its
/// neighbouring partitions come out empty instead.
fn align_to_boundary(body: &[u8], delimiters: &DelimiterSet, approx: usize, floor: usize) -> usize {
    if is_span_boundary(body, delimiters, approx) {
        return approx;
    }

    let backward = (floor..approx)
        .rev()
        .find(|&pos| is_span_boundary(body, delimiters, pos))
        .unwrap_or(floor);
    let forward = (approx + 1..=body.len())
        .find(|&pos| is_span_boundary(body, delimiters, pos))
        .unwrap_or(body.len());

    if approx - backward <= forward - approx {
        backward
    } else {
        forward
    }
}
