//! Scoped fan-out/fan-in over planned partitions.
//!
//! One thread is spawned per partition inside `std::thread::scope`, so workers
//! can borrow the dictionary and the input without reference counting. Every
//! handle is joined before the scope closes; results come back indexed by
//! partition, never by completion order.

use std::ops::Range;

use crate::error::LexisubError;
use crate::pipeline::SubstitutionStats;

/// What one worker hands back to the gather phase.
#[derive(Debug, Default)]
pub(crate) struct PartitionOutput {
    pub bytes: Vec<u8>,
    pub stats: SubstitutionStats,
}

/// Runs `worker` once per partition and returns the results in partition order.
///
/// The first failure in partition order is returned; a panicking worker is
/// reported as [`LexisubError::WorkerPanicked`]. Either way, all other results
/// are discarded.
pub(crate) fn run_partitions<T, F>(
    partitions: &[Range<usize>],
    worker: F,
) -> Result<Vec<T>, LexisubError>
where
    T: Send,
    F: Fn(usize, Range<usize>) -> Result<T, LexisubError> + Sync,
{
    if partitions.len() <= 1 {
        return partitions
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, range)| worker(idx, range))
            .collect();
    }

    let worker = &worker;
    let joined: Vec<std::thread::Result<Result<T, LexisubError>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = partitions
            .iter()
            .cloned()
            .enumerate()
            .map(|(idx, range)| scope.spawn(move || worker(idx, range)))
            .collect();

        // Join every handle, even after a failure, so the scope never has to
        // re-raise a worker panic.
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    joined
        .into_iter()
        .enumerate()
        .map(|(idx, outcome)| {
            outcome
                .map_err(|_| LexisubError::WorkerPanicked(idx))
                .and_then(|result| result)
        })
        .collect()
}

/// Allocates a worker's private output buffer, surfacing allocation failure
/// as an error instead of aborting.
pub(crate) fn reserve_output(partition: usize, requested: usize) -> Result<Vec<u8>, LexisubError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(requested)
        .map_err(|_| LexisubError::Allocation {
            partition,
            requested,
        })?;
    Ok(buf)
}

/// Concatenates partition outputs in ascending partition index.
pub(crate) fn gather(
    parts: Vec<PartitionOutput>,
) -> Result<(Vec<u8>, SubstitutionStats), LexisubError> {
    let total: usize = parts.iter().map(|part| part.bytes.len()).sum();
    let mut output = reserve_output(0, total)?;
    let mut stats = SubstitutionStats::default();

    for part in parts {
        output.extend_from_slice(&part.bytes);
        stats.merge(&part.stats);
    }
    Ok((output, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_follow_partition_order() {
        let partitions = vec![0..3, 3..5, 5..9, 9..9];
        let results = run_partitions(&partitions, |idx, range| {
            // Make early partitions finish last.
            std::thread::sleep(std::time::Duration::from_millis((4 - idx as u64) * 5));
            Ok((idx, range.len()))
        })
        .unwrap();
        assert_eq!(results, vec![(0, 3), (1, 2), (2, 4), (3, 0)]);
    }

    #[test]
    fn test_first_error_in_partition_order_wins() {
        let partitions = vec![0..1, 1..2, 2..3];
        let result: Result<Vec<()>, _> = run_partitions(&partitions, |idx, _| {
            if idx == 0 {
                std::thread::sleep(std::time::Duration::from_millis(20));
            }
            if idx >= 1 {
                Err(LexisubError::Allocation {
                    partition: idx,
                    requested: 1,
                })
            } else {
                Ok(())
            }
        });
        assert!(matches!(
            result,
            Err(LexisubError::Allocation { partition: 1, .. })
        ));
    }

    #[test]
    fn test_worker_panic_becomes_error() {
        let partitions = vec![0..1, 1..2];
        let result: Result<Vec<()>, _> = run_partitions(&partitions, |idx, _| {
            if idx == 1 {
                panic!("worker failure");
            }
            Ok(())
        });
        assert!(matches!(result, Err(LexisubError::WorkerPanicked(1))));
    }

    #[test]
    fn test_single_partition_runs_inline() {
        let results = run_partitions(&[0..4], |_, range| Ok(range.len())).unwrap();
        assert_eq!(results, vec![4]);
    }

    #[test]
    fn test_gather_concatenates_and_merges() {
        let parts = vec![
            PartitionOutput {
                bytes: b"A cat ".to_vec(),
                stats: SubstitutionStats {
                    substituted: 1,
                    passed_through: 1,
                    delimiters: 2,
                    ..Default::default()
                },
            },
            PartitionOutput {
                bytes: b"B here".to_vec(),
                stats: SubstitutionStats {
                    substituted: 1,
                    passed_through: 1,
                    delimiters: 1,
                    ..Default::default()
                },
            },
        ];
        let (bytes, stats) = gather(parts).unwrap();
        assert_eq!(bytes, b"A cat B here");
        assert_eq!(stats.substituted, 2);
        assert_eq!(stats.delimiters, 3);
        assert_eq!(stats.words(), 4);
    }
}
