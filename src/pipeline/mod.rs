// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Parallel Substitution Engine
// ====================================================================================
//
// One engine serves both directions. A call fans out over a fixed number of
// scoped worker threads and fans back in before it returns:
//
//   1. [Planner]      -> splits the work into contiguous, non-overlapping partitions
//                        (token indices when encoding, span-aligned byte ranges
//                        when decoding).
//   2. [Executor]     -> spawns one worker per partition. Each worker reads the
//                        shared, immutable dictionary and writes only into its own
//                        buffer. All workers are joined; the first failure in
//                        partition order wins.
//   3. [Gather]       -> concatenates the buffers in ascending partition index.
//
// Because partitions never split a token and are gathered in order, the output
// is byte-identical for any worker count and any completion order.
//
// ====================================================================================

use serde::Serialize;

pub(crate) mod executor;
pub mod orchestrator;
pub(crate) mod planner;
pub(crate) mod substitute;

pub use orchestrator::{decode_body, encode_body};

/// What the substitution rules did, summed over all partitions.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionStats {
    /// Words replaced by their dictionary counterpart.
    pub substituted: usize,
    /// Words that carried (encode) or lost (decode) the escape marker.
    pub escaped: usize,
    /// Words copied unchanged.
    pub passed_through: usize,
    /// Delimiter bytes copied verbatim.
    pub delimiters: usize,
}

impl SubstitutionStats {
    pub fn merge(&mut self, other: &SubstitutionStats) {
        self.substituted += other.substituted;
        self.escaped += other.escaped;
        self.passed_through += other.passed_through;
        self.delimiters += other.delimiters;
    }

    /// Total number of word spans seen.
    pub fn words(&self) -> usize {
        self.substituted + self.escaped + self.passed_through
    }
}
