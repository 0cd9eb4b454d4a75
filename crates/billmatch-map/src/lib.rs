//! Fuzzy name/address matching.
//!
//! Every incoming record is compared with a reference database: token overlap
//! narrows the candidates, an ensemble of edit-distance scores ranks them, and
//! the first best-scoring candidate wins.

pub mod block;
pub mod engine;
pub mod frame;
pub mod partition;
pub mod score;
pub mod select;
pub mod tokens;

pub use block::{Candidate, all_candidates, block, overlap_counts};
pub use engine::{MatchEngine, match_batch};
pub use frame::match_frames;
pub use partition::{
    Partition, PartitionKey, PartitionSummary, PartitionedMatch, SinglePartition, ZipPrefix,
    match_partition, match_partitioned, plan_partitions,
};
pub use score::{
    ScoreBreakdown, ensemble, full_process, partial_ratio, ratio, score, sorted_tokens,
    token_sort_ratio,
};
pub use select::{Selection, score_candidates, select};
pub use tokens::{overlap, token_set};
