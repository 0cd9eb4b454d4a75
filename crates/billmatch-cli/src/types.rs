use std::path::PathBuf;

use serde::Serialize;

use billmatch_map::{PartitionSummary, ScoreBreakdown};
use billmatch_model::BatchSummary;

#[derive(Debug)]
pub struct MatchRun {
    pub database: PathBuf,
    pub incoming: PathBuf,
    pub output: PathBuf,
    pub partitions: Vec<PartitionSummary>,
    pub summary: BatchSummary,
}

#[derive(Debug, Serialize)]
pub struct ScoreReport {
    pub left: String,
    pub right: String,
    #[serde(flatten)]
    pub scores: ScoreBreakdown,
}
