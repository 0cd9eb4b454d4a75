//! Partitioned matching.
//!
//! Large databases are split by a key shared with the incoming batch (by
//! default the first three digits of the zip code) and each incoming record is
//! only compared with database rows in its own partition. Partitions run one
//! after another and their results are concatenated.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info_span};

use billmatch_model::{MatchOptions, MatchResult, Record, Result};

use crate::engine::MatchEngine;

/// Derives the partition a record belongs to.
pub trait PartitionKey {
    fn key(&self, record: &Record) -> String;
}

/// Partitions by the leading digits of the trimmed zip code.
///
/// Zips shorter than `digits` use their whole value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipPrefix {
    pub digits: usize,
}

impl ZipPrefix {
    pub fn new(digits: usize) -> Self {
        Self { digits }
    }
}

impl Default for ZipPrefix {
    fn default() -> Self {
        Self { digits: 3 }
    }
}

impl PartitionKey for ZipPrefix {
    fn key(&self, record: &Record) -> String {
        record.zip.trim().chars().take(self.digits).collect()
    }
}

/// Puts every record in one partition.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePartition;

impl PartitionKey for SinglePartition {
    fn key(&self, _record: &Record) -> String {
        String::new()
    }
}

/// Database and batch rows sharing one partition key.
#[derive(Debug, Clone)]
pub struct Partition {
    pub key: String,
    pub database: Vec<Record>,
    pub batch: Vec<Record>,
    /// Position of each `batch` record in the full incoming batch.
    pub rows: Vec<usize>,
}

/// Per-partition counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    pub key: String,
    pub database_rows: usize,
    pub batch_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
}

/// Results of a partitioned run.
#[derive(Debug, Clone, Default)]
pub struct PartitionedMatch {
    /// Results of all partitions, concatenated in partition order.
    pub results: Vec<MatchResult>,
    pub partitions: Vec<PartitionSummary>,
}

/// Groups database and batch records by `key`.
///
/// Only keys present in the batch produce partitions, ordered by their first
/// appearance in the batch. Batch rows keep their relative order within a
/// partition; a key with no database rows yields a partition with an empty
/// database.
pub fn plan_partitions(
    database: &[Record],
    batch: &[Record],
    key: &dyn PartitionKey,
) -> Vec<Partition> {
    let mut partitions: Vec<Partition> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (row, record) in batch.iter().enumerate() {
        let record_key = key.key(record);
        let slot = *index.entry(record_key.clone()).or_insert_with(|| {
            partitions.push(Partition {
                key: record_key,
                database: Vec::new(),
                batch: Vec::new(),
                rows: Vec::new(),
            });
            partitions.len() - 1
        });
        partitions[slot].batch.push(record.clone());
        partitions[slot].rows.push(row);
    }
    for record in database {
        if let Some(&slot) = index.get(&key.key(record)) {
            partitions[slot].database.push(record.clone());
        }
    }
    partitions
}

/// Matches one partition.
///
/// # Errors
///
/// [`MatchError::EmptyCandidateSet`](billmatch_model::MatchError::EmptyCandidateSet)
/// reports the row's position in the full incoming batch.
pub fn match_partition(
    partition: &Partition,
    options: &MatchOptions,
) -> Result<(Vec<MatchResult>, PartitionSummary)> {
    let span = info_span!("partition", key = %partition.key);
    let _guard = span.enter();
    let engine = MatchEngine::new(&partition.database, options.clone());
    let results = engine.match_rows(partition.rows.iter().copied().zip(&partition.batch))?;
    let matched = results.iter().filter(|r| r.is_matched()).count();
    let summary = PartitionSummary {
        key: partition.key.clone(),
        database_rows: partition.database.len(),
        batch_rows: partition.batch.len(),
        matched,
        unmatched: results.len() - matched,
    };
    debug!(
        database_rows = summary.database_rows,
        batch_rows = summary.batch_rows,
        matched = summary.matched,
        unmatched = summary.unmatched,
        "partition matched"
    );
    Ok((results, summary))
}

/// Partitions both tables by `key`, matches each partition and concatenates
/// the results.
///
/// # Errors
///
/// Stops at the first partition that fails; no partial results are returned.
pub fn match_partitioned(
    database: &[Record],
    batch: &[Record],
    options: &MatchOptions,
    key: &dyn PartitionKey,
) -> Result<PartitionedMatch> {
    let mut output = PartitionedMatch::default();
    for partition in plan_partitions(database, batch, key) {
        let (results, summary) = match_partition(&partition, options)?;
        output.results.extend(results);
        output.partitions.push(summary);
    }
    Ok(output)
}
