use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span};

use billmatch_ingest::{read_csv_frame, write_results_csv};
use billmatch_map::{
    PartitionKey, ScoreBreakdown, SinglePartition, ZipPrefix, match_partition, plan_partitions,
};
use billmatch_model::{
    BatchSummary, EmptyCandidatePolicy, MatchOptions, Record, records_from_frame,
    results_to_frame, with_name_address,
};

use crate::cli::{EmptyCandidatesArg, MatchArgs, ScoreArgs};
use crate::logging::redact_value;
use crate::types::{MatchRun, ScoreReport};

/// Default results file name, written next to the incoming file.
pub const DEFAULT_OUTPUT_NAME: &str = "matches.csv";

pub fn run_match(args: &MatchArgs) -> Result<MatchRun> {
    let span = info_span!("match", incoming = %args.incoming.display());
    let _guard = span.enter();
    let started = Instant::now();

    let database = load_records(&args.database, args.derive_name_address)
        .with_context(|| format!("load database {}", args.database.display()))?;
    let incoming = load_records(&args.incoming, args.derive_name_address)
        .with_context(|| format!("load incoming bills {}", args.incoming.display()))?;
    info!(
        database_rows = database.len(),
        incoming_rows = incoming.len(),
        "loaded inputs"
    );

    let options = match_options(args);
    let key: Box<dyn PartitionKey> = if args.no_partition {
        Box::new(SinglePartition)
    } else {
        Box::new(ZipPrefix::new(usize::from(args.partition_digits)))
    };
    let partitions = plan_partitions(&database, &incoming, key.as_ref());
    info!(partitions = partitions.len(), "planned partitions");

    let progress = partition_progress(partitions.len())?;
    let mut results = Vec::with_capacity(incoming.len());
    let mut summaries = Vec::with_capacity(partitions.len());
    for partition in &partitions {
        progress.set_message(partition.key.clone());
        let (partition_results, summary) = match_partition(partition, &options)
            .with_context(|| format!("match partition '{}'", partition.key))?;
        for result in partition_results.iter().filter(|r| !r.is_matched()) {
            debug!(
                partition = %partition.key,
                bill = redact_value(&result.bill.name_address),
                "bill left unmatched"
            );
        }
        results.extend(partition_results);
        summaries.push(summary);
        progress.inc(1);
    }
    progress.finish_and_clear();

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.incoming));
    let frame = results_to_frame(&results).context("build results table")?;
    write_results_csv(&output, &frame)
        .with_context(|| format!("write results {}", output.display()))?;

    let summary = BatchSummary::from_results(&results);
    info!(
        matched = summary.matched,
        unmatched = summary.unmatched,
        elapsed_ms = started.elapsed().as_millis(),
        output = %output.display(),
        "matching complete"
    );
    Ok(MatchRun {
        database: args.database.clone(),
        incoming: args.incoming.clone(),
        output,
        partitions: summaries,
        summary,
    })
}

pub fn run_score(args: &ScoreArgs) -> ScoreReport {
    ScoreReport {
        left: args.left.clone(),
        right: args.right.clone(),
        scores: ScoreBreakdown::compute(&args.left, &args.right),
    }
}

pub fn match_options(args: &MatchArgs) -> MatchOptions {
    let policy = match args.on_empty_candidates {
        EmptyCandidatesArg::Unmatched => EmptyCandidatePolicy::MarkUnmatched,
        EmptyCandidatesArg::Fail => EmptyCandidatePolicy::Fail,
    };
    MatchOptions::default()
        .with_token_reduction(!args.no_token_reduction)
        .with_empty_candidates(policy)
}

pub fn default_output_path(incoming: &Path) -> PathBuf {
    incoming.with_file_name(DEFAULT_OUTPUT_NAME)
}

fn load_records(path: &Path, derive_name_address: bool) -> Result<Vec<Record>> {
    let mut frame = read_csv_frame(path)?;
    if derive_name_address {
        frame = with_name_address(&frame)?;
    }
    Ok(records_from_frame(&frame)?)
}

fn partition_progress(len: usize) -> Result<ProgressBar> {
    let style = ProgressStyle::with_template(
        "  [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} partitions {msg}",
    )
    .context("progress bar template")?;
    Ok(ProgressBar::new(len as u64).with_style(style))
}
