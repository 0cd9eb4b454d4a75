use anyhow::{Context, Result};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{MatchRun, ScoreReport};

pub fn print_match_summary(run: &MatchRun) {
    println!("Database: {}", run.database.display());
    println!("Incoming: {}", run.incoming.display());
    println!("Output: {}", run.output.display());
    println!("{}", partition_table(run));
    if let Some(mean) = run.summary.mean_overall {
        println!(
            "Overall score: mean {mean:.1}, min {}, max {}",
            run.summary.min_overall.unwrap_or_default(),
            run.summary.max_overall.unwrap_or_default()
        );
    }
}

/// One row per partition followed by a totals row.
pub fn partition_table(run: &MatchRun) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Partition"),
        header_cell("Database"),
        header_cell("Incoming"),
        header_cell("Matched"),
        header_cell("Unmatched"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_database = 0usize;
    for partition in &run.partitions {
        total_database += partition.database_rows;
        let key_cell = if partition.key.is_empty() {
            dim_cell("(all)")
        } else {
            Cell::new(&partition.key)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![
            key_cell,
            Cell::new(partition.database_rows),
            Cell::new(partition.batch_rows),
            Cell::new(partition.matched),
            count_cell(partition.unmatched, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_database).add_attribute(Attribute::Bold),
        Cell::new(run.summary.total).add_attribute(Attribute::Bold),
        Cell::new(run.summary.matched).add_attribute(Attribute::Bold),
        count_cell(run.summary.unmatched, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_score(report: &ScoreReport, json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(report).context("serialize scores")?;
        println!("{rendered}");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Score")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Ratio"), Cell::new(report.scores.ratio)]);
    table.add_row(vec![
        Cell::new("Partial ratio"),
        Cell::new(report.scores.partial_ratio),
    ]);
    table.add_row(vec![
        Cell::new("Token sort ratio"),
        Cell::new(report.scores.token_sort_ratio),
    ]);
    table.add_row(vec![
        Cell::new("Overall")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.scores.overall).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    Ok(())
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use billmatch_map::PartitionSummary;
    use billmatch_model::BatchSummary;

    use super::*;

    fn sample_run() -> MatchRun {
        MatchRun {
            database: PathBuf::from("db.csv"),
            incoming: PathBuf::from("bills.csv"),
            output: PathBuf::from("matches.csv"),
            partitions: vec![
                PartitionSummary {
                    key: "021".to_string(),
                    database_rows: 4,
                    batch_rows: 2,
                    matched: 2,
                    unmatched: 0,
                },
                PartitionSummary {
                    key: "895".to_string(),
                    database_rows: 0,
                    batch_rows: 1,
                    matched: 0,
                    unmatched: 1,
                },
            ],
            summary: BatchSummary {
                total: 3,
                matched: 2,
                unmatched: 1,
                mean_overall: Some(90.0),
                min_overall: Some(88),
                max_overall: Some(92),
            },
        }
    }

    #[test]
    fn partition_table_has_totals_row() {
        let table = partition_table(&sample_run());
        assert_eq!(table.row_count(), 3);
        let rendered = table.to_string();
        assert!(rendered.contains("TOTAL"));
        assert!(rendered.contains("021"));
        assert!(rendered.contains("895"));
    }
}
