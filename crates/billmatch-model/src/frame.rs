//! Conversion between Polars tables and typed records.
//!
//! Input tables must carry the six [`REQUIRED_COLUMNS`] as string columns.
//! Null cells are read as empty strings so the scorer and the token counter
//! always see the same text.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};

use crate::columns::{
    ADDRESS, ADDRESS_SCORE, BILL_ADDRESS, BILL_CITY, BILL_NAME, BILL_STATE, BILL_ZIP, CITY,
    MATCH_ADDRESS, MATCH_CITY, MATCH_NAME, MATCH_STATE, MATCH_ZIP, NAME, NAME_ADDRESS, NAME_SCORE,
    OVERALL_MATCH_SCORE, REQUIRED_COLUMNS, STATE, ZIP,
};
use crate::error::{MatchError, Result};
use crate::record::{Record, join_name_address};
use crate::result::{MatchResult, MatchScores};

/// Reads every row of `df` into a [`Record`], preserving row order.
///
/// # Errors
///
/// Returns [`MatchError::MissingColumn`] for the first required column that is
/// absent, or [`MatchError::TypeMismatch`] if a required column is not text.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<Record>> {
    // Report the first missing column in declaration order before any type checks.
    for column in REQUIRED_COLUMNS {
        if df.column(column).is_err() {
            return Err(MatchError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let names = string_values(df, NAME)?;
    let addresses = string_values(df, ADDRESS)?;
    let cities = string_values(df, CITY)?;
    let zips = string_values(df, ZIP)?;
    let states = string_values(df, STATE)?;
    let name_addresses = string_values(df, NAME_ADDRESS)?;

    let records = names
        .into_iter()
        .zip(addresses)
        .zip(cities)
        .zip(zips)
        .zip(states)
        .zip(name_addresses)
        .map(
            |(((((name, address), city), zip), state), name_address)| Record {
                name,
                address,
                city,
                zip,
                state,
                name_address,
            },
        )
        .collect();
    Ok(records)
}

/// Builds an input-shaped table from records.
pub fn records_to_frame(records: &[Record]) -> Result<DataFrame> {
    let columns = vec![
        record_column(records, NAME, |r| r.name.as_str()),
        record_column(records, ADDRESS, |r| r.address.as_str()),
        record_column(records, CITY, |r| r.city.as_str()),
        record_column(records, ZIP, |r| r.zip.as_str()),
        record_column(records, STATE, |r| r.state.as_str()),
        record_column(records, NAME_ADDRESS, |r| r.name_address.as_str()),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Builds the 13-column result table.
///
/// Unmatched rows carry nulls in the match and score columns. An empty slice
/// yields a zero-row table that still has every output column.
pub fn results_to_frame(results: &[MatchResult]) -> Result<DataFrame> {
    let bills: Vec<&Record> = results.iter().map(|r| &r.bill).collect();
    let columns = vec![
        bill_column(&bills, BILL_NAME, |r| r.name.as_str()),
        bill_column(&bills, BILL_ADDRESS, |r| r.address.as_str()),
        bill_column(&bills, BILL_CITY, |r| r.city.as_str()),
        bill_column(&bills, BILL_ZIP, |r| r.zip.as_str()),
        bill_column(&bills, BILL_STATE, |r| r.state.as_str()),
        match_column(results, MATCH_NAME, |r| r.name.as_str()),
        match_column(results, MATCH_ADDRESS, |r| r.address.as_str()),
        match_column(results, MATCH_CITY, |r| r.city.as_str()),
        match_column(results, MATCH_ZIP, |r| r.zip.as_str()),
        match_column(results, MATCH_STATE, |r| r.state.as_str()),
        score_column(results, OVERALL_MATCH_SCORE, |s| s.overall),
        score_column(results, ADDRESS_SCORE, |s| s.address),
        score_column(results, NAME_SCORE, |s| s.name),
    ];
    Ok(DataFrame::new(columns)?)
}

/// Returns a copy of `df` with a `Name_Address` column derived from name and
/// address. Tables that already have the column are returned unchanged.
pub fn with_name_address(df: &DataFrame) -> Result<DataFrame> {
    if df.column(NAME_ADDRESS).is_ok() {
        return Ok(df.clone());
    }
    let names = string_values(df, NAME)?;
    let addresses = string_values(df, ADDRESS)?;
    let joined: Vec<String> = names
        .iter()
        .zip(&addresses)
        .map(|(name, address)| join_name_address(name, address))
        .collect();
    let mut out = df.clone();
    out.with_column(Series::new(NAME_ADDRESS.into(), joined))?;
    Ok(out)
}

fn string_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let values = df.column(column).map_err(|_| MatchError::MissingColumn {
        column: column.to_string(),
    })?;
    match values.dtype() {
        DataType::String => Ok(values
            .str()?
            .into_iter()
            .map(|value| value.unwrap_or_default().to_string())
            .collect()),
        // A column of only nulls carries no type.
        DataType::Null => Ok(vec![String::new(); values.len()]),
        other => Err(MatchError::TypeMismatch {
            column: column.to_string(),
            dtype: other.to_string(),
        }),
    }
}

fn record_column(records: &[Record], name: &str, field: fn(&Record) -> &str) -> Column {
    let values: Vec<&str> = records.iter().map(field).collect();
    Series::new(name.into(), values).into_column()
}

fn bill_column(bills: &[&Record], name: &str, field: fn(&Record) -> &str) -> Column {
    let values: Vec<&str> = bills.iter().map(|record| field(record)).collect();
    Series::new(name.into(), values).into_column()
}

fn match_column(results: &[MatchResult], name: &str, field: fn(&Record) -> &str) -> Column {
    let values: Vec<Option<&str>> = results
        .iter()
        .map(|result| result.matched_record().map(field))
        .collect();
    Series::new(name.into(), values).into_column()
}

fn score_column(results: &[MatchResult], name: &str, field: fn(&MatchScores) -> u8) -> Column {
    let values: Vec<Option<u32>> = results
        .iter()
        .map(|result| result.scores().map(|scores| u32::from(field(&scores))))
        .collect();
    Series::new(name.into(), values).into_column()
}
