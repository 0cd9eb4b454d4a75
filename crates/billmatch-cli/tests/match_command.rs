//! Integration tests for the match and score commands.

use std::fs;
use std::path::Path;

use clap::Parser;

use billmatch_cli::cli::{Cli, Command, EmptyCandidatesArg};
use billmatch_cli::commands::{run_match, run_score};

const DATABASE: &str = "\
Name,Address,City,Zip,State
John Smith,123 Main St,Cambridge,02139,MA
Jane Doe,9 Elm Rd,Springfield,62701,IL
Acme Corp,1 Harbor Way,Boston,02110,MA
";

const INCOMING: &str = "\
Name,Address,City,Zip,State
Jon Smith,123 Main Street,Cambridge,02138,MA
Bob Stone,5 Pine Ave,Reno,89501,NV
";

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn parses_match_defaults() {
    let cli = parse(&["billmatch", "match", "db.csv", "bills.csv"]);
    let Command::Match(args) = cli.command else {
        panic!("expected match command");
    };
    assert_eq!(args.partition_digits, 3);
    assert!(!args.no_partition);
    assert!(!args.no_token_reduction);
    assert_eq!(args.on_empty_candidates, EmptyCandidatesArg::Unmatched);
    assert!(args.output.is_none());
}

#[test]
fn partition_flags_conflict() {
    let result = Cli::try_parse_from([
        "billmatch",
        "match",
        "db.csv",
        "bills.csv",
        "--partition-digits",
        "2",
        "--no-partition",
    ]);
    assert!(result.is_err());
}

#[test]
fn matches_csv_files_and_writes_results() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("database.csv");
    let incoming = dir.path().join("incoming.csv");
    write(&database, DATABASE);
    write(&incoming, INCOMING);

    let cli = parse(&[
        "billmatch",
        "match",
        database.to_str().unwrap(),
        incoming.to_str().unwrap(),
        "--derive-name-address",
    ]);
    let Command::Match(args) = cli.command else {
        panic!("expected match command");
    };
    let run = run_match(&args).unwrap();

    assert_eq!(run.output, dir.path().join("matches.csv"));
    assert_eq!(run.summary.total, 2);
    assert_eq!(run.summary.matched, 1);
    assert_eq!(run.summary.unmatched, 1);
    let keys: Vec<&str> = run.partitions.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["021", "895"]);
    assert_eq!(run.partitions[0].database_rows, 2);

    let written = fs::read_to_string(&run.output).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Bill Name,Bill Address,Bill City,Bill Zip,Bill State,\
         Match Name,Match Address,Match City,Match Zip,Match State,\
         Overall Match Score,Address Score,Name Score"
    );
    assert!(lines[1].starts_with("Jon Smith,123 Main Street,Cambridge,02138,MA,John Smith,"));
    assert_eq!(lines[2], "Bob Stone,5 Pine Ave,Reno,89501,NV,,,,,,,,");
}

#[test]
fn missing_name_address_column_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("database.csv");
    let incoming = dir.path().join("incoming.csv");
    write(&database, DATABASE);
    write(&incoming, INCOMING);

    let cli = parse(&[
        "billmatch",
        "match",
        database.to_str().unwrap(),
        incoming.to_str().unwrap(),
    ]);
    let Command::Match(args) = cli.command else {
        panic!("expected match command");
    };
    let error = run_match(&args).unwrap_err();

    let message = format!("{error:#}");
    assert!(message.contains("load database"), "{message}");
    assert!(message.contains("Name_Address"), "{message}");
}

#[test]
fn strict_policy_fails_on_orphan_partition() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("database.csv");
    let incoming = dir.path().join("incoming.csv");
    let output = dir.path().join("out.csv");
    write(&database, DATABASE);
    write(&incoming, INCOMING);

    let cli = parse(&[
        "billmatch",
        "match",
        database.to_str().unwrap(),
        incoming.to_str().unwrap(),
        "--derive-name-address",
        "--on-empty-candidates",
        "fail",
        "--output",
        output.to_str().unwrap(),
    ]);
    let Command::Match(args) = cli.command else {
        panic!("expected match command");
    };
    let error = run_match(&args).unwrap_err();

    assert!(format!("{error:#}").contains("895"));
    assert!(!output.exists());
}

#[test]
fn score_command_reports_all_components() {
    let cli = parse(&[
        "billmatch",
        "score",
        "John Smith 123 Main St",
        "Jon Smith 123 Main Street",
        "--json",
    ]);
    let Command::Score(args) = cli.command else {
        panic!("expected score command");
    };
    assert!(args.json);

    insta::assert_json_snapshot!(run_score(&args), @r#"
    {
      "left": "John Smith 123 Main St",
      "right": "Jon Smith 123 Main Street",
      "ratio": 89,
      "partial_ratio": 95,
      "token_sort_ratio": 89,
      "overall": 91
    }
    "#);
}
