//! Data model for name/address record linkage.
//!
//! Records, match results, options, and the conversions between Polars
//! tables and typed records used at the edges of the matcher.

pub mod columns;
pub mod error;
pub mod frame;
pub mod options;
pub mod record;
pub mod result;

pub use error::{MatchError, Result};
pub use frame::{records_from_frame, records_to_frame, results_to_frame, with_name_address};
pub use options::{EmptyCandidatePolicy, MatchOptions};
pub use record::{Record, join_name_address};
pub use result::{BatchSummary, MatchOutcome, MatchResult, MatchScores};
