//! CSV ingestion and export.
//!
//! Input tables are read with every column as text so identifiers such as zip
//! codes survive unchanged. Result tables are written back with nulls as empty
//! fields.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use billmatch_ingest::{read_csv_frame, write_results_csv};
//!
//! let database = read_csv_frame(Path::new("database.csv"))?;
//! write_results_csv(Path::new("matches.csv"), &results)?;
//! ```

mod error;
mod table;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading and Writing ===
pub use table::{read_csv_frame, validate_encoding, write_results_csv};

// === Value Rendering ===
pub use values::any_to_string;
