//! Command-line front end for bill matching.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
