//! Customer and bill records.
//!
//! Reference (database) records and query (incoming) records share one shape,
//! so both are represented by [`Record`]. A record's identity is its position
//! in the slice it was loaded into; nothing in the matcher reorders records.

use serde::{Deserialize, Serialize};

/// One row of a database or incoming table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub state: String,
    /// Concatenated name and address, the field the matcher compares.
    pub name_address: String,
}

impl Record {
    /// Creates a record with an explicit `name_address` value.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        state: impl Into<String>,
        name_address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            zip: zip.into(),
            state: state.into(),
            name_address: name_address.into(),
        }
    }

    /// Creates a record whose `name_address` is derived from name and address.
    pub fn derived(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let address = address.into();
        let name_address = join_name_address(&name, &address);
        Self {
            name,
            address,
            city: city.into(),
            zip: zip.into(),
            state: state.into(),
            name_address,
        }
    }
}

/// Joins name and address with a single space, skipping empty parts.
pub fn join_name_address(name: &str, address: &str) -> String {
    match (name.is_empty(), address.is_empty()) {
        (true, _) => address.to_string(),
        (_, true) => name.to_string(),
        _ => format!("{name} {address}"),
    }
}
