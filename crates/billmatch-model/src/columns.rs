//! Column names shared by input and output tables.

/// Customer or bill name.
pub const NAME: &str = "Name";
/// Street address.
pub const ADDRESS: &str = "Address";
pub const CITY: &str = "City";
pub const ZIP: &str = "Zip";
pub const STATE: &str = "State";
/// Precomputed name and address text compared by the matcher.
pub const NAME_ADDRESS: &str = "Name_Address";

/// Columns every database and incoming table must carry.
pub const REQUIRED_COLUMNS: [&str; 6] = [NAME, ADDRESS, CITY, ZIP, STATE, NAME_ADDRESS];

pub const BILL_NAME: &str = "Bill Name";
pub const BILL_ADDRESS: &str = "Bill Address";
pub const BILL_CITY: &str = "Bill City";
pub const BILL_ZIP: &str = "Bill Zip";
pub const BILL_STATE: &str = "Bill State";
pub const MATCH_NAME: &str = "Match Name";
pub const MATCH_ADDRESS: &str = "Match Address";
pub const MATCH_CITY: &str = "Match City";
pub const MATCH_ZIP: &str = "Match Zip";
pub const MATCH_STATE: &str = "Match State";
pub const OVERALL_MATCH_SCORE: &str = "Overall Match Score";
pub const ADDRESS_SCORE: &str = "Address Score";
pub const NAME_SCORE: &str = "Name Score";

/// Result table columns, in output order.
pub const OUTPUT_COLUMNS: [&str; 13] = [
    BILL_NAME,
    BILL_ADDRESS,
    BILL_CITY,
    BILL_ZIP,
    BILL_STATE,
    MATCH_NAME,
    MATCH_ADDRESS,
    MATCH_CITY,
    MATCH_ZIP,
    MATCH_STATE,
    OVERALL_MATCH_SCORE,
    ADDRESS_SCORE,
    NAME_SCORE,
];
