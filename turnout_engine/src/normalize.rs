use std::collections::HashMap;

use crate::config::TurnoutRecord;

/// A row of the turnout table as delivered by the tabular reader:
/// column name to raw cell content.
pub type RawRow = HashMap<String, String>;

pub const ELECTION_DATE_COL: &str = "election_date";
pub const COUNTY_COL: &str = "county_desc";
pub const PARTY_COL: &str = "party_cd";
pub const RACE_COL: &str = "race_code";
pub const ETHNICITY_COL: &str = "ethnic_code";
pub const SEX_COL: &str = "sex_code";
pub const AGE_GROUP_COL: &str = "age_group";
pub const REGISTERED_COL: &str = "registered_count";
pub const VOTED_COL: &str = "voted_count";

/// The columns read by `normalize_record`.
pub const EXPECTED_COLUMNS: [&str; 9] = [
    ELECTION_DATE_COL,
    COUNTY_COL,
    PARTY_COL,
    RACE_COL,
    ETHNICITY_COL,
    SEX_COL,
    AGE_GROUP_COL,
    REGISTERED_COL,
    VOTED_COL,
];

fn text_field(row: &RawRow, col: &str) -> String {
    row.get(col).map(|s| s.trim().to_string()).unwrap_or_default()
}

// Anything that is not a plain non-negative integer reads as zero.
fn count_field(row: &RawRow, col: &str) -> u64 {
    row.get(col)
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Turns a raw row into a typed record.
///
/// This never fails: missing columns become empty (unspecified) values and
/// unparsable counts become 0. The county is upper-cased.
pub fn normalize_record(row: &RawRow) -> TurnoutRecord {
    TurnoutRecord {
        election_date: text_field(row, ELECTION_DATE_COL),
        county: text_field(row, COUNTY_COL).to_uppercase(),
        party: text_field(row, PARTY_COL),
        race: text_field(row, RACE_COL),
        ethnicity: text_field(row, ETHNICITY_COL),
        sex: text_field(row, SEX_COL),
        age_group: text_field(row, AGE_GROUP_COL),
        registered: count_field(row, REGISTERED_COL),
        voted: count_field(row, VOTED_COL),
    }
}

pub fn normalize_rows(rows: &[RawRow]) -> Vec<TurnoutRecord> {
    rows.iter().map(normalize_record).collect()
}
