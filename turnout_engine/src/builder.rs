pub use crate::config::*;
use crate::normalize::{normalize_record, RawRow};
use crate::Dataset;

/// A builder for assembling a dataset one row at a time.
///
/// ```
/// use turnout_engine::builder::Builder;
/// use turnout_engine::{FilterSelection, ScaleRules};
///
/// let mut builder = Builder::new();
/// builder.add_record_simple("2025-11-04", "Wake", 200, 100);
/// builder.add_record_simple("2025-11-04", "Durham", 0, 0);
///
/// let dataset = builder.build();
/// let view = dataset.render(
///     &FilterSelection::for_election("2025-11-04"),
///     &ScaleRules::DEFAULT_RULES,
/// );
/// assert_eq!(view.county("wake").and_then(|c| c.turnout), Some(0.5));
/// assert_eq!(view.tooltip("durham"), "DURHAM: No data");
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    pub(crate) _records: Vec<TurnoutRecord>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _records: Vec::new(),
        }
    }

    /// Adds a raw row, as read from the turnout table.
    pub fn add_row(&mut self, row: &RawRow) {
        self._records.push(normalize_record(row));
    }

    /// Adds the counts of a county with every demographic field unspecified.
    ///
    /// It is the simplest use case when the data is not broken down.
    pub fn add_record_simple(&mut self, election: &str, county: &str, registered: u64, voted: u64) {
        self.add_record(&TurnoutRecord {
            election_date: election.to_string(),
            county: county.to_string(),
            party: String::new(),
            race: String::new(),
            ethnicity: String::new(),
            sex: String::new(),
            age_group: String::new(),
            registered,
            voted,
        })
    }

    /// Adds an already typed record. The text fields are trimmed and the
    /// county is upper-cased, like for raw rows.
    pub fn add_record(&mut self, record: &TurnoutRecord) {
        let trim = |s: &String| s.trim().to_string();
        self._records.push(TurnoutRecord {
            election_date: trim(&record.election_date),
            county: record.county.trim().to_uppercase(),
            party: trim(&record.party),
            race: trim(&record.race),
            ethnicity: trim(&record.ethnicity),
            sex: trim(&record.sex),
            age_group: trim(&record.age_group),
            registered: record.registered,
            voted: record.voted,
        });
    }

    pub fn build(self) -> Dataset {
        Dataset::from_records(self._records)
    }
}
