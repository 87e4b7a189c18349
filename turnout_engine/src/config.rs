// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::fmt::Display;

/// One row of the turnout table once it has been normalized.
///
/// The county name is stored upper-cased; it is the key used everywhere
/// downstream. Empty categorical fields mean "unspecified".
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct TurnoutRecord {
    pub election_date: String,
    pub county: String,
    pub party: String,
    pub race: String,
    pub ethnicity: String,
    pub sex: String,
    pub age_group: String,
    pub registered: u64,
    /// May exceed `registered` in the raw data.
    pub voted: u64,
}

/// The demographic dimensions a map can be filtered on.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Facet {
    Party,
    Race,
    Ethnicity,
    Sex,
    AgeGroup,
}

impl Facet {
    pub const ALL_FACETS: [Facet; 5] = [
        Facet::Party,
        Facet::Race,
        Facet::Ethnicity,
        Facet::Sex,
        Facet::AgeGroup,
    ];

    /// The column of the turnout table holding this dimension.
    pub fn column(&self) -> &'static str {
        match self {
            Facet::Party => "party_cd",
            Facet::Race => "race_code",
            Facet::Ethnicity => "ethnic_code",
            Facet::Sex => "sex_code",
            Facet::AgeGroup => "age_group",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Facet::Party => "party",
            Facet::Race => "race",
            Facet::Ethnicity => "ethnicity",
            Facet::Sex => "sex",
            Facet::AgeGroup => "ageGroup",
        }
    }

    pub fn value_of<'a>(&self, record: &'a TurnoutRecord) -> &'a str {
        match self {
            Facet::Party => &record.party,
            Facet::Race => &record.race,
            Facet::Ethnicity => &record.ethnicity,
            Facet::Sex => &record.sex,
            Facet::AgeGroup => &record.age_group,
        }
    }
}

/// The value selected for one facet.
///
/// `All` is kept out of the code domain, so a data code can never be
/// mistaken for the unfiltered choice.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum FilterValue {
    All,
    Exact(String),
}

impl FilterValue {
    pub fn matches(&self, code: &str) -> bool {
        match self {
            FilterValue::All => true,
            FilterValue::Exact(c) => c == code,
        }
    }
}

impl Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::All => write!(f, "All"),
            FilterValue::Exact(c) => write!(f, "{}", c),
        }
    }
}

/// The active filter: one election and a value for each facet.
///
/// A new selection is created for every user interaction.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct FilterSelection {
    pub election: String,
    pub party: FilterValue,
    pub race: FilterValue,
    pub ethnicity: FilterValue,
    pub sex: FilterValue,
    pub age_group: FilterValue,
}

impl FilterSelection {
    /// All the facets unfiltered for the given election.
    pub fn for_election(election: &str) -> FilterSelection {
        FilterSelection {
            election: election.to_string(),
            party: FilterValue::All,
            race: FilterValue::All,
            ethnicity: FilterValue::All,
            sex: FilterValue::All,
            age_group: FilterValue::All,
        }
    }

    /// Returns a copy of this selection with one facet replaced.
    pub fn with(self, facet: Facet, value: FilterValue) -> FilterSelection {
        let mut res = self;
        match facet {
            Facet::Party => res.party = value,
            Facet::Race => res.race = value,
            Facet::Ethnicity => res.ethnicity = value,
            Facet::Sex => res.sex = value,
            Facet::AgeGroup => res.age_group = value,
        }
        res
    }

    pub fn value(&self, facet: Facet) -> &FilterValue {
        match facet {
            Facet::Party => &self.party,
            Facet::Race => &self.race,
            Facet::Ethnicity => &self.ethnicity,
            Facet::Sex => &self.sex,
            Facet::AgeGroup => &self.age_group,
        }
    }

    /// True if the record belongs to the election and passes every facet.
    pub fn accepts(&self, record: &TurnoutRecord) -> bool {
        record.election_date == self.election && self.accepts_facets(record)
    }

    /// Checks the five facets only, whatever the election of the record.
    pub fn accepts_facets(&self, record: &TurnoutRecord) -> bool {
        Facet::ALL_FACETS
            .iter()
            .all(|f| self.value(*f).matches(f.value_of(record)))
    }
}

// ******** Output data structures *********

/// Registered and voted counts for one county (or the whole state).
///
/// `turnout` is `None` exactly when `registered` is zero. It is clamped to
/// [0, 1], while the counts are reported as found in the data.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct CountyAggregate {
    pub registered: u64,
    pub voted: u64,
    pub turnout: Option<f64>,
}

impl CountyAggregate {
    pub fn from_counts(registered: u64, voted: u64) -> CountyAggregate {
        let turnout = if registered == 0 {
            None
        } else {
            Some((voted as f64 / registered as f64).clamp(0.0, 1.0))
        };
        CountyAggregate {
            registered,
            voted,
            turnout,
        }
    }
}

/// The result of one aggregation: a bucket per county and the statewide rollup.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct TurnoutSummary {
    pub counties: BTreeMap<String, CountyAggregate>,
    pub statewide: CountyAggregate,
}

// ********* Configuration **********

/// Parameters of the percentile window used to build the color scale.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScaleRules {
    pub low_percentile: f64,
    pub high_percentile: f64,
    /// Below this number of counties with data, the identity scale is used.
    pub min_samples: usize,
}

impl ScaleRules {
    pub const DEFAULT_RULES: ScaleRules = ScaleRules {
        low_percentile: 0.05,
        high_percentile: 0.95,
        min_samples: 5,
    };
}

impl Default for ScaleRules {
    fn default() -> Self {
        ScaleRules::DEFAULT_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(party: &str, sex: &str) -> TurnoutRecord {
        TurnoutRecord {
            election_date: "2025-11-04".to_string(),
            county: "WAKE".to_string(),
            party: party.to_string(),
            race: "W".to_string(),
            ethnicity: "NL".to_string(),
            sex: sex.to_string(),
            age_group: "Age 26 - 40".to_string(),
            registered: 10,
            voted: 5,
        }
    }

    #[test]
    fn test_from_counts_zero_registered() {
        let agg = CountyAggregate::from_counts(0, 0);
        assert_eq!(agg.turnout, None);
        let agg = CountyAggregate::from_counts(0, 12);
        assert_eq!(agg.turnout, None);
        assert_eq!(agg.voted, 12);
    }

    #[test]
    fn test_from_counts_clamps_but_keeps_counts() {
        let agg = CountyAggregate::from_counts(100, 130);
        assert_eq!(agg.turnout, Some(1.0));
        assert_eq!(agg.registered, 100);
        assert_eq!(agg.voted, 130);
    }

    #[test]
    fn test_selection_accepts() {
        let sel = FilterSelection::for_election("2025-11-04");
        assert!(sel.accepts(&record("DEM", "F")));

        let sel = sel.with(Facet::Party, FilterValue::Exact("DEM".to_string()));
        assert!(sel.accepts(&record("DEM", "F")));
        assert!(!sel.accepts(&record("REP", "F")));
        assert!(!sel.accepts(&record("", "F")));

        let sel = sel.with(Facet::Sex, FilterValue::Exact("M".to_string()));
        assert!(!sel.accepts(&record("DEM", "F")));
        assert!(sel.accepts(&record("DEM", "M")));

        let other = FilterSelection::for_election("2024-11-05");
        assert!(!other.accepts(&record("DEM", "F")));
        assert!(other.accepts_facets(&record("DEM", "F")));
        let other = other.with(Facet::Party, FilterValue::Exact("REP".to_string()));
        assert!(!other.accepts_facets(&record("DEM", "F")));
    }

    #[test]
    fn test_exact_all_is_not_unfiltered() {
        let v = FilterValue::Exact("All".to_string());
        assert!(!v.matches("DEM"));
        assert!(FilterValue::All.matches("DEM"));
        assert_eq!(FilterValue::All.to_string(), "All");
        assert_eq!(v.to_string(), "All");
        assert_ne!(v, FilterValue::All);
    }
}
