use log::{debug, info};

use std::collections::BTreeMap;

use crate::config::*;

// Raw sums for one county bucket, before the turnout is derived.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
struct Tally {
    registered: u64,
    voted: u64,
}

impl Tally {
    // Sums saturate at u64::MAX.
    fn add(&mut self, registered: u64, voted: u64) {
        self.registered = self.registered.saturating_add(registered);
        self.voted = self.voted.saturating_add(voted);
    }
}

/// Filters the records with the selection and sums them per county.
///
/// The result is built from scratch on every call. Records of other
/// elections, records rejected by a facet and records without a county are
/// ignored. An election with no record gives an empty summary.
pub fn aggregate(records: &[TurnoutRecord], selection: &FilterSelection) -> TurnoutSummary {
    let mut tallies: BTreeMap<String, Tally> = BTreeMap::new();
    let mut in_election: usize = 0;
    let mut rejected: usize = 0;
    let mut no_county: usize = 0;

    for r in records.iter() {
        if r.election_date != selection.election {
            continue;
        }
        in_election += 1;
        if !selection.accepts_facets(r) {
            rejected += 1;
            continue;
        }
        if r.county.is_empty() {
            no_county += 1;
            continue;
        }
        // Records are normalized already, this only covers hand-built ones.
        let key = r.county.to_uppercase();
        tallies.entry(key).or_default().add(r.registered, r.voted);
    }
    debug!(
        "aggregate: {} records in election {}, {} rejected by filters, {} without county",
        in_election, selection.election, rejected, no_county
    );

    let mut statewide = Tally::default();
    let counties: BTreeMap<String, CountyAggregate> = tallies
        .into_iter()
        .map(|(county, t)| {
            statewide.add(t.registered, t.voted);
            (county, CountyAggregate::from_counts(t.registered, t.voted))
        })
        .collect();
    let statewide = CountyAggregate::from_counts(statewide.registered, statewide.voted);

    info!(
        "aggregate: {:?}: {} counties, statewide {} / {}",
        selection,
        counties.len(),
        statewide.voted,
        statewide.registered
    );
    TurnoutSummary {
        counties,
        statewide,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn record(county: &str, party: &str, sex: &str, registered: u64, voted: u64) -> TurnoutRecord {
        TurnoutRecord {
            election_date: "2025-11-04".to_string(),
            county: county.to_string(),
            party: party.to_string(),
            race: "W".to_string(),
            ethnicity: "NL".to_string(),
            sex: sex.to_string(),
            age_group: "Age 41 - 65".to_string(),
            registered,
            voted,
        }
    }

    fn wake() -> Vec<TurnoutRecord> {
        vec![
            record("WAKE", "DEM", "F", 100, 60),
            record("WAKE", "REP", "M", 100, 40),
        ]
    }

    fn dem() -> FilterValue {
        FilterValue::Exact("DEM".to_string())
    }

    #[test]
    fn test_all_parties() {
        init();
        let res = aggregate(&wake(), &FilterSelection::for_election("2025-11-04"));
        assert_eq!(
            res.counties.get("WAKE"),
            Some(&CountyAggregate {
                registered: 200,
                voted: 100,
                turnout: Some(0.5)
            })
        );
        assert_eq!(res.statewide, res.counties["WAKE"]);
    }

    #[test]
    fn test_party_filter() {
        init();
        let sel = FilterSelection::for_election("2025-11-04").with(Facet::Party, dem());
        let res = aggregate(&wake(), &sel);
        assert_eq!(
            res.counties.get("WAKE"),
            Some(&CountyAggregate {
                registered: 100,
                voted: 60,
                turnout: Some(0.6)
            })
        );
    }

    #[test]
    fn test_unknown_election_is_empty() {
        init();
        let res = aggregate(&wake(), &FilterSelection::for_election("2030-01-01"));
        assert!(res.counties.is_empty());
        assert_eq!(res.statewide, CountyAggregate::from_counts(0, 0));
        assert_eq!(res.statewide.turnout, None);
    }

    #[test]
    fn test_zero_registered_has_no_turnout() {
        init();
        let records = vec![record("ORANGE", "DEM", "F", 0, 0), record("WAKE", "DEM", "F", 10, 5)];
        let res = aggregate(&records, &FilterSelection::for_election("2025-11-04"));
        assert_eq!(res.counties["ORANGE"].turnout, None);
        assert_eq!(res.counties["ORANGE"].registered, 0);
        assert_eq!(res.statewide.registered, 10);
        assert_eq!(res.statewide.turnout, Some(0.5));
    }

    #[test]
    fn test_over_registered_is_clamped_for_turnout_only() {
        init();
        let records = vec![record("WAKE", "DEM", "F", 10, 15)];
        let res = aggregate(&records, &FilterSelection::for_election("2025-11-04"));
        let w = res.counties["WAKE"];
        assert_eq!(w.turnout, Some(1.0));
        assert_eq!(w.voted, 15);
        assert_eq!(w.registered, 10);
        assert_eq!(res.statewide.turnout, Some(1.0));
        assert_eq!(res.statewide.voted, 15);
    }

    #[test]
    fn test_empty_county_is_dropped_and_keys_uppercased() {
        init();
        let records = vec![
            record("", "DEM", "F", 50, 50),
            record("Wake", "DEM", "F", 10, 5),
            record("WAKE", "DEM", "F", 10, 5),
        ];
        let res = aggregate(&records, &FilterSelection::for_election("2025-11-04"));
        assert_eq!(res.counties.len(), 1);
        assert_eq!(res.counties["WAKE"].registered, 20);
        assert_eq!(res.statewide.registered, 20);
    }

    #[test]
    fn test_statewide_sums_counties() {
        init();
        let records = vec![
            record("WAKE", "DEM", "F", 100, 60),
            record("DURHAM", "DEM", "F", 50, 10),
            record("ORANGE", "REP", "M", 30, 30),
        ];
        let res = aggregate(&records, &FilterSelection::for_election("2025-11-04"));
        assert_eq!(res.statewide.registered, 180);
        assert_eq!(res.statewide.voted, 100);
        assert_eq!(res.statewide.turnout, Some(100.0 / 180.0));
        for agg in res.counties.values() {
            let t = agg.turnout.unwrap();
            assert!((0.0..=1.0).contains(&t));
        }
    }

    #[test]
    fn test_filters_are_conjunctive() {
        init();
        let records = vec![
            record("WAKE", "DEM", "F", 100, 60),
            record("WAKE", "DEM", "M", 100, 20),
            record("DURHAM", "REP", "F", 40, 10),
        ];
        let base = FilterSelection::for_election("2025-11-04").with(Facet::Party, dem());
        let res = aggregate(&records, &base);
        assert_eq!(res.counties["WAKE"].registered, 200);
        // No DEM record in DURHAM: changing the sex filter cannot make it appear.
        assert!(!res.counties.contains_key("DURHAM"));

        let female = base.with(Facet::Sex, FilterValue::Exact("F".to_string()));
        let res = aggregate(&records, &female);
        assert_eq!(res.counties["WAKE"].voted, 60);
        assert!(!res.counties.contains_key("DURHAM"));
    }

    #[test]
    fn test_unspecified_code_is_matched_exactly() {
        init();
        let records = vec![record("WAKE", "", "F", 10, 2), record("WAKE", "DEM", "F", 10, 8)];
        let sel = FilterSelection::for_election("2025-11-04")
            .with(Facet::Party, FilterValue::Exact(String::new()));
        let res = aggregate(&records, &sel);
        assert_eq!(res.counties["WAKE"].voted, 2);
    }

    #[test]
    fn test_huge_counts_saturate() {
        init();
        let records = vec![
            record("WAKE", "DEM", "F", u64::MAX, u64::MAX),
            record("WAKE", "REP", "M", 1, 1),
            record("DURHAM", "DEM", "F", 10, 5),
        ];
        let res = aggregate(&records, &FilterSelection::for_election("2025-11-04"));
        assert_eq!(
            res.counties["WAKE"],
            CountyAggregate {
                registered: u64::MAX,
                voted: u64::MAX,
                turnout: Some(1.0)
            }
        );
        assert_eq!(res.counties["DURHAM"].turnout, Some(0.5));
        assert_eq!(res.statewide.registered, u64::MAX);
        assert_eq!(res.statewide.voted, u64::MAX);
    }

    #[test]
    fn test_other_election_with_matching_facets() {
        init();
        let mut old = record("WAKE", "DEM", "F", 50, 50);
        old.election_date = "2024-11-05".to_string();
        let mut records = wake();
        records.push(old);
        let sel = FilterSelection::for_election("2025-11-04").with(Facet::Party, dem());
        let res = aggregate(&records, &sel);
        assert_eq!(res.counties["WAKE"].registered, 100);
        assert_eq!(res.counties["WAKE"].voted, 60);
    }
}
