use log::debug;

use std::collections::BTreeSet;

use crate::config::*;

/// The options offered for one facet in the given election.
///
/// The distinct non-empty codes, sorted by their raw bytes, preceded by
/// `FilterValue::All`. The options of one facet do not depend on what is
/// selected for the others.
pub fn facet_values(records: &[TurnoutRecord], election: &str, facet: Facet) -> Vec<FilterValue> {
    let codes: BTreeSet<&str> = records
        .iter()
        .filter(|r| r.election_date == election)
        .map(|r| facet.value_of(r))
        .filter(|c| !c.is_empty())
        .collect();
    debug!(
        "facet_values: election {} facet {:?}: {} codes",
        election,
        facet,
        codes.len()
    );

    let mut res = vec![FilterValue::All];
    res.extend(codes.into_iter().map(|c| FilterValue::Exact(c.to_string())));
    res
}

/// The elections present in the data, oldest first.
pub fn election_dates(records: &[TurnoutRecord]) -> Vec<String> {
    let dates: BTreeSet<&str> = records
        .iter()
        .map(|r| r.election_date.as_str())
        .filter(|d| !d.is_empty())
        .collect();
    dates.into_iter().map(|d| d.to_string()).collect()
}
