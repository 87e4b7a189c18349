// Reads the county names of a GeoJSON boundary file. The geometry itself is
// not looked at.

use std::collections::BTreeSet;
use std::path::Path;

use snafu::prelude::*;

use crate::turnout::*;

pub const DEFAULT_COUNTY_PROPERTY: &str = "County";

pub fn read_county_keys(path: &Path, county_property: &str) -> TurnoutResult<Vec<String>> {
    let path_s = path.display().to_string();
    info!("Attempting to read geometry file {:?}", path_s);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path: path_s.clone() })?;
    let js: JSValue =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path: path_s.clone() })?;
    county_keys(&js, county_property)
}

/// The upper-cased county names of the features, sorted and without
/// duplicates. Features without the property are skipped.
pub fn county_keys(js: &JSValue, county_property: &str) -> TurnoutResult<Vec<String>> {
    let features = match js.get("features").and_then(|f| f.as_array()) {
        Some(x) => x,
        None => whatever!("The geometry is not a GeoJSON feature collection"),
    };
    let mut keys: BTreeSet<String> = BTreeSet::new();
    for (idx, feature) in features.iter().enumerate() {
        match feature
            .get("properties")
            .and_then(|p| p.get(county_property))
            .and_then(|c| c.as_str())
        {
            Some(name) if !name.trim().is_empty() => {
                keys.insert(name.trim().to_uppercase());
            }
            _ => {
                warn!(
                    "Feature {} has no {:?} property, it will not be shown",
                    idx, county_property
                );
            }
        }
    }
    debug!("county_keys: {} counties", keys.len());
    Ok(keys.into_iter().collect())
}
