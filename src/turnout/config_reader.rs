use crate::turnout::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "mapName")]
    pub map_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
}

/// The configuration part of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(rename = "mapName")]
    pub map_name: String,
    pub election: String,
    pub party: String,
    pub race: String,
    pub ethnicity: String,
    pub sex: String,
    #[serde(rename = "ageGroup")]
    pub age_group: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct GeometrySource {
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// The feature property holding the county name. Defaults to `County`.
    #[serde(rename = "countyProperty")]
    pub county_property: Option<String>,
}

/// Missing fields and the literal `All` leave a facet unfiltered.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSettings {
    pub election: Option<String>,
    pub party: Option<String>,
    pub race: Option<String>,
    pub ethnicity: Option<String>,
    pub sex: Option<String>,
    #[serde(rename = "ageGroup")]
    pub age_group: Option<String>,
}

impl FilterSettings {
    /// The command line values take precedence.
    pub fn merged_with(&self, args: &Args) -> FilterSettings {
        let pick = |a: &Option<String>, c: &Option<String>| a.clone().or_else(|| c.clone());
        FilterSettings {
            election: pick(&args.election, &self.election),
            party: pick(&args.party, &self.party),
            race: pick(&args.race, &self.race),
            ethnicity: pick(&args.ethnicity, &self.ethnicity),
            sex: pick(&args.sex, &self.sex),
            age_group: pick(&args.age_group, &self.age_group),
        }
    }

    pub fn value(&self, facet: Facet) -> FilterValue {
        let v = match facet {
            Facet::Party => &self.party,
            Facet::Race => &self.race,
            Facet::Ethnicity => &self.ethnicity,
            Facet::Sex => &self.sex,
            Facet::AgeGroup => &self.age_group,
        };
        read_filter_value(v)
    }
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaleSettings {
    #[serde(rename = "lowPercentile")]
    pub low_percentile: Option<f64>,
    #[serde(rename = "highPercentile")]
    pub high_percentile: Option<f64>,
    #[serde(rename = "minSamples")]
    pub min_samples: Option<usize>,
}

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "turnoutSource")]
    pub turnout_source: Option<FileSource>,
    #[serde(rename = "geometrySource")]
    pub geometry_source: Option<GeometrySource>,
    pub filter: Option<FilterSettings>,
    #[serde(rename = "colorScale")]
    pub color_scale: Option<ScaleSettings>,
}

pub fn read_config(path: &str) -> TurnoutResult<MapConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: MapConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> TurnoutResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })?;
    Ok(js)
}

pub fn read_filter_value(x: &Option<String>) -> FilterValue {
    match x.as_deref().map(|s| s.trim()) {
        None | Some("All") => FilterValue::All,
        Some(s) => FilterValue::Exact(s.to_string()),
    }
}

pub fn validate_scale(settings: &Option<ScaleSettings>) -> TurnoutResult<ScaleRules> {
    let defaults = ScaleRules::DEFAULT_RULES;
    let s = match settings {
        Some(s) => s,
        None => return Ok(defaults),
    };
    let res = ScaleRules {
        low_percentile: s.low_percentile.unwrap_or(defaults.low_percentile),
        high_percentile: s.high_percentile.unwrap_or(defaults.high_percentile),
        min_samples: s.min_samples.unwrap_or(defaults.min_samples),
    };
    let in_unit = |p: f64| (0.0..=1.0).contains(&p);
    if !in_unit(res.low_percentile) || !in_unit(res.high_percentile) {
        whatever!(
            "Percentiles must be between 0 and 1, got {} and {}",
            res.low_percentile,
            res.high_percentile
        )
    }
    if res.low_percentile > res.high_percentile {
        whatever!(
            "lowPercentile {} is above highPercentile {}",
            res.low_percentile,
            res.high_percentile
        )
    }
    if res.min_samples == 0 {
        whatever!("minSamples must be at least 1")
    }
    Ok(res)
}
