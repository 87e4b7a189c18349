/*!
Aggregation and color scaling of county-level voter turnout.

The crate turns the rows of a turnout table (one row per county, election and
combination of demographic codes) into what a choropleth map needs for one
filter selection: the registered and voted counts of every county, a
statewide rollup, and a color for each county taken from a percentile-scaled
ramp.

Everything is synchronous and free of side effects. A [`Dataset`] is an
immutable snapshot; every call to [`Dataset::render`] builds a new
[`ChoroplethView`], which the caller can simply drop when the selection
changes again.

See the [manual] for the format of the input table and the command line
program.
*/

pub mod aggregate;
pub mod builder;
mod config;
pub mod facets;
pub mod legend;
pub mod manual;
pub mod normalize;
pub mod ramp;
pub mod scale;

use log::info;

use std::collections::BTreeMap;

pub use crate::config::*;
pub use crate::legend::{format_turnout, tooltip_text, Legend};
pub use crate::normalize::RawRow;
pub use crate::ramp::{ColorRamp, Rgb, NO_DATA_COLOR};
pub use crate::scale::ColorScale;

/// All the normalized records of a session.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TurnoutRecord>,
}

impl Dataset {
    pub fn from_rows(rows: &[RawRow]) -> Dataset {
        Dataset {
            records: normalize::normalize_rows(rows),
        }
    }

    pub(crate) fn from_records(records: Vec<TurnoutRecord>) -> Dataset {
        Dataset { records }
    }

    pub fn records(&self) -> &[TurnoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The elections of the dataset, oldest first.
    pub fn elections(&self) -> Vec<String> {
        facets::election_dates(&self.records)
    }

    pub fn latest_election(&self) -> Option<String> {
        self.elections().pop()
    }

    /// The choices to offer for a facet, `All` first.
    pub fn facet_options(&self, election: &str, facet: Facet) -> Vec<FilterValue> {
        facets::facet_values(&self.records, election, facet)
    }

    pub fn aggregate(&self, selection: &FilterSelection) -> TurnoutSummary {
        aggregate::aggregate(&self.records, selection)
    }

    /// Runs the whole pipeline for one selection with the default ramp.
    pub fn render(&self, selection: &FilterSelection, rules: &ScaleRules) -> ChoroplethView {
        info!(
            "Rendering {} records for selection {:?}",
            self.records.len(),
            selection
        );
        ChoroplethView::new(self.aggregate(selection), rules, ColorRamp::reds())
    }
}

/// Everything the renderer needs for one filter selection.
#[derive(PartialEq, Debug, Clone)]
pub struct ChoroplethView {
    summary: TurnoutSummary,
    scale: ColorScale,
    ramp: ColorRamp,
}

impl ChoroplethView {
    pub fn new(summary: TurnoutSummary, rules: &ScaleRules, ramp: ColorRamp) -> ChoroplethView {
        let scale =
            ColorScale::from_turnouts(summary.counties.values().map(|c| c.turnout), rules);
        info!(
            "Color scale for {} counties: {} - {}",
            summary.counties.len(),
            format_turnout(Some(scale.low_bound)),
            format_turnout(Some(scale.high_bound))
        );
        ChoroplethView {
            summary,
            scale,
            ramp,
        }
    }

    pub fn counties(&self) -> &BTreeMap<String, CountyAggregate> {
        &self.summary.counties
    }

    /// Case-insensitive lookup of a county.
    pub fn county(&self, name: &str) -> Option<&CountyAggregate> {
        self.summary.counties.get(&name.trim().to_uppercase())
    }

    pub fn statewide(&self) -> &CountyAggregate {
        &self.summary.statewide
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    /// The color of a county turnout, as `#rrggbb`.
    pub fn color_for(&self, turnout: Option<f64>) -> String {
        self.ramp.color_at(self.scale.normalize(turnout)).to_string()
    }

    /// Counties absent from the aggregation get the "no data" color.
    pub fn color_for_county(&self, name: &str) -> String {
        self.color_for(self.county(name).and_then(|c| c.turnout))
    }

    pub fn tooltip(&self, name: &str) -> String {
        tooltip_text(&name.trim().to_uppercase(), self.county(name))
    }

    pub fn legend(&self) -> Legend {
        Legend::new(&self.scale, &self.ramp)
    }
}
