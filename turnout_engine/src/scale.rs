use log::debug;

use crate::config::ScaleRules;

/// Maps turnout values to [0, 1] for coloring.
///
/// The bounds are in turnout units. They are the percentile window of the
/// county turnouts, so that a single extreme county does not wash out the
/// contrast of all the others.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ColorScale {
    pub low_bound: f64,
    pub high_bound: f64,
}

impl ColorScale {
    pub const IDENTITY: ColorScale = ColorScale {
        low_bound: 0.0,
        high_bound: 1.0,
    };

    /// Builds the scale from the turnout of every county. Missing values are
    /// skipped.
    pub fn from_turnouts<I>(turnouts: I, rules: &ScaleRules) -> ColorScale
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut values: Vec<f64> = turnouts
            .into_iter()
            .flatten()
            .filter(|t| !t.is_nan())
            .collect();
        if values.len() < rules.min_samples.max(1) {
            debug!(
                "from_turnouts: only {} values, using identity scale",
                values.len()
            );
            return ColorScale::IDENTITY;
        }
        values.sort_by(f64::total_cmp);

        let last = values.len() - 1;
        let rank = |p: f64| ((p * last as f64).floor() as usize).min(last);
        let (low, high) = (
            values[rank(rules.low_percentile)],
            values[rank(rules.high_percentile)],
        );
        // Inverted percentiles still give an ordered window.
        let res = ColorScale {
            low_bound: low.min(high),
            high_bound: low.max(high),
        };
        debug!("from_turnouts: {} values, scale {:?}", values.len(), res);
        res
    }

    /// Normalized position of a turnout value, `None` meaning no data.
    pub fn normalize(&self, turnout: Option<f64>) -> Option<f64> {
        let t = turnout?;
        let low = self.low_bound.min(self.high_bound);
        let high = self.low_bound.max(self.high_bound);
        if high == low {
            return Some(0.5);
        }
        let t = t.max(low).min(high);
        Some((t - low) / (high - low))
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        ColorScale::IDENTITY
    }
}
