// Text shown in the tooltips and the legend of the map.

use crate::config::CountyAggregate;
use crate::ramp::{ColorRamp, Rgb, NO_DATA_COLOR};
use crate::scale::ColorScale;

pub const NO_DATA_TEXT: &str = "No data";

/// A turnout as a percentage with one decimal, or "No data".
pub fn format_turnout(turnout: Option<f64>) -> String {
    match turnout {
        Some(t) => format!("{:.1}%", t * 100.0),
        None => NO_DATA_TEXT.to_string(),
    }
}

/// Tooltip of a county. The counts are the raw ones, even when the turnout
/// had to be clamped.
pub fn tooltip_text(county: &str, aggregate: Option<&CountyAggregate>) -> String {
    match aggregate {
        Some(agg) if agg.turnout.is_some() => format!(
            "{}: {} ({} / {})",
            county,
            format_turnout(agg.turnout),
            agg.voted,
            agg.registered
        ),
        _ => format!("{}: {}", county, NO_DATA_TEXT),
    }
}

/// The two ends of the legend, plus the "no data" swatch.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Legend {
    pub low_label: String,
    pub high_label: String,
    pub low_color: Rgb,
    pub high_color: Rgb,
    pub no_data_color: Rgb,
}

impl Legend {
    pub fn new(scale: &ColorScale, ramp: &ColorRamp) -> Legend {
        Legend {
            low_label: format_turnout(Some(scale.low_bound)),
            high_label: format_turnout(Some(scale.high_bound)),
            low_color: ramp.color_at(Some(0.0)),
            high_color: ramp.color_at(Some(1.0)),
            no_data_color: NO_DATA_COLOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_turnout() {
        assert_eq!(format_turnout(None), "No data");
        assert_eq!(format_turnout(Some(0.5)), "50.0%");
        assert_eq!(format_turnout(Some(0.6234)), "62.3%");
        assert_eq!(format_turnout(Some(0.0)), "0.0%");
        assert_eq!(format_turnout(Some(1.0)), "100.0%");
    }

    #[test]
    fn test_tooltip() {
        let agg = CountyAggregate::from_counts(200, 100);
        assert_eq!(tooltip_text("WAKE", Some(&agg)), "WAKE: 50.0% (100 / 200)");
        let over = CountyAggregate::from_counts(10, 12);
        assert_eq!(tooltip_text("WAKE", Some(&over)), "WAKE: 100.0% (12 / 10)");
        let empty = CountyAggregate::from_counts(0, 0);
        assert_eq!(tooltip_text("ORANGE", Some(&empty)), "ORANGE: No data");
        assert_eq!(tooltip_text("ORANGE", None), "ORANGE: No data");
    }

    #[test]
    fn test_legend_identity() {
        let legend = Legend::new(&ColorScale::IDENTITY, &ColorRamp::reds());
        assert_eq!(legend.low_label, "0.0%");
        assert_eq!(legend.high_label, "100.0%");
        assert_eq!(legend.low_color.to_string(), "#fee5d9");
        assert_eq!(legend.high_color.to_string(), "#a50f15");
        assert_eq!(legend.no_data_color, NO_DATA_COLOR);
    }
}
