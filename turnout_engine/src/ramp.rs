use std::fmt::Display;

/// A 24-bit color, displayed as `#rrggbb`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Rgb> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Color of the counties without data.
pub const NO_DATA_COLOR: Rgb = Rgb {
    r: 0xcc,
    g: 0xcc,
    b: 0xcc,
};

#[derive(PartialEq, Debug, Clone, Copy)]
struct ColorStop {
    position: f64,
    color: Rgb,
}

/// A piecewise-linear ramp between fixed stops, light to dark.
///
/// Invariant: at least two stops, in increasing position.
#[derive(PartialEq, Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

const REDS: [(f64, &str); 5] = [
    (0.0, "#fee5d9"),
    (0.5, "#fcae91"),
    (0.6, "#fb6a4a"),
    (0.7, "#de2d26"),
    (1.0, "#a50f15"),
];

impl ColorRamp {
    /// The sequential reds used for the turnout map.
    pub fn reds() -> ColorRamp {
        ColorRamp {
            stops: REDS
                .iter()
                .filter_map(|(position, hex)| {
                    Rgb::from_hex(hex).map(|color| ColorStop {
                        position: *position,
                        color,
                    })
                })
                .collect(),
        }
    }

    /// The color of a normalized value, `None` giving the "no data" color.
    pub fn color_at(&self, value: Option<f64>) -> Rgb {
        let value = match value {
            Some(v) if v.is_finite() => v,
            _ => return NO_DATA_COLOR,
        };
        let (lo, hi) = self.bracket(value);
        let t = (value - lo.position) / (hi.position - lo.position);
        let mix = |a: u8, b: u8| {
            let c = a as f64 + (b as f64 - a as f64) * t;
            c.round().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(lo.color.r, hi.color.r),
            g: mix(lo.color.g, hi.color.g),
            b: mix(lo.color.b, hi.color.b),
        }
    }

    // First pair containing the value. Values outside the ramp use the
    // first or the last pair.
    fn bracket(&self, value: f64) -> (&ColorStop, &ColorStop) {
        let n = self.stops.len();
        for w in self.stops.windows(2) {
            if value >= w[0].position && value <= w[1].position {
                return (&w[0], &w[1]);
            }
        }
        if value < self.stops[0].position {
            (&self.stops[0], &self.stops[1])
        } else {
            (&self.stops[n - 2], &self.stops[n - 1])
        }
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        ColorRamp::reds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(ramp: &ColorRamp, v: f64) -> String {
        ramp.color_at(Some(v)).to_string()
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(Rgb::from_hex("#fb6a4a"), Some(Rgb { r: 251, g: 106, b: 74 }));
        assert_eq!(Rgb::from_hex("0a0b0c").map(|c| c.to_string()), Some("#0a0b0c".to_string()));
        assert_eq!(Rgb::from_hex("#fb6a4"), None);
        assert_eq!(Rgb::from_hex("#gg0000"), None);
        assert_eq!(NO_DATA_COLOR.to_string(), "#cccccc");
    }

    #[test]
    fn test_stops_are_exact() {
        let ramp = ColorRamp::reds();
        assert_eq!(hex(&ramp, 0.0), "#fee5d9");
        assert_eq!(hex(&ramp, 0.5), "#fcae91");
        assert_eq!(hex(&ramp, 0.6), "#fb6a4a");
        assert_eq!(hex(&ramp, 0.7), "#de2d26");
        assert_eq!(hex(&ramp, 1.0), "#a50f15");
    }

    #[test]
    fn test_no_data() {
        let ramp = ColorRamp::reds();
        assert_eq!(ramp.color_at(None), NO_DATA_COLOR);
        assert_eq!(ramp.color_at(Some(f64::NAN)), NO_DATA_COLOR);
        assert_eq!(ramp.color_at(Some(f64::INFINITY)), NO_DATA_COLOR);
        assert_eq!(ramp.color_at(Some(f64::NEG_INFINITY)), NO_DATA_COLOR);
    }

    #[test]
    fn test_interpolation_midpoint() {
        let ramp = ColorRamp::reds();
        // Halfway between #fee5d9 and #fcae91
        let c = ramp.color_at(Some(0.25));
        assert_eq!(c.r, 253);
        assert_eq!(c.g, ((0xe5 as f64 + 0xae as f64) / 2.0).round() as u8);
        assert_eq!(c.b, ((0xd9 as f64 + 0x91 as f64) / 2.0).round() as u8);
    }

    #[test]
    fn test_darkens_monotonically() {
        let ramp = ColorRamp::reds();
        let mut prev = ramp.color_at(Some(0.0));
        for i in 1..=100 {
            let c = ramp.color_at(Some(i as f64 / 100.0));
            assert!(c.r <= prev.r && c.g <= prev.g && c.b <= prev.b, "at {}", i);
            prev = c;
        }
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let ramp = ColorRamp::reds();
        let below = ramp.color_at(Some(-1.0));
        assert!(below.r >= 0xfe && below.g >= 0xe5);
        let above = ramp.color_at(Some(2.0));
        assert!(above.r <= 0xa5 && above.g == 0);
    }

    #[test]
    fn test_reds_has_five_stops() {
        let ramp = ColorRamp::reds();
        assert_eq!(ramp.stops.len(), 5);
        assert_eq!(ramp.stops[4].color, Rgb { r: 0xa5, g: 0x0f, b: 0x15 });
    }
}
