//! Time-of-day gradient palette policy
//!
//! The footer shifts its gradient through four fixed palettes over the
//! day. The mapping is a pure function of the wall-clock hour so it can
//! be re-sampled every frame and transitions happen live across band
//! boundaries without a restart.

use serde::{Deserialize, Serialize};

/// A four-color gradient palette plus a light/dark flag.
///
/// Components are linear RGB in `[0, 1]`. `is_dark` selects which logo
/// asset suits the gradient. Note: every band currently ships a dark
/// palette, so the light-logo branch is unreachable under this policy;
/// it is kept (and tested) rather than removed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Four gradient stops, in blend order
    pub colors: [[f32; 3]; 4],
    /// Whether the gradient reads as dark (drives logo asset choice)
    pub is_dark: bool,
}

impl Palette {
    /// Render the four stops as CSS `rgb(r, g, b)` strings.
    ///
    /// Components are floored from `[0,1]` into `[0,255]`, matching how
    /// the CSS fallback gradient is assembled.
    pub fn css_colors(&self) -> [String; 4] {
        let css = |c: [f32; 3]| {
            format!(
                "rgb({}, {}, {})",
                (c[0] * 255.0).floor() as u8,
                (c[1] * 255.0).floor() as u8,
                (c[2] * 255.0).floor() as u8
            )
        };
        [
            css(self.colors[0]),
            css(self.colors[1]),
            css(self.colors[2]),
            css(self.colors[3]),
        ]
    }
}

/// The four fixed time-of-day bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBand {
    /// [6, 12)
    Morning,
    /// [12, 18)
    Afternoon,
    /// [18, 22)
    Evening,
    /// [22, 24) and [0, 6); also the catch-all for out-of-range input
    Night,
}

impl TimeBand {
    /// Classify an hour of day into a band.
    ///
    /// Bands partition the day with no gaps or overlaps; anything that
    /// is not morning, afternoon or evening (including out-of-range
    /// values) falls into night.
    pub fn from_hour(hour: u32) -> Self {
        if (6..12).contains(&hour) {
            TimeBand::Morning
        } else if (12..18).contains(&hour) {
            TimeBand::Afternoon
        } else if (18..22).contains(&hour) {
            TimeBand::Evening
        } else {
            TimeBand::Night
        }
    }

    /// The fixed palette for this band.
    pub fn palette(&self) -> Palette {
        match self {
            // Morning: gentle awakening
            TimeBand::Morning => Palette {
                colors: [
                    [0.15, 0.25, 0.45],
                    [0.25, 0.35, 0.55],
                    [0.35, 0.45, 0.65],
                    [0.45, 0.55, 0.75],
                ],
                is_dark: true,
            },
            // Afternoon: confident blues
            TimeBand::Afternoon => Palette {
                colors: [
                    [0.2, 0.3, 0.5],
                    [0.3, 0.4, 0.6],
                    [0.25, 0.35, 0.55],
                    [0.35, 0.45, 0.65],
                ],
                is_dark: true,
            },
            // Evening: warm purples
            TimeBand::Evening => Palette {
                colors: [
                    [0.25, 0.15, 0.4],
                    [0.35, 0.25, 0.5],
                    [0.2, 0.25, 0.45],
                    [0.3, 0.35, 0.55],
                ],
                is_dark: true,
            },
            // Night: deep purple-blue
            TimeBand::Night => Palette {
                colors: [
                    [0.2, 0.1, 0.35],
                    [0.15, 0.2, 0.4],
                    [0.25, 0.15, 0.4],
                    [0.2, 0.25, 0.45],
                ],
                is_dark: true,
            },
        }
    }
}

/// Map an hour of day to its gradient palette.
///
/// Pure and stateless: identical input always yields identical output,
/// and it is cheap enough to call once per frame.
pub fn palette_for_hour(hour: u32) -> Palette {
    TimeBand::from_hour(hour).palette()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(TimeBand::from_hour(5), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(6), TimeBand::Morning);
        assert_eq!(TimeBand::from_hour(11), TimeBand::Morning);
        assert_eq!(TimeBand::from_hour(12), TimeBand::Afternoon);
        assert_eq!(TimeBand::from_hour(17), TimeBand::Afternoon);
        assert_eq!(TimeBand::from_hour(18), TimeBand::Evening);
        assert_eq!(TimeBand::from_hour(21), TimeBand::Evening);
        assert_eq!(TimeBand::from_hour(22), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(23), TimeBand::Night);
        assert_eq!(TimeBand::from_hour(0), TimeBand::Night);
    }

    #[test]
    fn test_every_hour_maps_to_one_of_four_palettes() {
        let known: Vec<Palette> = [
            TimeBand::Morning,
            TimeBand::Afternoon,
            TimeBand::Evening,
            TimeBand::Night,
        ]
        .iter()
        .map(|b| b.palette())
        .collect();

        for h in 0..24 {
            let p = palette_for_hour(h);
            assert!(
                known.contains(&p),
                "hour {} produced an unknown palette",
                h
            );
        }
    }

    #[test]
    fn test_out_of_range_hours_fall_into_night() {
        assert_eq!(palette_for_hour(24), TimeBand::Night.palette());
        assert_eq!(palette_for_hour(99), TimeBand::Night.palette());
    }

    #[test]
    fn test_palette_is_deterministic() {
        for h in 0..24 {
            let first = palette_for_hour(h);
            for _ in 0..1000 {
                assert_eq!(palette_for_hour(h), first);
            }
        }
    }

    #[test]
    fn test_all_bands_are_dark() {
        // Documented policy: the light branch is currently unreachable.
        for h in 0..24 {
            assert!(palette_for_hour(h).is_dark);
        }
    }

    #[test]
    fn test_css_colors() {
        let p = Palette {
            colors: [
                [0.0, 0.5, 1.0],
                [0.2, 0.2, 0.2],
                [1.0, 0.0, 0.0],
                [0.999, 0.999, 0.999],
            ],
            is_dark: true,
        };
        let css = p.css_colors();
        assert_eq!(css[0], "rgb(0, 127, 255)");
        assert_eq!(css[1], "rgb(51, 51, 51)");
        assert_eq!(css[2], "rgb(255, 0, 0)");
        // 0.999 * 255 floors to 254
        assert_eq!(css[3], "rgb(254, 254, 254)");
    }

    #[test]
    fn test_palette_serde_roundtrip() {
        let p = palette_for_hour(14);
        let json = serde_json::to_string(&p).unwrap();
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
