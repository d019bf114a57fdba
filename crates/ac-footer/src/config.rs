//! Footer construction options
//!
//! The only public configuration surface of the widget. Options arrive
//! as a JSON object from the host page; missing fields take defaults and
//! unrecognized fields are ignored, so malformed configuration degrades
//! silently instead of failing construction.

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// Read-only options supplied at construction time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterConfig {
    /// CSS height applied to the footer container
    pub height: String,
    /// CSS size for the companion logo image
    pub logo_size: String,
    /// Effect intensity multiplier. Accepted and stored; the current
    /// shader contract does not consume it.
    pub intensity: f32,
    /// Animation speed multiplier. Accepted and stored; the frame step
    /// stays the fixed logical 0.016 regardless.
    pub speed: f32,
    /// Palette override; when set it replaces the time-of-day palette
    /// at every sampling site
    pub custom_colors: Option<Palette>,
    /// Id of the container element; `None` means the default lookup of
    /// the `.ac-creations-footer` element
    pub container_id: Option<String>,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            height: "200px".to_string(),
            logo_size: "300px".to_string(),
            intensity: 1.0,
            speed: 1.0,
            custom_colors: None,
            container_id: None,
        }
    }
}

impl FooterConfig {
    /// Parse options from a JSON object string.
    ///
    /// Never fails: unparseable input yields the defaults, matching the
    /// "no validation beyond type coercion" contract.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::palette_for_hour;

    #[test]
    fn test_defaults() {
        let c = FooterConfig::default();
        assert_eq!(c.height, "200px");
        assert_eq!(c.logo_size, "300px");
        assert!((c.intensity - 1.0).abs() < 0.001);
        assert!((c.speed - 1.0).abs() < 0.001);
        assert!(c.custom_colors.is_none());
        assert!(c.container_id.is_none());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let c = FooterConfig::from_json(r#"{"height": "90px", "intensity": 1.2}"#);
        assert_eq!(c.height, "90px");
        assert!((c.intensity - 1.2).abs() < 0.001);
        assert_eq!(c.logo_size, "300px");
        assert!((c.speed - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let c = FooterConfig::from_json(r#"{"speed": 2.0, "glitter": true}"#);
        assert!((c.speed - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_invalid_json_degrades_to_defaults() {
        assert_eq!(FooterConfig::from_json("not json"), FooterConfig::default());
        assert_eq!(FooterConfig::from_json(""), FooterConfig::default());
    }

    #[test]
    fn test_custom_colors_roundtrip() {
        let mut c = FooterConfig::default();
        c.custom_colors = Some(palette_for_hour(20));
        let json = serde_json::to_string(&c).unwrap();
        let back = FooterConfig::from_json(&json);
        assert_eq!(back.custom_colors, c.custom_colors);
    }
}
