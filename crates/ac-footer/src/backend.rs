//! Render backend selection
//!
//! The footer paints through exactly one of two strategies, chosen once
//! at startup: a WebGL shader program, or a CSS keyframe gradient that
//! delegates all per-frame work to the host compositor. The only
//! permitted switch is the one-time fallback from shader to CSS when
//! shader setup fails after a positive capability probe.

use serde::{Deserialize, Serialize};

use crate::palette::Palette;

/// The two interchangeable rendering strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// GPU program with per-frame uniform updates
    Shader,
    /// Declarative animated gradient, no loop owned
    Css,
}

impl BackendKind {
    /// Pick the backend from the capability probe's verdict.
    pub fn from_probe(probe_ok: bool) -> Self {
        if probe_ok {
            BackendKind::Shader
        } else {
            BackendKind::Css
        }
    }
}

/// Style properties the CSS fallback applies to the container.
#[derive(Clone, Debug, PartialEq)]
pub struct CssGradient {
    pub background: String,
    pub background_size: String,
    pub animation: String,
}

/// Oversized backdrop so the keyframe animation has room to travel.
pub const CSS_BACKGROUND_SIZE: &str = "400% 400%";

/// Named keyframe animation cycling the gradient positions.
pub const CSS_ANIMATION: &str = "gradientShift 12s ease-in-out infinite";

/// Build the four-stop fallback gradient for a palette.
pub fn css_gradient(palette: &Palette) -> CssGradient {
    let [c1, c2, c3, c4] = palette.css_colors();
    CssGradient {
        background: format!("linear-gradient(45deg, {}, {}, {}, {})", c1, c2, c3, c4),
        background_size: CSS_BACKGROUND_SIZE.to_string(),
        animation: CSS_ANIMATION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::palette_for_hour;

    #[test]
    fn test_backend_from_probe() {
        assert_eq!(BackendKind::from_probe(true), BackendKind::Shader);
        assert_eq!(BackendKind::from_probe(false), BackendKind::Css);
    }

    #[test]
    fn test_css_gradient_shape() {
        let g = css_gradient(&palette_for_hour(2));
        assert!(g.background.starts_with("linear-gradient(45deg, rgb("));
        assert_eq!(g.background.matches("rgb(").count(), 4);
        assert_eq!(g.background_size, "400% 400%");
        assert_eq!(g.animation, "gradientShift 12s ease-in-out infinite");
    }

    #[test]
    fn test_css_gradient_uses_palette_stops() {
        let palette = palette_for_hour(8);
        let g = css_gradient(&palette);
        for stop in palette.css_colors() {
            assert!(g.background.contains(&stop));
        }
    }
}
