//! Drawable surface sizing
//!
//! Pure sizing math for the footer canvas. The wasm layer applies the
//! result to the canvas backing store, its CSS size and the GL viewport;
//! this module only decides what those sizes should be.

use serde::{Deserialize, Serialize};

/// Physical and CSS pixel dimensions for the drawable.
///
/// `device_*` is the backing-store size (device-pixel-ratio scaled);
/// `css_*` is the unscaled display size. The drawable is capped at the
/// viewport width so an over-wide container never produces horizontal
/// overflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDimensions {
    /// Backing-store width in physical pixels
    pub device_width: u32,
    /// Backing-store height in physical pixels
    pub device_height: u32,
    /// Display width in CSS pixels
    pub css_width: f64,
    /// Display height in CSS pixels
    pub css_height: f64,
}

impl SurfaceDimensions {
    /// Compute dimensions from the container's layout box and viewport.
    ///
    /// Idempotent: recomputing with unchanged inputs yields identical
    /// output, so resize handlers need no debouncing.
    pub fn compute(
        container_width: f64,
        container_height: f64,
        viewport_width: f64,
        device_pixel_ratio: f64,
    ) -> Self {
        let css_width = container_width.min(viewport_width).max(0.0);
        let css_height = container_height.max(0.0);
        Self {
            device_width: (css_width * device_pixel_ratio) as u32,
            device_height: (css_height * device_pixel_ratio) as u32,
            css_width,
            css_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scales_by_device_pixel_ratio() {
        let d = SurfaceDimensions::compute(800.0, 200.0, 1920.0, 2.0);
        assert_eq!(d.device_width, 1600);
        assert_eq!(d.device_height, 400);
        assert!((d.css_width - 800.0).abs() < 0.001);
        assert!((d.css_height - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_compute_caps_at_viewport_width() {
        let d = SurfaceDimensions::compute(2400.0, 90.0, 1280.0, 1.5);
        assert!((d.css_width - 1280.0).abs() < 0.001);
        assert_eq!(d.device_width, 1920);
        // Backing store never exceeds dpr * viewport width
        assert!(d.device_width as f64 <= 1.5 * 1280.0);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let a = SurfaceDimensions::compute(1024.0, 200.0, 1440.0, 2.0);
        let b = SurfaceDimensions::compute(1024.0, 200.0, 1440.0, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_compute_negative_layout_clamps_to_zero() {
        // A display:none container reports a degenerate layout box.
        let d = SurfaceDimensions::compute(-10.0, -5.0, 1920.0, 2.0);
        assert_eq!(d.device_width, 0);
        assert_eq!(d.device_height, 0);
    }
}
