//! Normalized pointer tracking
//!
//! Stores the latest pointer/touch position normalized to the viewport,
//! with Y flipped to the shader's bottom-up convention. Written by the
//! input events, read by the render tick; no other code touches it.

/// Normalized 2D pointer position, each axis nominally in `[0, 1]`.
///
/// Values are not clamped: near the viewport edge a move event can land
/// slightly outside the unit square and consumers must tolerate that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        // Screen center until the first move event arrives
        Self { x: 0.5, y: 0.5 }
    }
}

impl PointerState {
    /// Update from client-space coordinates.
    ///
    /// `y` is flipped so (0, 0) sits at the bottom-left corner, matching
    /// the fragment shader's clip-space mouse math.
    pub fn set_from_client(
        &mut self,
        client_x: f64,
        client_y: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        self.x = (client_x / viewport_width) as f32;
        self.y = (1.0 - client_y / viewport_height) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_center() {
        let p = PointerState::default();
        assert!((p.x - 0.5).abs() < 0.001);
        assert!((p.y - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_normalization_and_y_flip() {
        let mut p = PointerState::default();
        // clientX = 0.25 * vw, clientY = 0.75 * vh
        p.set_from_client(480.0, 810.0, 1920.0, 1080.0);
        assert!((p.x - 0.25).abs() < 0.001);
        assert!((p.y - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_values_may_exceed_unit_range() {
        let mut p = PointerState::default();
        p.set_from_client(2000.0, -8.0, 1920.0, 1080.0);
        assert!(p.x > 1.0);
        assert!(p.y > 1.0);
    }

    #[test]
    fn test_degenerate_viewport_is_ignored() {
        let mut p = PointerState::default();
        p.set_from_client(100.0, 100.0, 0.0, 0.0);
        assert_eq!(p, PointerState::default());
    }
}
