//! Footer engine coordinating widget state
//!
//! The engine owns everything the render tick reads: the frame clock,
//! the pointer, the chosen backend and the last surface measurement.
//! It is pure Rust with no DOM types, so the whole startup and frame
//! flow is testable natively; the wasm controller is a thin shell
//! around it.

use crate::backend::BackendKind;
use crate::config::FooterConfig;
use crate::palette::{palette_for_hour, Palette};
use crate::pointer::PointerState;
use crate::surface::SurfaceDimensions;

/// Logical simulation clock, counted in frames.
///
/// Each tick advances by a fixed 0.016 (an assumed 60fps) regardless of
/// the real frame interval. This is the defined semantics, not an
/// approximation: visual speed is resilient to frame-rate variance and
/// deliberately desynchronized from wall-clock time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameClock {
    time: f32,
}

impl FrameClock {
    /// Fixed per-frame step in logical seconds.
    pub const STEP: f32 = 0.016;

    /// Advance one frame.
    pub fn tick(&mut self) {
        self.time += Self::STEP;
    }

    /// Current logical time in seconds.
    pub fn time(&self) -> f32 {
        self.time
    }
}

/// One consistent per-frame uniform snapshot.
///
/// Everything the shader reads in a tick is derived here in one call,
/// so a frame never observes a half-updated palette or pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub time: f32,
    pub resolution: [f32; 2],
    pub pointer: [f32; 2],
    pub colors: [[f32; 3]; 4],
}

/// Widget state container.
///
/// One instance per footer on the page; nothing here is ambient, so
/// multiple footers stay independent.
pub struct FooterEngine {
    pub config: FooterConfig,
    pub pointer: PointerState,
    clock: FrameClock,
    backend: Option<BackendKind>,
    surface: SurfaceDimensions,
    next_logo_refresh: f32,
}

impl FooterEngine {
    /// Interval between logo refreshes, in logical seconds.
    pub const LOGO_REFRESH_INTERVAL: f32 = 60.0;

    pub fn new(config: FooterConfig) -> Self {
        Self {
            config,
            pointer: PointerState::default(),
            clock: FrameClock::default(),
            backend: None,
            surface: SurfaceDimensions::default(),
            next_logo_refresh: 0.0,
        }
    }

    /// Choose the backend from the capability probe's verdict.
    ///
    /// Called exactly once at startup; the choice is permanent except
    /// for [`fall_back_to_css`](Self::fall_back_to_css).
    pub fn select_backend(&mut self, probe_ok: bool) -> BackendKind {
        let kind = BackendKind::from_probe(probe_ok);
        self.backend = Some(kind);
        kind
    }

    /// One-time demotion when shader setup fails after a positive probe.
    pub fn fall_back_to_css(&mut self) {
        self.backend = Some(BackendKind::Css);
    }

    /// The backend chosen at startup, if selection has run.
    pub fn backend(&self) -> Option<BackendKind> {
        self.backend
    }

    /// Record the latest surface measurement.
    pub fn set_surface(&mut self, surface: SurfaceDimensions) {
        self.surface = surface;
    }

    /// Last recorded surface measurement.
    pub fn surface(&self) -> SurfaceDimensions {
        self.surface
    }

    /// Palette for the given hour, honoring a configured override.
    ///
    /// Re-derived on every call so the gradient transitions live when
    /// the hour crosses a band boundary mid-session.
    pub fn current_palette(&self, hour: u32) -> Palette {
        self.config
            .custom_colors
            .unwrap_or_else(|| palette_for_hour(hour))
    }

    /// Advance one frame and snapshot the uniforms.
    pub fn frame(&mut self, hour: u32) -> FrameUniforms {
        self.clock.tick();
        let palette = self.current_palette(hour);
        FrameUniforms {
            time: self.clock.time(),
            resolution: [
                self.surface.device_width as f32,
                self.surface.device_height as f32,
            ],
            pointer: [self.pointer.x, self.pointer.y],
            colors: palette.colors,
        }
    }

    /// Current logical time in seconds.
    pub fn logical_time(&self) -> f32 {
        self.clock.time()
    }

    /// Whether the logo source is due for a rewrite.
    ///
    /// Fires immediately at startup, then every 60 logical seconds of
    /// frame time (one wall minute at the assumed 60fps).
    pub fn logo_refresh_due(&mut self) -> bool {
        if self.clock.time() >= self.next_logo_refresh {
            self.next_logo_refresh = self.clock.time() + Self::LOGO_REFRESH_INTERVAL;
            true
        } else {
            false
        }
    }
}
