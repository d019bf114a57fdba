//! AC Creations shader footer
//!
//! A decorative animated-gradient footer: a WebGL fragment shader when
//! the host supports it, a CSS keyframe gradient otherwise. The palette
//! follows the time of day, the pointer feeds the shader, and a
//! companion logo image is kept in sync with the palette's darkness.
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`palette`]: Time-of-day palette policy
//! - [`surface`]: Drawable sizing math
//! - [`pointer`]: Normalized pointer tracking
//! - [`backend`]: Shader/CSS strategy selection and the CSS gradient
//! - [`engine`]: Per-instance state and the per-frame uniform snapshot
//! - [`shaders`]: GLSL sources
//! - [`logo`]: Logo path heuristics and the load-failure fallback data
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: startup, frame and resolution logic is plain
//!    Rust, testable without a browser
//! 2. **Explicit Instance State**: no ambient globals, so multiple
//!    footers on one page stay independent
//! 3. **Never Break the Page**: every failure path degrades (CSS
//!    gradient, placeholder logo) instead of throwing into the host
//!
//! ## Example
//!
//! ```rust
//! use ac_footer::{FooterConfig, FooterEngine};
//!
//! let mut engine = FooterEngine::new(FooterConfig::default());
//! let backend = engine.select_backend(false); // no GPU: CSS fallback
//! assert_eq!(backend, ac_footer::BackendKind::Css);
//! ```

pub mod backend;
pub mod config;
pub mod logo;
pub mod palette;
pub mod pointer;
pub mod shaders;
pub mod surface;

mod engine;

pub use backend::{css_gradient, BackendKind, CssGradient};
pub use config::FooterConfig;
pub use engine::{FooterEngine, FrameClock, FrameUniforms};
pub use palette::{palette_for_hour, Palette, TimeBand};
pub use pointer::PointerState;
pub use surface::SurfaceDimensions;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;
