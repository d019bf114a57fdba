//! Integration tests for the footer engine
//!
//! These exercise the full startup and frame flow without a browser:
//! backend selection from the probe verdict, the CSS fallback path,
//! logical-time accounting and surface idempotence.

use ac_footer::{
    css_gradient, palette_for_hour, BackendKind, FooterConfig, FooterEngine, SurfaceDimensions,
};

// =============================================================================
// Backend selection
// =============================================================================

#[test]
fn test_failed_probe_goes_straight_to_css() {
    // Construction with shader-context creation stubbed to fail: the
    // widget must settle on the CSS gradient and own no frame loop.
    let config = FooterConfig::from_json(r#"{"height": "90px", "intensity": 1.2}"#);
    assert_eq!(config.height, "90px");

    let mut engine = FooterEngine::new(config);
    assert_eq!(engine.select_backend(false), BackendKind::Css);

    // The CSS path paints from the same palette policy the shader uses.
    let gradient = css_gradient(&engine.current_palette(10));
    let expected = palette_for_hour(10).css_colors();
    for stop in expected {
        assert!(gradient.background.contains(&stop));
    }
    assert_eq!(gradient.animation, "gradientShift 12s ease-in-out infinite");

    // No loop ran: logical time never advanced.
    assert!(engine.logical_time().abs() < 1e-9);
}

#[test]
fn test_setup_failure_after_positive_probe_demotes_once() {
    let mut engine = FooterEngine::new(FooterConfig::default());
    assert_eq!(engine.select_backend(true), BackendKind::Shader);

    // Compile/link blew up at setup time.
    engine.fall_back_to_css();
    assert_eq!(engine.backend(), Some(BackendKind::Css));
}

// =============================================================================
// Logical time
// =============================================================================

#[test]
fn test_five_frames_advance_logical_time_by_fixed_steps() {
    let mut engine = FooterEngine::new(FooterConfig::default());
    engine.select_backend(true);
    engine.set_surface(SurfaceDimensions::compute(800.0, 200.0, 1920.0, 1.0));

    // Five scheduled callbacks; any wall-clock delay between them is
    // irrelevant because the clock is frame-counted.
    let mut last = 0.0f32;
    for _ in 0..5 {
        last = engine.frame(12).time;
    }
    assert!((last - 5.0 * 0.016).abs() < 1e-6);
}

#[test]
fn test_frame_uniforms_track_hour_boundary_live() {
    let mut engine = FooterEngine::new(FooterConfig::default());
    engine.select_backend(true);

    let before = engine.frame(17).colors;
    let after = engine.frame(18).colors;
    assert_eq!(before, palette_for_hour(17).colors);
    assert_eq!(after, palette_for_hour(18).colors);
    assert_ne!(before, after);
}

// =============================================================================
// Surface sizing
// =============================================================================

#[test]
fn test_resize_is_idempotent_without_layout_change() {
    let first = SurfaceDimensions::compute(1200.0, 200.0, 1440.0, 2.0);
    let second = SurfaceDimensions::compute(1200.0, 200.0, 1440.0, 2.0);
    assert_eq!(first, second);
}

#[test]
fn test_backing_store_never_exceeds_scaled_viewport() {
    for (container_w, viewport_w, dpr) in [
        (500.0, 1920.0, 1.0),
        (2500.0, 1920.0, 2.0),
        (1920.0, 1280.0, 1.5),
        (10_000.0, 320.0, 3.0),
    ] {
        let d = SurfaceDimensions::compute(container_w, 200.0, viewport_w, dpr);
        assert!(
            d.device_width as f64 <= dpr * viewport_w + 0.5,
            "{}x dpr {} viewport {} gave backing width {}",
            container_w,
            dpr,
            viewport_w,
            d.device_width
        );
    }
}

// =============================================================================
// Configuration surface
// =============================================================================

#[test]
fn test_options_blob_with_wrong_types_degrades_silently() {
    // "No validation beyond type coercion": a garbage blob must not
    // prevent construction, it just yields defaults.
    let config = FooterConfig::from_json(r#"{"height": 90, "speed": "fast"}"#);
    assert_eq!(config, FooterConfig::default());

    let mut engine = FooterEngine::new(config);
    assert_eq!(engine.select_backend(false), BackendKind::Css);
}
