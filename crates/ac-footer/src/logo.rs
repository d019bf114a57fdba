//! Logo asset path resolution
//!
//! The companion logo PNG can live in several places relative to the
//! page depending on how the footer was integrated. Resolution is an
//! ordered list of best-effort probes over a snapshot of page signals;
//! the first hit wins and nothing is verified to actually load. That
//! is the job of the runtime retry chain ([`FALLBACK_PREFIXES`]), which
//! ends in an inline SVG placeholder.
//!
//! Probe order is observable behavior on ambiguous pages and must not
//! be reshuffled.

/// A stylesheet link or script reference, carrying both the resolved
/// URL and the raw attribute value (the shapes differ and both are
/// consulted).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinkSignal {
    /// Fully resolved URL as the browser reports it
    pub href: String,
    /// Raw attribute value as written in the markup
    pub attr: String,
}

/// Snapshot of the environmental signals the resolver inspects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageSignals {
    /// `link[rel="stylesheet"]` references
    pub stylesheet_links: Vec<LinkSignal>,
    /// `script` references with a `src`
    pub script_sources: Vec<LinkSignal>,
    /// Raw `src` attributes of images that look like the logo
    pub logo_image_sources: Vec<String>,
    /// Current page pathname
    pub page_path: String,
}

/// Marker substrings the probes recognize.
const CSS_MARKER: &str = "ac-footer.css";
const JS_MARKER: &str = "ac-footer.js";
const LOGO_MARKER: &str = "AC Creations Logo";
const NESTED_DIR: &str = "/ac-creations-footer/";

/// Default prefix when every probe comes up empty: assume the external
/// nested-folder layout.
pub const DEFAULT_PREFIX: &str = "ac-creations-footer/";

/// Candidate prefixes for the load-failure retry chain, tried in this
/// exact order.
pub const FALLBACK_PREFIXES: [&str; 8] = [
    "",
    "ac-creations-footer/",
    "../",
    "./ac-creations-footer/",
    "/ac-creations-footer/",
    "assets/",
    "images/",
    "logo/",
];

/// Resolve the relative prefix for the logo assets.
///
/// Probes, in order: stylesheet links, script sources, existing logo
/// images, the page path. Each probe recognizes the literal path shapes
/// of the three supported integration layouts (nested folder, same
/// directory, parent directory).
pub fn resolve_logo_prefix(signals: &PageSignals) -> String {
    for link in &signals.stylesheet_links {
        if link.href.contains(CSS_MARKER) {
            if link.href.contains("/ac-creations-footer/ac-footer.css") {
                return DEFAULT_PREFIX.to_string();
            } else if link.attr == "ac-footer.css" {
                return String::new();
            } else if link.attr == "../ac-footer.css" {
                return "../".to_string();
            }
        }
    }

    for script in &signals.script_sources {
        if script.href.contains(JS_MARKER) {
            if script.href.contains("/ac-creations-footer/ac-footer.js") {
                return DEFAULT_PREFIX.to_string();
            } else if script.attr == "ac-footer.js" {
                return String::new();
            } else if script.attr == "../ac-footer.js" {
                return "../".to_string();
            }
        }
    }

    for src in &signals.logo_image_sources {
        if !src.contains(LOGO_MARKER) {
            continue;
        }
        if src.contains(NESTED_DIR) {
            return DEFAULT_PREFIX.to_string();
        } else if src.starts_with("../") {
            return "../".to_string();
        } else if !src.contains('/') {
            return String::new();
        }
    }

    if signals.page_path.contains(NESTED_DIR) {
        return String::new();
    } else if signals.page_path.contains("/integration-examples/") {
        return "../".to_string();
    }

    DEFAULT_PREFIX.to_string()
}

/// File name of the logo asset matching the palette's darkness.
///
/// The "Dark Background" asset is the white logo meant for dark
/// gradients; since every shipped palette is dark, that is the one in
/// practice.
pub fn logo_file_name(is_dark: bool) -> &'static str {
    if is_dark {
        "AC Creations Logo Dark Background.png"
    } else {
        "AC Creations Logo Light Background.png"
    }
}

/// Inline SVG placeholder used when every candidate path 404s.
///
/// White or black wordmark on a transparent background; the wasm layer
/// base64-encodes this into a data URL.
pub fn fallback_logo_svg(is_dark: bool) -> String {
    let color = if is_dark { "#ffffff" } else { "#000000" };
    format!(
        concat!(
            r#"<svg width="200" height="60" xmlns="http://www.w3.org/2000/svg">"#,
            r#"<text x="100" y="35" font-family="Arial, sans-serif" font-size="18" "#,
            r#"font-weight="bold" text-anchor="middle" fill="{}">AC Creations</text>"#,
            "</svg>"
        ),
        color
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn css_link(href: &str, attr: &str) -> PageSignals {
        PageSignals {
            stylesheet_links: vec![LinkSignal {
                href: href.to_string(),
                attr: attr.to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_stylesheet_same_directory() {
        let signals = css_link("https://example.com/ac-footer.css", "ac-footer.css");
        assert_eq!(resolve_logo_prefix(&signals), "");
    }

    #[test]
    fn test_stylesheet_nested_folder() {
        let signals = css_link(
            "https://example.com/site/ac-creations-footer/ac-footer.css",
            "ac-creations-footer/ac-footer.css",
        );
        assert_eq!(resolve_logo_prefix(&signals), "ac-creations-footer/");
    }

    #[test]
    fn test_stylesheet_parent_directory() {
        let signals = css_link("https://example.com/ac-footer.css", "../ac-footer.css");
        assert_eq!(resolve_logo_prefix(&signals), "../");
    }

    #[test]
    fn test_unrecognized_stylesheet_shape_falls_through() {
        // Marker present but none of the three literal shapes: the probe
        // moves on instead of guessing.
        let mut signals = css_link(
            "https://cdn.example.com/v2/ac-footer.css",
            "v2/ac-footer.css",
        );
        signals.page_path = "/integration-examples/demo.html".to_string();
        assert_eq!(resolve_logo_prefix(&signals), "../");
    }

    #[test]
    fn test_script_probe_runs_after_stylesheets() {
        let signals = PageSignals {
            script_sources: vec![LinkSignal {
                href: "https://example.com/ac-footer.js".to_string(),
                attr: "ac-footer.js".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&signals), "");
    }

    #[test]
    fn test_stylesheet_wins_over_script() {
        let mut signals = css_link("https://example.com/ac-footer.css", "../ac-footer.css");
        signals.script_sources = vec![LinkSignal {
            href: "https://example.com/a/ac-creations-footer/ac-footer.js".to_string(),
            attr: "ac-creations-footer/ac-footer.js".to_string(),
        }];
        assert_eq!(resolve_logo_prefix(&signals), "../");
    }

    #[test]
    fn test_image_probe_classification() {
        let nested = PageSignals {
            logo_image_sources: vec![
                "/assets/ac-creations-footer/AC Creations Logo Dark Background.png".to_string(),
            ],
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&nested), "ac-creations-footer/");

        let parent = PageSignals {
            logo_image_sources: vec!["../AC Creations Logo Dark Background.png".to_string()],
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&parent), "../");

        let bare = PageSignals {
            logo_image_sources: vec!["AC Creations Logo Dark Background.png".to_string()],
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&bare), "");
    }

    #[test]
    fn test_non_logo_images_are_skipped() {
        let signals = PageSignals {
            logo_image_sources: vec!["../banner.png".to_string()],
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&signals), DEFAULT_PREFIX);
    }

    #[test]
    fn test_page_path_probe() {
        let inside = PageSignals {
            page_path: "/docs/ac-creations-footer/index.html".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&inside), "");

        let examples = PageSignals {
            page_path: "/integration-examples/basic.html".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_logo_prefix(&examples), "../");
    }

    #[test]
    fn test_no_signals_defaults_to_nested_folder() {
        assert_eq!(resolve_logo_prefix(&PageSignals::default()), DEFAULT_PREFIX);
    }

    #[test]
    fn test_fallback_prefix_order_is_fixed() {
        assert_eq!(FALLBACK_PREFIXES[0], "");
        assert_eq!(FALLBACK_PREFIXES[1], "ac-creations-footer/");
        assert_eq!(FALLBACK_PREFIXES[2], "../");
        assert_eq!(FALLBACK_PREFIXES.len(), 8);
    }

    #[test]
    fn test_logo_file_names() {
        assert_eq!(logo_file_name(true), "AC Creations Logo Dark Background.png");
        assert_eq!(logo_file_name(false), "AC Creations Logo Light Background.png");
    }

    #[test]
    fn test_fallback_svg_color_tracks_darkness() {
        assert!(fallback_logo_svg(true).contains("#ffffff"));
        assert!(fallback_logo_svg(false).contains("#000000"));
        assert!(fallback_logo_svg(true).contains("AC Creations"));
    }
}
