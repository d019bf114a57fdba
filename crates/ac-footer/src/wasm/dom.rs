//! DOM plumbing for the footer widget
//!
//! Container resolution, canvas insertion, CSS fallback styling and the
//! page-signal snapshot the logo resolver consumes.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, HtmlLinkElement,
    HtmlScriptElement};

use crate::backend::CssGradient;
use crate::config::FooterConfig;
use crate::logo::{LinkSignal, PageSignals};
use crate::surface::SurfaceDimensions;

/// Resolve the element that hosts the footer.
///
/// An explicit `containerId` wins; otherwise the conventional
/// `.ac-creations-footer` element; the body is never painted directly.
pub(crate) fn resolve_container(
    document: &Document,
    config: &FooterConfig,
) -> Option<HtmlElement> {
    if let Some(id) = &config.container_id {
        return document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    }
    document
        .query_selector(".ac-creations-footer")
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
}

/// Create the drawable and insert it as the container's first child.
///
/// Absolutely positioned over the container, behind its content, and
/// transparent to pointer events so links in the footer keep working.
pub(crate) fn create_canvas(
    document: &Document,
    container: &HtmlElement,
) -> Result<HtmlCanvasElement, String> {
    let canvas = document
        .create_element("canvas")
        .map_err(|_| "could not create canvas element".to_string())?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| "canvas element has unexpected type".to_string())?;
    canvas.set_id("shaderCanvas");

    let style = canvas.style();
    for (prop, value) in [
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("z-index", "1"),
        ("pointer-events", "none"),
    ] {
        let _ = style.set_property(prop, value);
    }

    container
        .insert_before(&canvas, container.first_child().as_ref())
        .map_err(|_| "could not insert canvas into container".to_string())?;
    Ok(canvas)
}

/// Measure the container and viewport into surface dimensions.
pub(crate) fn measure_surface(container: &HtmlElement) -> SurfaceDimensions {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return SurfaceDimensions::default(),
    };
    let rect = container.get_bounding_client_rect();
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(rect.width());
    SurfaceDimensions::compute(
        rect.width(),
        rect.height(),
        viewport_width,
        window.device_pixel_ratio(),
    )
}

/// Apply dimensions to the canvas backing store and display size.
pub(crate) fn apply_surface(canvas: &HtmlCanvasElement, dims: &SurfaceDimensions) {
    canvas.set_width(dims.device_width);
    canvas.set_height(dims.device_height);
    let style = canvas.style();
    let _ = style.set_property("width", &format!("{}px", dims.css_width));
    let _ = style.set_property("height", &format!("{}px", dims.css_height));
}

/// Paint the CSS fallback gradient onto the container.
pub(crate) fn apply_css_gradient(container: &HtmlElement, gradient: &CssGradient) {
    let style = container.style();
    let _ = style.set_property("background", &gradient.background);
    let _ = style.set_property("background-size", &gradient.background_size);
    let _ = style.set_property("animation", &gradient.animation);
}

/// Apply the configured container height and logo size.
pub(crate) fn apply_config_styles(container: &HtmlElement, config: &FooterConfig) {
    let _ = container.style().set_property("height", &config.height);
    if let Some(logo) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("logoImage"))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let _ = logo.style().set_property("width", &config.logo_size);
    }
}

fn collect_links(document: &Document, selector: &str) -> Vec<LinkSignal> {
    let mut out = Vec::new();
    let nodes = match document.query_selector_all(selector) {
        Ok(n) => n,
        Err(_) => return out,
    };
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        if let Some(link) = node.dyn_ref::<HtmlLinkElement>() {
            out.push(LinkSignal {
                href: link.href(),
                attr: link
                    .get_attribute("href")
                    .unwrap_or_default(),
            });
        } else if let Some(script) = node.dyn_ref::<HtmlScriptElement>() {
            let src = script.src();
            if src.is_empty() {
                continue;
            }
            out.push(LinkSignal {
                href: src,
                attr: script.get_attribute("src").unwrap_or_default(),
            });
        }
    }
    out
}

/// Snapshot the page signals the logo-path resolver inspects.
pub(crate) fn collect_page_signals(document: &Document) -> PageSignals {
    let logo_image_sources = document
        .query_selector_all(r#"img[src*="AC Creations Logo"]"#)
        .ok()
        .map(|nodes| {
            (0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|n| n.dyn_ref::<Element>().and_then(|e| e.get_attribute("src")))
                .collect()
        })
        .unwrap_or_default();

    let page_path = web_sys::window()
        .map(|w| w.location().pathname().unwrap_or_default())
        .unwrap_or_default();

    PageSignals {
        stylesheet_links: collect_links(document, r#"link[rel="stylesheet"]"#),
        script_sources: collect_links(document, "script"),
        logo_image_sources,
        page_path,
    }
}
