//! Logo source switching and the load-failure retry chain
//!
//! The footer keeps a companion logo image in sync with the palette's
//! darkness. The resolver only guesses a prefix; if the guess 404s the
//! chain below walks the fixed candidate list, and when every candidate
//! fails it installs an inline SVG placeholder so the slot never shows
//! a broken-image icon.

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::logo::{fallback_logo_svg, logo_file_name, FALLBACK_PREFIXES};

use super::log;

/// Point the logo at the resolved prefix and arm the retry chain.
pub(crate) fn update_logo(logo: &HtmlImageElement, prefix: &str, is_dark: bool) {
    let file = logo_file_name(is_dark);
    logo.set_src(&format!("{}{}", prefix, file));

    let chain_logo = logo.clone();
    let onerror = Closure::once(move || {
        chain_logo.set_onerror(None);
        try_candidate(Rc::new(chain_logo), is_dark, 0);
    });
    logo.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    // The closure must outlive this call; it is bounded to one firing.
    onerror.forget();
}

/// Probe one candidate prefix with a detached image.
///
/// Success rewrites the real logo's source; failure advances to the
/// next candidate; exhaustion installs the SVG placeholder. Each
/// attempt is a bounded load with both callbacks wired, so the chain
/// always terminates on its own.
fn try_candidate(logo: Rc<HtmlImageElement>, is_dark: bool, index: usize) {
    if index >= FALLBACK_PREFIXES.len() {
        log("[ac-footer] logo not found at any candidate path, using placeholder");
        install_placeholder(&logo, is_dark);
        return;
    }

    let path = format!("{}{}", FALLBACK_PREFIXES[index], logo_file_name(is_dark));

    let probe = match HtmlImageElement::new() {
        Ok(img) => img,
        Err(_) => {
            install_placeholder(&logo, is_dark);
            return;
        }
    };

    let found_logo = logo.clone();
    let found_path = path.clone();
    let onload = Closure::once(move || {
        found_logo.set_onerror(None);
        found_logo.set_src(&found_path);
    });
    probe.set_onload(Some(onload.as_ref().unchecked_ref()));
    onload.forget();

    let onerror = Closure::once(move || {
        try_candidate(logo, is_dark, index + 1);
    });
    probe.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onerror.forget();

    probe.set_src(&path);
}

/// Swap in the generated inline vector image.
fn install_placeholder(logo: &HtmlImageElement, is_dark: bool) {
    let svg = fallback_logo_svg(is_dark);
    let encoded = web_sys::window().and_then(|w| w.btoa(&svg).ok());
    if let Some(b64) = encoded {
        logo.set_onerror(None);
        logo.set_src(&format!("data:image/svg+xml;base64,{}", b64));
    }
}
