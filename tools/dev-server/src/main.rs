//! Development server for the Athena front-end widgets
//!
//! Serves the demo pages out of `web/` with correct MIME types for
//! module scripts and WASM, plus permissive CORS so the pages can talk
//! to a chat API running elsewhere during development.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
    routing::get_service,
    Router,
};
use std::net::SocketAddr;
use tower_http::services::ServeDir;

/// Content types by file extension. `ServeDir` guesses most of these
/// wrong for module scripts and WASM, so they are pinned here.
const MIME_TYPES: &[(&str, &str)] = &[
    (".js", "application/javascript; charset=utf-8"),
    (".mjs", "application/javascript; charset=utf-8"),
    (".wasm", "application/wasm"),
    (".css", "text/css; charset=utf-8"),
    (".html", "text/html; charset=utf-8"),
    (".json", "application/json; charset=utf-8"),
];

/// The demo pages fetch against a chat API on another origin.
const CORS_HEADERS: &[(&str, &str)] = &[
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

fn content_type_for(path: &str) -> Option<&'static str> {
    MIME_TYPES
        .iter()
        .find(|(ext, _)| path.ends_with(ext))
        .map(|(_, mime)| *mime)
}

#[tokio::main]
async fn main() {
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let serve_dir = ServeDir::new("web").precompressed_gzip().precompressed_br();

    let app = Router::new()
        .fallback_service(get_service(serve_dir).handle_error(|_| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }))
        .layer(axum::middleware::from_fn(add_headers));

    println!("Athena widgets dev server listening on http://localhost:{}", port);
    println!("Press Ctrl+C to stop");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn add_headers(request: Request<Body>, next: axum::middleware::Next) -> Response<Body> {
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in CORS_HEADERS {
        headers.insert(*name, HeaderValue::from_static(value));
    }
    if let Some(mime) = content_type_for(&path) {
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(mime));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_overrides() {
        assert_eq!(
            content_type_for("/pkg/ac_footer.js"),
            Some("application/javascript; charset=utf-8")
        );
        assert_eq!(
            content_type_for("/pkg/ac_footer_bg.wasm"),
            Some("application/wasm")
        );
        assert_eq!(content_type_for("/index.html"), Some("text/html; charset=utf-8"));
        // Everything else keeps whatever ServeDir decided
        assert_eq!(content_type_for("/logo.png"), None);
        assert_eq!(content_type_for("/README"), None);
    }
}
