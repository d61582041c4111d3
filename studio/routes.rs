use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::state::SharedState;
use crate::handlers;

/// Every studio response is a fully buffered body.
pub type PageResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Builds a buffered response; the length header comes from the body.
/// Headers whose bytes tiny_http rejects are dropped.
fn buffered(status: u16, headers: &[(&str, &str)], body: Vec<u8>) -> PageResponse {
    let headers = headers
        .iter()
        .filter_map(|(field, value)| Header::from_bytes(field.as_bytes(), value.as_bytes()).ok())
        .collect();
    let len = body.len();
    Response::new(StatusCode(status), headers, Cursor::new(body), Some(len), None)
}

pub fn html_response(body: String) -> PageResponse {
    buffered(200, &[("Content-Type", "text/html; charset=utf-8")], body.into_bytes())
}

/// 303 so a POSTed form lands on a GET page.
pub fn redirect(location: &str) -> PageResponse {
    buffered(303, &[("Location", location)], Vec::new())
}

pub fn not_found() -> PageResponse {
    buffered(404, &[("Content-Type", "text/plain; charset=utf-8")], b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Handlers receive `&mut Request` so the dispatcher keeps ownership and
/// responds at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    tracing::debug!(%method, %path, "request");

    let response = match (method, path.as_str()) {
        // ── Upload form ──────────────────────────────────────────────────
        (Method::Get,  "/")        => handlers::predict::handle_get(state),
        (Method::Post, "/predict") => handlers::predict::handle_submit(&mut request, state),

        // ── History ──────────────────────────────────────────────────────
        (Method::Get, "/history")  => handlers::history::handle_get(state),

        // ── 404 ──────────────────────────────────────────────────────────
        _ => not_found(),
    };

    let _ = request.respond(response);
}
