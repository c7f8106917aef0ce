//! Outgoing HTTP response type and the constructors the router synthesizes.
//!
//! Most responses come from downstream (the asset store or the origin). The
//! router only builds two itself: the `204` preflight answer and the `302`
//! root redirect. The static store uses the rest.

use bytes::Bytes;
use http::header::{ALLOW, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{HeaderValue, StatusCode};

use crate::body::{self, Body};
use crate::middleware::cors;

/// An outgoing HTTP response.
pub type Response = http::Response<Body>;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content types the static store can emit, keyed by file extension.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Css,          // text/css; charset=utf-8
    Html,         // text/html; charset=utf-8
    Js,           // text/javascript; charset=utf-8
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Svg,          // image/svg+xml
    Text,         // text/plain; charset=utf-8
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css         => "text/css; charset=utf-8",
            Self::Html        => "text/html; charset=utf-8",
            Self::Js          => "text/javascript; charset=utf-8",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Svg         => "image/svg+xml",
            Self::Text        => "text/plain; charset=utf-8",
        }
    }

    /// Maps a file extension (without the dot, any case) to a content type.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "css"          => Self::Css,
            "htm" | "html" => Self::Html,
            "js" | "mjs"   => Self::Js,
            "json"         => Self::Json,
            "svg"          => Self::Svg,
            "md" | "txt"   => Self::Text,
            _              => Self::OctetStream,
        }
    }
}

// ── Constructors ──────────────────────────────────────────────────────────────

/// Response with the given status and an empty body.
pub fn status(code: StatusCode) -> Response {
    let mut res = Response::new(body::empty());
    *res.status_mut() = code;
    res
}

/// `204 No Content` answer to a CORS preflight. Carries the CORS headers and
/// nothing else.
pub fn preflight() -> Response {
    let mut res = status(StatusCode::NO_CONTENT);
    for (name, value) in cors::CORS_HEADERS {
        res.headers_mut().insert(name, HeaderValue::from_static(value));
    }
    res
}

/// `302 Found` pointing at `location`.
///
/// A location that is not a valid header value (it is assembled from the
/// request's `Host`) degrades to the path alone, which clients resolve
/// against the same origin.
pub fn found(location: &str, fallback_path: &str) -> Response {
    let value = HeaderValue::try_from(location)
        .or_else(|_| HeaderValue::try_from(fallback_path))
        .unwrap_or_else(|_| HeaderValue::from_static("/"));
    let mut res = status(StatusCode::FOUND);
    res.headers_mut().insert(LOCATION, value);
    res
}

pub fn not_found() -> Response {
    status(StatusCode::NOT_FOUND)
}

/// `405 Method Not Allowed` with an `Allow` header.
pub fn method_not_allowed(allow: &'static str) -> Response {
    let mut res = status(StatusCode::METHOD_NOT_ALLOWED);
    res.headers_mut().insert(ALLOW, HeaderValue::from_static(allow));
    res
}

/// `200 OK` with a typed body.
pub fn bytes(content_type: ContentType, data: impl Into<Bytes>) -> Response {
    let data = data.into();
    let len = data.len();
    let mut res = Response::new(body::full(data));
    let headers = res.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    res
}

/// `200 OK` headers for a `HEAD` request: content type and length, no body.
pub fn head(content_type: ContentType, len: u64) -> Response {
    let mut res = status(StatusCode::OK);
    let headers = res.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type.as_str()));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    res
}
