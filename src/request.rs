//! Incoming HTTP request type and target extraction.

use http::header::HOST;
use http::uri::{Authority, PathAndQuery, Scheme, Uri};

use crate::body::Body;

/// An incoming HTTP request.
pub type Request = http::Request<Body>;

/// Header set by reverse proxies that terminate TLS.
const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The parts of a request URL the router decides on.
///
/// HTTP/1.1 requests arrive in origin-form (`/path?query`) with the host in
/// the `Host` header; HTTP/2 requests and absolute-form requests carry the
/// authority in the URI. Both are handled here so the router sees one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: String,
    /// `host[:port]` with any userinfo removed. Empty when the request
    /// names no parseable authority.
    pub authority: String,
    /// The authority with any port removed. Not case-folded.
    pub host: String,
    pub path: String,
    pub query: Option<String>,
}

impl Target {
    pub fn of(req: &Request, default_scheme: &str) -> Self {
        let uri = req.uri();

        // Only http and https may reach a redirect location; anything else a
        // client puts in X-Forwarded-Proto is ignored.
        let scheme = uri
            .scheme()
            .cloned()
            .or_else(|| forwarded_proto(req))
            .filter(|s| *s == Scheme::HTTP || *s == Scheme::HTTPS)
            .map(|s| s.as_str().to_owned())
            .unwrap_or_else(|| default_scheme.to_owned());

        let raw = uri
            .authority()
            .map(Authority::as_str)
            .or_else(|| req.headers().get(HOST).and_then(|v| v.to_str().ok()))
            .unwrap_or("");

        // Rebuilt from host and port so userinfo never survives. An
        // unparseable authority still resolves by its raw text but yields
        // no origin.
        let (host, authority) = match raw.parse::<Authority>() {
            Ok(a) => {
                let host = a.host().to_owned();
                let authority = match a.port_u16() {
                    Some(port) => format!("{host}:{port}"),
                    None => host.clone(),
                };
                (host, authority)
            }
            Err(_) => (raw.to_owned(), String::new()),
        };

        Self {
            scheme,
            authority,
            host,
            path: uri.path().to_owned(),
            query: uri.query().map(str::to_owned),
        }
    }

    /// `scheme://host[:port]`, the prefix of absolute redirect locations.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }
}

/// First value of `X-Forwarded-Proto`, if it parses as a scheme.
fn forwarded_proto(req: &Request) -> Option<Scheme> {
    let value = req.headers().get(X_FORWARDED_PROTO)?.to_str().ok()?;
    value.split(',').next()?.trim().parse().ok()
}

/// Builds a new request for `path`, keeping the method, headers, version,
/// extensions, body and query string of `req`.
///
/// `path` must be a valid URI path; the router only passes paths assembled
/// from allow-listed slug characters, so a failure falls back to the
/// original URI.
pub fn rewrite(req: Request, path: &str) -> Request {
    let (mut parts, body) = req.into_parts();

    let path_and_query = match parts.uri.query() {
        Some(q) => format!("{path}?{q}"),
        None => path.to_owned(),
    };

    let mut uri_parts = parts.uri.clone().into_parts();
    if let Ok(pq) = path_and_query.parse::<PathAndQuery>() {
        uri_parts.path_and_query = Some(pq);
        if let Ok(uri) = Uri::from_parts(uri_parts) {
            parts.uri = uri;
        }
    }

    Request::from_parts(parts, body)
}
