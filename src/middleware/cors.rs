//! Cross-origin response decoration.
//!
//! Every response the router returns passes through [`decorate`] exactly
//! once, after the downstream response is fully obtained. The catalog is
//! public and read-only, so the policy is fixed: any origin, `GET` and
//! `OPTIONS`, and the `Content-Type` request header.

use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::response::Response;

/// The three headers set on every response, overwriting upstream values.
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (ACCESS_CONTROL_ALLOW_ORIGIN,  "*"),
    (ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
    (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Applies the CORS headers and JSON content-type normalization.
///
/// `origin_path` is the URL path the response was produced for: the rewritten
/// path for asset fetches, the request path for passthrough, `None` for
/// responses the router synthesized. `Content-Type` becomes
/// `application/json; charset=utf-8` when the existing value mentions
/// `application/json` or the path ends in `.json`; any other type is left
/// alone.
///
/// Status, version, extensions and the body stream are carried over
/// untouched. The header map is rebuilt rather than edited in place.
pub fn decorate(res: Response, origin_path: Option<&str>) -> Response {
    let (mut parts, body) = res.into_parts();

    let mut headers = HeaderMap::with_capacity(parts.headers.len() + CORS_HEADERS.len());
    headers.extend(parts.headers.drain());

    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    let json_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    let json_path = origin_path.is_some_and(|p| p.ends_with(".json"));
    if json_type || json_path {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
    }

    parts.headers = headers;
    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use http::StatusCode;
    use http::header::{CACHE_CONTROL, SET_COOKIE};

    use super::*;
    use crate::body;

    fn with_headers(pairs: &[(HeaderName, &'static str)]) -> Response {
        let mut res = Response::new(body::empty());
        for (name, value) in pairs {
            res.headers_mut().append(name.clone(), HeaderValue::from_static(value));
        }
        res
    }

    #[test]
    fn sets_all_three_cors_headers() {
        let res = decorate(with_headers(&[]), None);
        for (name, value) in CORS_HEADERS {
            assert_eq!(res.headers()[name], value);
        }
    }

    #[test]
    fn overwrites_upstream_cors_values() {
        let res = decorate(
            with_headers(&[
                (ACCESS_CONTROL_ALLOW_ORIGIN, "https://example.com"),
                (ACCESS_CONTROL_ALLOW_ORIGIN, "https://other.example"),
            ]),
            None,
        );
        let values: Vec<_> = res.headers().get_all(ACCESS_CONTROL_ALLOW_ORIGIN).iter().collect();
        assert_eq!(values, vec!["*"]);
    }

    #[test]
    fn is_idempotent() {
        let once = decorate(with_headers(&[(CACHE_CONTROL, "max-age=60")]), Some("/v1/agents/a.json"));
        let once_headers = once.headers().clone();
        let twice = decorate(once, Some("/v1/agents/a.json"));
        assert_eq!(twice.headers(), &once_headers);
        assert_eq!(twice.headers().len(), 5);
    }

    #[test]
    fn json_path_without_content_type_gets_json() {
        let res = decorate(with_headers(&[]), Some("/v1/skills/index.json"));
        assert_eq!(res.headers()[CONTENT_TYPE], JSON_UTF8);
    }

    #[test]
    fn json_content_type_is_normalized_whatever_the_path() {
        let res = decorate(with_headers(&[(CONTENT_TYPE, "application/json")]), Some("/v1/agents/"));
        assert_eq!(res.headers()[CONTENT_TYPE], JSON_UTF8);
    }

    #[test]
    fn other_content_types_are_left_alone() {
        let res = decorate(with_headers(&[(CONTENT_TYPE, "text/plain")]), Some("/robots.txt"));
        assert_eq!(res.headers()[CONTENT_TYPE], "text/plain");

        let res = decorate(with_headers(&[]), Some("/favicon.ico"));
        assert!(res.headers().get(CONTENT_TYPE).is_none());

        let res = decorate(with_headers(&[]), None);
        assert!(res.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn keeps_status_and_unrelated_multi_valued_headers() {
        let mut res = with_headers(&[(SET_COOKIE, "a=1"), (SET_COOKIE, "b=2")]);
        *res.status_mut() = StatusCode::NOT_FOUND;
        let res = decorate(res, Some("/missing.json"));
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(res.headers().get_all(SET_COOKIE).iter().count(), 2);
    }
}
