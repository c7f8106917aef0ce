//! The card router.
//!
//! Every request is sorted into exactly one [`Disposition`]. The rules are
//! checked in a fixed order and the first match wins:
//!
//! 1. `OPTIONS`, on any host → `204` preflight
//! 2. host not in the domain table → origin, unchanged
//! 3. `/` → `302` to `/v1/{kind}/index.json`
//! 4. `/{slug}/a2a.json` (agents only) → asset store at `/v1/agents/{slug}/a2a.json`
//! 5. `/{slug}.json` → asset store at `/v1/{kind}/{slug}.json`
//! 6. anything else → origin, unchanged
//!
//! Everything except the preflight answer is CORS-decorated on the way out.
//! Downstream statuses (404 included) are returned as they are.

use std::collections::HashMap;

use http::Method;
use tracing::debug;

use crate::domain::DomainMap;
use crate::fetch::{self, BoxedFetch, Fetch};
use crate::kind::Kind;
use crate::middleware::cors;
use crate::request::{self, Request, Target};
use crate::response::{self, Response};
use crate::shortcut::{Rewrite, Shortcuts};

/// What the router does with one request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Disposition {
    /// CORS preflight, answered directly.
    Preflight,
    /// The host serves no kind (preview and staging hosts).
    Unmapped,
    /// Root of a mapped host, redirected to the kind index.
    Root { kind: Kind },
    /// A short URL expanded to its canonical path.
    Shortcut { kind: Kind, rewrite: Rewrite },
    /// Mapped host, no rule applies.
    Passthrough { kind: Kind },
}

/// The application router.
///
/// Build it once at startup; it holds no per-request state and is shared
/// read-only across connections.
pub struct CardRouter {
    domains: DomainMap,
    shortcuts: HashMap<Kind, Shortcuts>,
    assets: BoxedFetch,
    origin: BoxedFetch,
    default_scheme: String,
}

impl CardRouter {
    /// A router over `domains`. Both collaborators answer `404` until set.
    pub fn new(domains: DomainMap) -> Self {
        Self {
            domains,
            shortcuts: Kind::ALL.into_iter().map(|k| (k, Shortcuts::for_kind(k))).collect(),
            assets: fetch::not_found(),
            origin: fetch::not_found(),
            default_scheme: "https".to_owned(),
        }
    }

    /// The asset store, asked for rewritten shortcut paths.
    pub fn assets(mut self, assets: impl Fetch) -> Self {
        self.assets = assets.into_boxed_fetch();
        self
    }

    /// The origin, asked for every request the router does not rewrite.
    pub fn origin(mut self, origin: impl Fetch) -> Self {
        self.origin = origin.into_boxed_fetch();
        self
    }

    /// Scheme used in redirect locations when neither the request URI nor
    /// `X-Forwarded-Proto` names one.
    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }

    pub fn domains(&self) -> &DomainMap {
        &self.domains
    }

    /// Pure classification of one request.
    pub fn classify(&self, method: &Method, host: &str, path: &str) -> Disposition {
        if *method == Method::OPTIONS {
            return Disposition::Preflight;
        }

        let Some(kind) = self.domains.resolve(host) else {
            return Disposition::Unmapped;
        };

        if path.is_empty() || path == "/" {
            return Disposition::Root { kind };
        }

        match self.shortcuts.get(&kind).and_then(|s| s.rewrite(path)) {
            Some(rewrite) => Disposition::Shortcut { kind, rewrite },
            None => Disposition::Passthrough { kind },
        }
    }

    /// Routes one request and produces one response. Never fails.
    pub async fn handle(&self, req: Request) -> Response {
        let target = Target::of(&req, &self.default_scheme);
        let disposition = self.classify(req.method(), &target.host, &target.path);

        debug!(
            method = %req.method(),
            host = %target.host,
            path = %target.path,
            ?disposition,
            "route"
        );

        match disposition {
            Disposition::Preflight => response::preflight(),

            Disposition::Root { kind } => {
                let index = format!("/v1/{kind}/index.json");
                let res = if target.authority.is_empty() {
                    response::found(&index, &index)
                } else {
                    response::found(&format!("{}{index}", target.origin()), &index)
                };
                cors::decorate(res, None)
            }

            Disposition::Shortcut { rewrite, .. } => {
                let req = request::rewrite(req, &rewrite.path);
                let res = self.assets.call(req).await;
                cors::decorate(res, Some(&rewrite.path))
            }

            Disposition::Unmapped | Disposition::Passthrough { .. } => {
                let res = self.origin.call(req).await;
                cors::decorate(res, Some(&target.path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::Rule;

    fn router() -> CardRouter {
        CardRouter::new(DomainMap::builtin())
    }

    #[test]
    fn options_is_preflight_on_every_host() {
        let r = router();
        for host in ["agentcard.cc", "preview.pages.dev", ""] {
            assert_eq!(r.classify(&Method::OPTIONS, host, "/"), Disposition::Preflight);
            assert_eq!(r.classify(&Method::OPTIONS, host, "/bot.json"), Disposition::Preflight);
        }
    }

    #[test]
    fn unmapped_host_skips_every_rewrite() {
        let r = router();
        for path in ["/", "/bot.json", "/bot/a2a.json", "/v1/agents/index.json"] {
            assert_eq!(r.classify(&Method::GET, "preview.pages.dev", path), Disposition::Unmapped);
        }
    }

    #[test]
    fn root_redirects_per_kind() {
        let r = router();
        assert_eq!(r.classify(&Method::GET, "teamcard.cc", "/"), Disposition::Root { kind: Kind::Teams });
        assert_eq!(r.classify(&Method::GET, "skillscard.cc", ""), Disposition::Root { kind: Kind::Skills });
    }

    #[test]
    fn a2a_beats_passthrough_on_agents_only() {
        let r = router();
        match r.classify(&Method::GET, "agentcard.cc", "/bot/a2a.json") {
            Disposition::Shortcut { kind: Kind::Agents, rewrite } => assert_eq!(rewrite.rule, Rule::A2a),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            r.classify(&Method::GET, "skillscard.cc", "/foo/a2a.json"),
            Disposition::Passthrough { kind: Kind::Skills }
        );
    }

    #[test]
    fn v1_paths_pass_through() {
        let r = router();
        assert_eq!(
            r.classify(&Method::GET, "agentcard.cc", "/v1/agents/index.json"),
            Disposition::Passthrough { kind: Kind::Agents }
        );
    }

    #[test]
    fn non_get_methods_still_follow_the_rules() {
        let r = router();
        assert!(matches!(
            r.classify(&Method::POST, "teamcard.cc", "/ops.json"),
            Disposition::Shortcut { kind: Kind::Teams, .. }
        ));
    }
}
