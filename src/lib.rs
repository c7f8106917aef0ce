//! # cardroute
//!
//! Request routing for a static catalog of cards served on three domains:
//!
//! | Domain | Kind |
//! |---|---|
//! | `agentcard.cc` | `agents` |
//! | `skillscard.cc` | `skills` |
//! | `teamcard.cc` | `teams` |
//!
//! The catalog itself is a pre-built, pre-validated tree of JSON files under
//! `/v1/`. cardroute does not generate or inspect it. For every request it
//! decides which kind applies, expands short URLs to their `/v1/` form, adds
//! CORS headers, and hands the request to the asset store or the origin.
//!
//! - `GET /` → `302` to `/v1/{kind}/index.json`
//! - `GET /{slug}.json` → `/v1/{kind}/{slug}.json`
//! - `GET /{slug}/a2a.json` → `/v1/agents/{slug}/a2a.json` (agents only)
//! - `OPTIONS *` → `204` with CORS headers
//! - anything else → origin, unchanged
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cardroute::{CardRouter, DomainMap, Server, StaticDir};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cardroute::Error> {
//!     let store = Arc::new(StaticDir::new("api"));
//!     let router = CardRouter::new(DomainMap::builtin())
//!         .assets(Arc::clone(&store).into_fetch())
//!         .origin(store.into_fetch());
//!
//!     Server::bind("0.0.0.0:8788")?.serve(router).await
//! }
//! ```

mod assets;
mod body;
mod config;
mod domain;
mod error;
mod fetch;
mod kind;
mod request;
mod response;
mod router;
mod server;
mod shortcut;

pub mod middleware;

pub use assets::StaticDir;
pub use body::{Body, BoxError, empty, full};
pub use config::Config;
pub use domain::{DomainMap, parse_mapping};
pub use error::Error;
pub use fetch::{BoxFuture, Fetch};
pub use kind::Kind;
pub use request::{Request, Target, rewrite};
pub use response::{ContentType, Response};
pub use router::{CardRouter, Disposition};
pub use server::Server;
pub use shortcut::{Rewrite, Rule, Shortcuts, is_slug};

/// Response constructors.
pub mod responses {
    pub use crate::response::{bytes, found, head, method_not_allowed, not_found, preflight, status};
}
