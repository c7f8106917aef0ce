//! Downstream collaborators and type erasure.
//!
//! # How collaborators are stored
//!
//! The router talks to two downstream handlers: the **asset store**, which
//! answers rewritten shortcut requests, and the **origin**, which answers
//! everything the router leaves alone. Each can be any async function, so
//! the router holds them as trait objects (`dyn ErasedFetch`) behind one
//! common interface.
//!
//! ```text
//! async fn assets(req: Request) -> Response { … }   ← user writes this
//!        ↓ CardRouter::new(map).assets(assets)
//! assets.into_boxed_fetch()                         ← Fetch blanket impl
//!        ↓
//! Arc::new(FnFetch(assets))                         ← heap-allocated wrapper
//!        ↓  stored as BoxedFetch = Arc<dyn ErasedFetch>
//! fetch.call(req)  at request time                  ← one vtable dispatch
//! ```
//!
//! Per request the router makes at most one such call. It adds no retry,
//! timeout or cancellation: latency and failures belong to the collaborator.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{self, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Fetch` trait's `into_boxed_fetch` method.
#[doc(hidden)]
pub trait ErasedFetch {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased collaborator shared across concurrent requests.
#[doc(hidden)]
pub type BoxedFetch = Arc<dyn ErasedFetch + Send + Sync + 'static>;

// ── Public Fetch trait ────────────────────────────────────────────────────────

/// Implemented for every valid collaborator.
///
/// Satisfied automatically by any function or closure with the shape:
///
/// ```text
/// Fn(Request) -> impl Future<Output = Response> + Send
/// ```
///
/// Sealed: only the blanket impl below can satisfy it.
pub trait Fetch: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_fetch(self) -> BoxedFetch;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
}

impl<F, Fut> Fetch for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn into_boxed_fetch(self) -> BoxedFetch {
        Arc::new(FnFetch(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

struct FnFetch<F>(F);

impl<F, Fut> ErasedFetch for FnFetch<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        Box::pin((self.0)(req))
    }
}

/// Stand-in used until a collaborator is configured: every path is unknown.
pub(crate) fn not_found() -> BoxedFetch {
    (|_req: Request| async { response::not_found() }).into_boxed_fetch()
}
