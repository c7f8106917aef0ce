//! HTTP server and graceful shutdown.
//!
//! # Graceful shutdown
//!
//! On **SIGTERM** or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::body::{self, Body};
use crate::error::Error;
use crate::router::CardRouter;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// ```rust
    /// use cardroute::Server;
    /// let server = Server::bind("0.0.0.0:8788").unwrap();
    /// ```
    pub fn bind(addr: &str) -> Result<Self, Error> {
        let addr = addr.parse::<SocketAddr>().map_err(|source| Error::InvalidAddr {
            addr: addr.to_owned(),
            source,
        })?;
        Ok(Self { addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve(self, router: CardRouter) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        // One routing table shared by every connection task.
        let router = Arc::new(router);

        info!(addr = %self.addr, domains = router.domains().len(), "cardroute listening");

        let mut tasks = tokio::task::JoinSet::new();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                // Check shutdown first so a SIGTERM stops accepting at once,
                // even if more connections are queued.
                biased;

                () = &mut shutdown => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, remote_addr) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    // hyper speaks its own IO traits; TokioIo adapts the
                    // tokio stream to them.
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // service_fn turns the closure into a hyper Service.
                        // It runs once per request, not once per connection,
                        // so keep-alive and HTTP/2 streams all route here.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req).await }
                        });

                        // HTTP/1.1 or HTTP/2, whichever the client speaks.
                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(peer = %remote_addr, "connection error: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("cardroute stopped");
        Ok(())
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response. Hyper never sees an error:
/// every outcome, 404 included, is a response.
async fn dispatch(
    router: Arc<CardRouter>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Body>, std::convert::Infallible> {
    let req = req.map(body::incoming);
    Ok(router.handle(req).await)
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C). On
/// Windows only Ctrl-C is available. A handler that cannot be installed is
/// logged and its arm never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl-C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
