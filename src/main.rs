//! cardroute binary: serves the built card tree behind the three domains.
//!
//! Run with:
//!   RUST_LOG=cardroute=debug cargo run -- --root api \
//!       --domain agents.localhost=agents
//!
//! Try:
//!   curl -i -H 'host: agentcard.cc' http://localhost:8788/
//!   curl -i -H 'host: agentcard.cc' http://localhost:8788/support-bot.json
//!   curl -i -H 'host: agentcard.cc' http://localhost:8788/support-bot/a2a.json
//!   curl -i -X OPTIONS http://localhost:8788/anything

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cardroute::{CardRouter, Config, Server, StaticDir};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cardroute=info")),
        )
        .init();

    let config = Config::parse();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<(), cardroute::Error> {
    let server = Server::bind(&config.listen)?;

    let store = Arc::new(StaticDir::new(&config.root));
    if !store.root().is_dir() {
        // Not fatal: every request will 404 until the tree is built.
        info!(root = %store.root().display(), "asset root missing");
    }

    // On the production hosts the origin is the same static tree, reached
    // with the path left as it came in.
    let router = CardRouter::new(config.domain_map())
        .default_scheme(config.scheme.clone())
        .assets(Arc::clone(&store).into_fetch())
        .origin(store.into_fetch());

    server.serve(router).await
}
