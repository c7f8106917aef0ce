//! Command-line and environment configuration.
//!
//! Every flag has a `CARDROUTE_*` environment twin so the same binary runs
//! unchanged under a process manager or a container runtime.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{self, DomainMap};
use crate::error::Error;
use crate::kind::Kind;

/// Serve a pre-built card tree on the agent, skill and team domains.
#[derive(Debug, Clone, Parser)]
#[command(name = "cardroute", version, about)]
pub struct Config {
    /// Socket address to listen on.
    #[arg(long, env = "CARDROUTE_LISTEN", default_value = "0.0.0.0:8788")]
    pub listen: String,

    /// Root of the built tree; `/v1/...` is served from `{root}/v1/...`.
    #[arg(long, env = "CARDROUTE_ROOT", default_value = "api")]
    pub root: PathBuf,

    /// Scheme for redirect locations when the proxy sends no X-Forwarded-Proto.
    #[arg(long, env = "CARDROUTE_SCHEME", default_value = "https")]
    pub scheme: String,

    /// Extra `host=kind` mapping, e.g. `agents.localhost=agents`. Repeatable.
    #[arg(long = "domain", env = "CARDROUTE_DOMAINS", value_delimiter = ',', value_parser = parse_domain)]
    pub domains: Vec<(String, Kind)>,

    /// Start from an empty domain table instead of the three production domains.
    #[arg(long, env = "CARDROUTE_NO_BUILTIN_DOMAINS")]
    pub no_builtin_domains: bool,
}

impl Config {
    /// The immutable domain table for this process.
    pub fn domain_map(&self) -> DomainMap {
        let base = if self.no_builtin_domains {
            DomainMap::empty()
        } else {
            DomainMap::builtin()
        };
        self.domains
            .iter()
            .fold(base, |map, (host, kind)| map.with(host.clone(), *kind))
    }
}

fn parse_domain(s: &str) -> Result<(String, Kind), Error> {
    domain::parse_mapping(s)
}
