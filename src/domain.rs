//! Hostname → kind table.
//!
//! The table is built once at startup and never written again, so the router
//! can share it across every connection task without locking.

use std::collections::HashMap;

use crate::error::Error;
use crate::kind::Kind;

const BUILTIN: [(&str, Kind); 3] = [
    ("agentcard.cc",  Kind::Agents),
    ("skillscard.cc", Kind::Skills),
    ("teamcard.cc",   Kind::Teams),
];

/// Immutable mapping from fully-qualified hostname to the [`Kind`] it serves.
#[derive(Clone, Debug)]
pub struct DomainMap {
    hosts: HashMap<String, Kind>,
}

impl DomainMap {
    /// The three production domains.
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .fold(Self::empty(), |map, (host, kind)| map.with(*host, *kind))
    }

    /// A table with no mapped hosts. Every request is treated as unmapped.
    pub fn empty() -> Self {
        Self { hosts: HashMap::new() }
    }

    /// Adds (or replaces) one mapping. Returns `self` for chaining.
    pub fn with(mut self, host: impl Into<String>, kind: Kind) -> Self {
        self.hosts.insert(host.into(), kind);
        self
    }

    /// Exact-match lookup. No case folding, no port stripping: the caller
    /// passes the hostname exactly as the transport delivered it.
    pub fn resolve(&self, host: &str) -> Option<Kind> {
        self.hosts.get(host).copied()
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

impl Default for DomainMap {
    fn default() -> Self { Self::builtin() }
}

/// Parses a `host=kind` mapping, e.g. `agents.localhost=agents`.
pub fn parse_mapping(s: &str) -> Result<(String, Kind), Error> {
    let (host, kind) = s
        .split_once('=')
        .ok_or_else(|| Error::InvalidMapping(s.to_owned()))?;
    let host = host.trim();
    if host.is_empty() {
        return Err(Error::InvalidMapping(s.to_owned()));
    }
    Ok((host.to_owned(), kind.trim().parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_maps_the_three_domains() {
        let map = DomainMap::builtin();
        assert_eq!(map.len(), 3);
        assert_eq!(map.resolve("agentcard.cc"), Some(Kind::Agents));
        assert_eq!(map.resolve("skillscard.cc"), Some(Kind::Skills));
        assert_eq!(map.resolve("teamcard.cc"), Some(Kind::Teams));
    }

    #[test]
    fn resolve_is_exact_match() {
        let map = DomainMap::builtin();
        assert_eq!(map.resolve("AgentCard.cc"), None);
        assert_eq!(map.resolve("agentcard.cc:443"), None);
        assert_eq!(map.resolve("www.agentcard.cc"), None);
        assert_eq!(map.resolve("cardroute.pages.dev"), None);
    }

    #[test]
    fn with_replaces_existing_host() {
        let map = DomainMap::builtin().with("agentcard.cc", Kind::Teams);
        assert_eq!(map.resolve("agentcard.cc"), Some(Kind::Teams));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn empty_map_resolves_nothing() {
        let map = DomainMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.resolve("agentcard.cc"), None);
    }

    #[test]
    fn parse_mapping_accepts_host_and_kind() {
        let (host, kind) = parse_mapping("skills.localhost=skills").unwrap();
        assert_eq!(host, "skills.localhost");
        assert_eq!(kind, Kind::Skills);
    }

    #[test]
    fn parse_mapping_rejects_malformed_input() {
        assert!(matches!(parse_mapping("agentcard.cc"), Err(Error::InvalidMapping(_))));
        assert!(matches!(parse_mapping("=agents"), Err(Error::InvalidMapping(_))));
        assert!(matches!(parse_mapping("agentcard.cc=robots"), Err(Error::UnknownKind(_))));
    }
}
