//! Document kind as a typed enum.
//!
//! Each public domain serves exactly one kind of card. The tag doubles as the
//! directory name under `/v1/`, so `Kind::Agents` lives at `/v1/agents/...`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The category of card a domain serves.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    Agents,
    Skills,
    Teams,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Agents, Kind::Skills, Kind::Teams];

    /// Returns the path tag (e.g. `"agents"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Skills => "skills",
            Self::Teams  => "teams",
        }
    }
}

/// Parses a path tag. Case-sensitive: `"Agents"` is rejected.
impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "agents" => Ok(Self::Agents),
            "skills" => Ok(Self::Skills),
            "teams"  => Ok(Self::Teams),
            other    => Err(Error::UnknownKind(other.to_owned())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!(matches!("Agents".parse::<Kind>(), Err(Error::UnknownKind(s)) if s == "Agents"));
        assert!("agent".parse::<Kind>().is_err());
        assert!("".parse::<Kind>().is_err());
    }
}
