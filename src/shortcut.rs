//! Short URL forms and their canonical `/v1/` expansions.
//!
//! | Short form | Canonical | Domains |
//! |---|---|---|
//! | `/{slug}/a2a.json` | `/v1/agents/{slug}/a2a.json` | agents only |
//! | `/{slug}.json` | `/v1/{kind}/{slug}.json` | all |
//!
//! Segment splitting is done by a small radix tree per kind; the slug itself
//! is then checked against an explicit allow-list. A path that fails either
//! step is simply not a shortcut.

use matchit::Router as MatchitRouter;

use crate::kind::Kind;

/// Which short form matched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    A2a,
    Slug,
}

/// A matched shortcut: the rule, the slug it captured and the canonical path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rewrite {
    pub rule: Rule,
    pub slug: String,
    pub path: String,
}

/// The shortcut table for one kind.
pub struct Shortcuts {
    kind: Kind,
    tree: MatchitRouter<Rule>,
}

impl Shortcuts {
    pub fn for_kind(kind: Kind) -> Self {
        let mut tree = MatchitRouter::new();
        if kind == Kind::Agents {
            add(&mut tree, "/{slug}/a2a.json", Rule::A2a);
        }
        add(&mut tree, "/{slug}", Rule::Slug);
        Self { kind, tree }
    }

    /// Returns the canonical path for a shortcut, or `None` to pass through.
    pub fn rewrite(&self, path: &str) -> Option<Rewrite> {
        let matched = self.tree.at(path).ok()?;
        let segment = matched.params.get("slug")?;

        match *matched.value {
            Rule::A2a => is_slug(segment).then(|| Rewrite {
                rule: Rule::A2a,
                slug: segment.to_owned(),
                path: format!("/v1/agents/{segment}/a2a.json"),
            }),
            Rule::Slug => {
                let slug = segment.strip_suffix(".json").filter(|s| is_slug(s))?;
                Some(Rewrite {
                    rule: Rule::Slug,
                    slug: slug.to_owned(),
                    path: format!("/v1/{}/{slug}.json", self.kind),
                })
            }
        }
    }
}

fn add(tree: &mut MatchitRouter<Rule>, path: &str, rule: Rule) {
    tree.insert(path, rule)
        .unwrap_or_else(|e| panic!("invalid shortcut route `{path}`: {e}"));
}

/// `^[a-z0-9][a-z0-9.-]*$`
///
/// Lowercase letters, digits, dot and hyphen; the first byte must not be a
/// dot or hyphen, which rules out hidden files and `..`.
pub fn is_slug(s: &str) -> bool {
    let mut bytes = s.bytes();
    match bytes.next() {
        Some(b) if b.is_ascii_lowercase() || b.is_ascii_digit() => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'.' || b == b'-')
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn slug_allow_list() {
        for ok in ["a", "0", "support-bot", "v1", "a.b-c", "x..", "9-"] {
            assert!(is_slug(ok), "{ok}");
        }
        for bad in ["", ".hidden", "-x", "..", "Upper", "a_b", "a/b", "a%2e", "ünï", "a b"] {
            assert!(!is_slug(bad), "{bad}");
        }
    }

    #[test]
    fn slug_rule_expands_to_kind_directory() {
        let table = Shortcuts::for_kind(Kind::Skills);
        let rw = table.rewrite("/pdf-tools.json").unwrap();
        assert_eq!(rw.rule, Rule::Slug);
        assert_eq!(rw.slug, "pdf-tools");
        assert_eq!(rw.path, "/v1/skills/pdf-tools.json");
    }

    #[test]
    fn a2a_rule_only_exists_for_agents() {
        let agents = Shortcuts::for_kind(Kind::Agents);
        let rw = agents.rewrite("/support-bot/a2a.json").unwrap();
        assert_eq!(rw.rule, Rule::A2a);
        assert_eq!(rw.path, "/v1/agents/support-bot/a2a.json");

        for kind in [Kind::Skills, Kind::Teams] {
            assert_eq!(Shortcuts::for_kind(kind).rewrite("/foo/a2a.json"), None);
        }
    }

    #[test]
    fn every_kind_builds_its_table() {
        for kind in Kind::ALL {
            let table = Shortcuts::for_kind(kind);
            assert_eq!(table.rewrite("/x.json").unwrap().path, format!("/v1/{kind}/x.json"));
        }
    }

    #[test]
    #[should_panic(expected = "invalid shortcut route")]
    fn conflicting_route_panics_at_build_time() {
        let mut tree = MatchitRouter::new();
        add(&mut tree, "/{slug}", Rule::Slug);
        add(&mut tree, "/{slug}", Rule::A2a);
    }

    #[test]
    fn only_the_last_json_suffix_is_stripped() {
        let table = Shortcuts::for_kind(Kind::Teams);
        assert_eq!(table.rewrite("/a.json.json").unwrap().path, "/v1/teams/a.json.json");
    }

    #[test]
    fn v1_json_is_rewritten_literally() {
        let table = Shortcuts::for_kind(Kind::Agents);
        assert_eq!(table.rewrite("/v1.json").unwrap().path, "/v1/agents/v1.json");
    }

    #[test]
    fn non_conforming_paths_are_not_shortcuts() {
        let table = Shortcuts::for_kind(Kind::Agents);
        for path in [
            "/",
            "/.json",
            "/.env.json",
            "/-x.json",
            "/Bot.json",
            "/bot",
            "/bot.JSON",
            "/bot.json/",
            "/v1/agents/bot.json",
            "/v1/agents/index.json",
            "/a/b/a2a.json",
            "/.hidden/a2a.json",
            "/Bot/a2a.json",
            "/bot/a2a.json/",
            "/bot/card.json",
        ] {
            assert_eq!(table.rewrite(path), None, "{path}");
        }
    }

    proptest! {
        #[test]
        fn every_allowed_slug_is_rewritten(slug in "[a-z0-9][a-z0-9.-]{0,24}") {
            for kind in Kind::ALL {
                let rw = Shortcuts::for_kind(kind).rewrite(&format!("/{slug}.json")).unwrap();
                prop_assert_eq!(rw.path, format!("/v1/{kind}/{slug}.json"));
            }
            let rw = Shortcuts::for_kind(Kind::Agents).rewrite(&format!("/{slug}/a2a.json")).unwrap();
            prop_assert_eq!(rw.path, format!("/v1/agents/{slug}/a2a.json"));
        }

        #[test]
        fn leading_dot_or_hyphen_is_never_rewritten(first in "[.-]", rest in "[a-z0-9.-]{0,16}") {
            let table = Shortcuts::for_kind(Kind::Agents);
            prop_assert_eq!(table.rewrite(&format!("/{first}{rest}.json")), None);
            prop_assert_eq!(table.rewrite(&format!("/{first}{rest}/a2a.json")), None);
        }
    }
}
