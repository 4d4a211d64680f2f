//! Action whitelist/blacklist compilation and matching.
//!
//! Patterns are `*` (any action), exact action names, or globs (`User.*`,
//! `Order.{Get,List}`) compiled with `globset`.

use globset::{Glob, GlobMatcher};

use crate::error::{CorsError, Result};

/// Decides whether an action takes part in CORS processing.
pub trait ActionMatcher: Send + Sync {
    fn matches(&self, action: &str) -> bool;
}

/// Compiled action pattern.
#[derive(Debug, Clone)]
pub enum ActionRule {
    Any,
    Exact(String),
    Glob(GlobMatcher),
}

impl ActionRule {
    pub fn is_match(&self, action: &str) -> bool {
        match self {
            ActionRule::Any => true,
            ActionRule::Exact(s) => s == action,
            ActionRule::Glob(g) => g.is_match(action),
        }
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

pub fn compile_rules(raw: &[String]) -> Result<Vec<ActionRule>> {
    let mut out = Vec::with_capacity(raw.len());
    for s in raw {
        let rule = if s == "*" {
            ActionRule::Any
        } else if has_glob_meta(s) {
            let glob = Glob::new(s)
                .map_err(|e| CorsError::InvalidPattern(format!("{s}: {e}")))?;
            ActionRule::Glob(glob.compile_matcher())
        } else {
            ActionRule::Exact(s.clone())
        };
        out.push(rule);
    }
    Ok(out)
}

pub fn is_listed(rules: &[ActionRule], action: &str) -> bool {
    rules.iter().any(|r| r.is_match(action))
}

/// Whitelist/blacklist matcher. Blacklist takes precedence.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    whitelist: Vec<ActionRule>,
    blacklist: Vec<ActionRule>,
}

impl PatternMatcher {
    pub fn new(whitelist: &[String], blacklist: &[String]) -> Result<Self> {
        Ok(Self {
            whitelist: compile_rules(whitelist)?,
            blacklist: compile_rules(blacklist)?,
        })
    }
}

impl ActionMatcher for PatternMatcher {
    fn matches(&self, action: &str) -> bool {
        is_listed(&self.whitelist, action) && !is_listed(&self.blacklist, action)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn list(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wildcard_matches_everything_including_empty() {
        let m = PatternMatcher::new(&list(&["*"]), &[]).unwrap();
        assert!(m.matches("User.Login"));
        assert!(m.matches(""));
    }

    #[test]
    fn blacklist_beats_whitelist() {
        let m = PatternMatcher::new(&list(&["*"]), &list(&["Admin.Reset"])).unwrap();
        assert!(m.matches("Admin.List"));
        assert!(!m.matches("Admin.Reset"));

        let m = PatternMatcher::new(&list(&["Admin.Reset"]), &list(&["Admin.Reset"])).unwrap();
        assert!(!m.matches("Admin.Reset"));
    }

    #[test]
    fn exact_and_glob_patterns() {
        let m = PatternMatcher::new(&list(&["User.*", "Order.Get"]), &list(&["User.Delete*"]))
            .unwrap();
        assert!(m.matches("User.Login"));
        assert!(m.matches("Order.Get"));
        assert!(!m.matches("Order.GetAll"));
        assert!(!m.matches("User.DeleteAll"));
        assert!(!m.matches("Session.Open"));
    }

    #[test]
    fn empty_whitelist_matches_nothing() {
        let m = PatternMatcher::new(&[], &[]).unwrap();
        assert!(!m.matches("User.Login"));
    }

    #[test]
    fn invalid_glob_is_rejected() {
        let err = PatternMatcher::new(&list(&["User.[a-"]), &[]).unwrap_err();
        assert!(matches!(err, CorsError::InvalidPattern(_)));
    }
}
