//! Resolved CORS policy.
//!
//! Build once from [`CorsSettings`], then share via `Arc`. The store is never
//! mutated after construction; a configuration reload builds a new one.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::matcher::{ActionMatcher, PatternMatcher};

/// Wildcard origin entry.
pub const ANY_ORIGIN: &str = "*";

/// `max_age` sentinel meaning "omit Access-Control-Max-Age".
pub const NO_MAX_AGE: i64 = -1;

/// `apicors` configuration section. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsSettings {
    #[serde(default)]
    pub disabled: bool,

    #[serde(default = "default_allow_origins")]
    pub allow_origins: Vec<String>,

    #[serde(default)]
    pub allow_credentials: bool,

    #[serde(default = "default_max_age")]
    pub max_age: i64,

    #[serde(default)]
    pub actions: ActionSettings,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            disabled: false,
            allow_origins: default_allow_origins(),
            allow_credentials: false,
            max_age: default_max_age(),
            actions: ActionSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionSettings {
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<String>,

    #[serde(default)]
    pub blacklist: Vec<String>,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            whitelist: default_whitelist(),
            blacklist: Vec::new(),
        }
    }
}

fn default_allow_origins() -> Vec<String> {
    vec![ANY_ORIGIN.into()]
}
fn default_max_age() -> i64 {
    NO_MAX_AGE
}
fn default_whitelist() -> Vec<String> {
    vec!["*".into()]
}

/// Policy fields, only present when CORS handling is enabled.
pub struct CorsPolicy {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: i64,
    pub action_matcher: Arc<dyn ActionMatcher>,
}

impl fmt::Debug for CorsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorsPolicy")
            .field("allowed_origins", &self.allowed_origins)
            .field("allow_credentials", &self.allow_credentials)
            .field("max_age", &self.max_age)
            .finish_non_exhaustive()
    }
}

/// Immutable CORS policy store.
#[derive(Debug)]
pub struct PolicyStore {
    policy: Option<CorsPolicy>,
}

impl PolicyStore {
    /// Compile settings into a store. Fails only on an invalid action pattern.
    pub fn from_settings(settings: &CorsSettings) -> Result<Self> {
        if settings.disabled {
            tracing::info!("cors disabled");
            return Ok(Self::disabled());
        }

        let matcher = PatternMatcher::new(&settings.actions.whitelist, &settings.actions.blacklist)?;
        let store = Self::with_matcher(settings, Arc::new(matcher));

        tracing::info!(
            origins = ?settings.allow_origins,
            credentials = settings.allow_credentials,
            max_age = settings.max_age,
            "cors policy built"
        );
        Ok(store)
    }

    /// Build with a caller-supplied matcher; `actions` in `settings` is ignored.
    pub fn with_matcher(settings: &CorsSettings, matcher: Arc<dyn ActionMatcher>) -> Self {
        if settings.disabled {
            return Self::disabled();
        }
        Self {
            policy: Some(CorsPolicy {
                allowed_origins: settings.allow_origins.clone(),
                allow_credentials: settings.allow_credentials,
                max_age: settings.max_age,
                action_matcher: matcher,
            }),
        }
    }

    /// Pass-through store.
    pub fn disabled() -> Self {
        Self { policy: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.policy.is_some()
    }

    pub fn policy(&self) -> Option<&CorsPolicy> {
        self.policy.as_ref()
    }
}
