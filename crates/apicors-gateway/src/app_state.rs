//! Shared application state for the apicors gateway.
//!
//! - Compiles the CORS policy once at startup (Result instead of panic).
//! - Registers the `cors` error group.
//! - Swaps in a rebuilt policy on reload without blocking requests.

use std::sync::Arc;

use apicors_core::error::{Result, CORS_ERRORS, CORS_ERROR_GROUP};
use apicors_core::policy::{CorsSettings, PolicyStore};

use crate::config::GatewayConfig;
use crate::context::{ActionResolver, QueryActionResolver};
use crate::errors::ErrorRegistry;
use crate::policy::PolicySlot;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    policy: PolicySlot,
    resolver: Arc<dyn ActionResolver>,
    errors: ErrorRegistry,
}

impl AppState {
    /// Build application state with the query-parameter action resolver.
    pub fn new(cfg: &GatewayConfig) -> Result<Self> {
        let resolver = Arc::new(QueryActionResolver::new(cfg.server.action_param.clone()));
        Self::with_resolver(cfg, resolver)
    }

    pub fn with_resolver(cfg: &GatewayConfig, resolver: Arc<dyn ActionResolver>) -> Result<Self> {
        let errors = ErrorRegistry::default();
        errors.register_group(CORS_ERROR_GROUP, CORS_ERRORS);

        let policy = PolicySlot::from_settings(&cfg.apicors)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                policy,
                resolver,
                errors,
            }),
        })
    }

    pub fn policy(&self) -> Arc<PolicyStore> {
        self.inner.policy.load()
    }

    /// Rebuild the policy from new settings. On error the current policy stays.
    pub fn reload(&self, settings: &CorsSettings) -> Result<()> {
        match self.inner.policy.rebuild(settings) {
            Ok(()) => {
                tracing::info!(disabled = settings.disabled, "cors policy reloaded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "cors reload failed; keeping previous policy");
                Err(e)
            }
        }
    }

    pub fn action_resolver(&self) -> Arc<dyn ActionResolver> {
        Arc::clone(&self.inner.resolver)
    }

    pub fn errors(&self) -> &ErrorRegistry {
        &self.inner.errors
    }
}
