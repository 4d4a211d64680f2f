//! Policy layer: holds the compiled CORS store and swaps it on reload.
//!
//! Requests load a snapshot once and keep it for their whole lifetime, so a
//! reload never changes the policy under an in-flight request.

use std::sync::Arc;

use arc_swap::ArcSwap;

use apicors_core::error::Result;
use apicors_core::policy::{CorsSettings, PolicyStore};

pub struct PolicySlot {
    current: ArcSwap<PolicyStore>,
}

impl PolicySlot {
    pub fn new(store: PolicyStore) -> Self {
        Self {
            current: ArcSwap::from_pointee(store),
        }
    }

    pub fn from_settings(settings: &CorsSettings) -> Result<Self> {
        Ok(Self::new(PolicyStore::from_settings(settings)?))
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<PolicyStore> {
        self.current.load_full()
    }

    /// Build a new store and publish it. On failure the old store stays.
    pub fn rebuild(&self, settings: &CorsSettings) -> Result<()> {
        let store = PolicyStore::from_settings(settings)?;
        self.current.store(Arc::new(store));
        Ok(())
    }
}
