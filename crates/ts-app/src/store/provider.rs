use std::sync::OnceLock;

use super::error::StoreError;
use super::onboarding_store::OnboardingStore;
use ts_core::OnboardingState;

/// Owns the onboarding store for one execution context.
///
/// The store is built on the first [`provide`](Self::provide) call; later
/// calls hand back the same store and never run their initializer.
#[derive(Default)]
pub struct OnboardingStoreProvider {
    store: OnceLock<OnboardingStore>,
}

impl OnboardingStoreProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide<F>(&self, init: F) -> OnboardingStore
    where
        F: FnOnce() -> OnboardingStore,
    {
        self.store.get_or_init(init).clone()
    }

    pub fn store(&self) -> Result<OnboardingStore, StoreError> {
        self.store.get().cloned().ok_or(StoreError::NotInitialized)
    }

    /// Project the current state through `selector`.
    pub fn select<T>(&self, selector: impl FnOnce(&OnboardingState) -> T) -> Result<T, StoreError> {
        let store = self.store.get().ok_or(StoreError::NotInitialized)?;
        Ok(store.select(selector))
    }

    pub fn is_provided(&self) -> bool {
        self.store.get().is_some()
    }
}
