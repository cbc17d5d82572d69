//! Client-side reactive state for the onboarding flow.

mod error;
mod onboarding_store;
mod provider;

pub use error::StoreError;
pub use onboarding_store::{
    HydrationOutcome, OnboardingStore, OnboardingStoreDeps, OnboardingStoreOptions,
    PERSIST_DEBOUNCE,
};
pub use provider::OnboardingStoreProvider;
