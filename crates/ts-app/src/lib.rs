//! TempSync client-side application layer
//!
//! This crate contains the debounced server storage, the reactive onboarding
//! store with its provider, and the onboarding use cases.

pub mod storage;
pub mod store;
pub mod usecases;

pub use storage::{create_server_storage, ServerStorage, ServerStorageOptions};
pub use store::{OnboardingStore, OnboardingStoreDeps, OnboardingStoreOptions, OnboardingStoreProvider};
pub use usecases::{LoadInitialOnboardingState, OnboardingForm};
