use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("onboarding store must be used within OnboardingStoreProvider")]
    NotInitialized,
}
