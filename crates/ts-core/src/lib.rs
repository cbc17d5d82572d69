//! # ts-core
//!
//! Core domain models and ports for TempSync.
//!
//! This crate contains the onboarding state record, the wire envelopes and
//! the port traits, without any infrastructure dependencies.

pub mod action;
pub mod config;
pub mod envelope;
pub mod ids;
pub mod onboarding;
pub mod ports;
pub mod principal;
pub mod storage_names;

// Re-export commonly used types at the crate root
pub use action::{ActionError, ActionResponse, ActionResult, ActionVerb};
pub use envelope::{BroadcastEnvelope, PersistedEnvelope};
pub use ids::{PrincipalId, StoreInstanceId};
pub use onboarding::{Hobby, OnboardingInfo, OnboardingState, OnboardingStep, OnboardingUpdate};
pub use principal::Principal;
pub use storage_names::StorageKey;
