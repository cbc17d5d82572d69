//! Onboarding domain models
//!
//! This module defines the state record collected by the onboarding flow,
//! the ordered steps that fill it, and the per-step validation rules.

mod model;
pub mod step;
pub mod validation;

pub use model::{Hobby, OnboardingInfo, OnboardingState, OnboardingUpdate, UnknownHobby};
pub use step::{OnboardingStep, StepDestination};
pub use validation::{validate_step, FieldInput, ValidationError};
