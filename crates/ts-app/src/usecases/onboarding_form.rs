use tracing::debug;
use ts_core::onboarding::{validate_step, FieldInput, StepDestination, ValidationError};
use ts_core::OnboardingStep;

use crate::store::OnboardingStore;

/// Form state for a single onboarding step.
///
/// Values always reach the store, valid or not; the form only tracks the
/// validation message to show and decides where "continue" leads.
pub struct OnboardingForm {
    store: OnboardingStore,
    step: OnboardingStep,
    error: Option<ValidationError>,
}

impl OnboardingForm {
    pub fn new(store: OnboardingStore, step: OnboardingStep) -> Self {
        Self {
            store,
            step,
            error: None,
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Value of this step's field as currently held by the store.
    pub fn current_value(&self) -> FieldInput {
        self.store
            .select(|state| FieldInput::from_info(&state.onboarding_info, self.step))
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Forward `value` to the store, recording its validation message if it
    /// has one. A recorded message stays until `continue_step` passes.
    pub fn update_value(&mut self, value: impl Into<FieldInput>) {
        let value = value.into();
        if let Err(e) = validate_step(self.step, &value) {
            self.error = Some(e);
        }
        self.store.set_onboarding_info(value.into_update(self.step));
    }

    /// Validate the stored value and work out the next destination.
    pub fn continue_step(&mut self) -> Result<StepDestination, ValidationError> {
        let current = self.current_value();
        if let Err(e) = validate_step(self.step, &current) {
            debug!(step = %self.step, message = e.message, "cannot continue onboarding step");
            self.error = Some(e.clone());
            return Err(e);
        }

        self.error = None;
        Ok(self.step.destination_after())
    }
}
