mod load_initial_state;
mod onboarding_form;

pub use load_initial_state::{InitialStateError, LoadInitialOnboardingState, ANONYMOUS_NAME};
pub use onboarding_form::OnboardingForm;
