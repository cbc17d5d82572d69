//! Two-context walkthrough of the onboarding flow.
//!
//! Context A fills the form step by step, context B follows through the bus,
//! and the persisted copy is read back the way a freshly opened context
//! would see it.

use std::time::Duration;

use anyhow::Context;
use tokio::time::sleep;
use tracing::{info, warn};
use ts_app::store::OnboardingStoreProvider;
use ts_app::usecases::{LoadInitialOnboardingState, OnboardingForm};
use ts_core::onboarding::{FieldInput, StepDestination};
use ts_core::{Hobby, OnboardingState, OnboardingStep};

use crate::bootstrap::{create_onboarding_store, AppDeps};

const SETTLE: Duration = Duration::from_millis(50);

/// Run the walkthrough and return the state a new context would start from.
pub async fn run(deps: AppDeps) -> anyhow::Result<OnboardingState> {
    let loader = LoadInitialOnboardingState::new(deps.actions.clone(), deps.sessions.clone());
    let initial = loader
        .execute()
        .await
        .context("Failed to load initial onboarding state")?;
    info!(name = %initial.onboarding_info.name, "initial onboarding state loaded");

    let context_a = OnboardingStoreProvider::new();
    let context_b = OnboardingStoreProvider::new();
    context_a.provide(|| create_onboarding_store(&deps, initial.clone()));
    context_b.provide(|| create_onboarding_store(&deps, initial.clone()));

    let answers = [
        (
            OnboardingStep::Name,
            FieldInput::Text(initial.onboarding_info.name.clone()),
        ),
        (OnboardingStep::Hobby, FieldInput::from(Hobby::Music.as_str())),
        (OnboardingStep::Age, FieldInput::Number(28)),
        (OnboardingStep::Description, FieldInput::from("Likes quiet mornings")),
    ];

    for (step, value) in answers {
        let mut form = OnboardingForm::new(context_a.store()?, step);
        form.update_value(value);
        match form.continue_step() {
            Ok(StepDestination::Step(next)) => info!(%step, %next, "step accepted"),
            Ok(StepDestination::Summary) => info!(%step, "onboarding form finished"),
            Err(e) => {
                warn!(%step, error = %e, "step rejected");
                break;
            }
        }
    }

    sleep(SETTLE).await;
    let (age_b, complete_b) =
        context_b.select(|state| (state.onboarding_info.age, state.is_complete))?;
    info!(age = age_b, is_complete = complete_b, "context B after sync");

    // let the debounced write land before reading back
    sleep(deps.persist_debounce + SETTLE).await;

    let reopened = loader
        .execute()
        .await
        .context("Failed to reload onboarding state")?;
    info!(
        name = %reopened.onboarding_info.name,
        is_complete = reopened.is_complete,
        "persisted onboarding state"
    );
    Ok(reopened)
}
