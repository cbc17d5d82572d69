use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use ts_core::ports::{SessionError, SessionPort, TempCollectionActionsPort};
use ts_core::{ActionError, OnboardingState, PersistedEnvelope, StorageKey};

/// Name used when the principal has no display name.
pub const ANONYMOUS_NAME: &str = "Anonymous";

#[derive(Debug, Error)]
pub enum InitialStateError {
    #[error("no authenticated principal")]
    Unauthenticated,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("failed to load onboarding state: {0}")]
    Action(#[from] ActionError),
}

/// Builds the state a freshly opened onboarding context starts from.
pub struct LoadInitialOnboardingState {
    actions: Arc<dyn TempCollectionActionsPort>,
    sessions: Arc<dyn SessionPort>,
}

impl LoadInitialOnboardingState {
    pub fn new(actions: Arc<dyn TempCollectionActionsPort>, sessions: Arc<dyn SessionPort>) -> Self {
        Self { actions, sessions }
    }

    /// Persisted state when there is some, otherwise the default record with
    /// the name prefilled from the principal.
    pub async fn execute(&self) -> Result<OnboardingState, InitialStateError> {
        let principal = self
            .sessions
            .current_principal()
            .await?
            .ok_or(InitialStateError::Unauthenticated)?;

        let stored = self
            .actions
            .get_temp_collection(StorageKey::Onboarding.storage_name())
            .await?;

        if let Some(raw) = stored {
            match PersistedEnvelope::from_json(&raw) {
                Ok(envelope) => {
                    debug!(principal = %principal.id, "starting from persisted onboarding state");
                    return Ok(envelope.state);
                }
                Err(e) => {
                    warn!(principal = %principal.id, error = %e, "ignoring unreadable onboarding state");
                }
            }
        }

        let mut state = OnboardingState::default();
        state.onboarding_info.name = principal
            .display_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ts_core::{ActionResult, ActionVerb, Principal};

    mockall::mock! {
        pub Actions {}

        #[async_trait]
        impl TempCollectionActionsPort for Actions {
            async fn get_temp_collection(&self, name: &str) -> ActionResult<Option<String>>;
            async fn set_temp_collection(&self, name: &str, value: &str) -> ActionResult<()>;
            async fn remove_temp_collection(&self, name: &str) -> ActionResult<()>;
        }
    }

    mockall::mock! {
        pub Sessions {}

        #[async_trait]
        impl SessionPort for Sessions {
            async fn current_principal(&self) -> Result<Option<Principal>, SessionError>;
        }
    }

    fn signed_in(display_name: Option<&'static str>) -> MockSessions {
        let mut sessions = MockSessions::new();
        sessions.expect_current_principal().returning(move || {
            let principal = Principal::new("user-1");
            Ok(Some(match display_name {
                Some(name) => principal.with_display_name(name),
                None => principal,
            }))
        });
        sessions
    }

    fn actions_returning(value: Option<String>) -> MockActions {
        let mut actions = MockActions::new();
        actions
            .expect_get_temp_collection()
            .withf(|name| name == "onboarding-storage")
            .times(1)
            .returning(move |_| Ok(value.clone()));
        actions
    }

    #[tokio::test]
    async fn persisted_state_wins() {
        let mut persisted = OnboardingState::default();
        persisted.onboarding_info.name = "Saved".to_string();
        persisted.is_complete = true;
        let raw = PersistedEnvelope::new(persisted.clone()).to_json().unwrap();

        let usecase = LoadInitialOnboardingState::new(
            Arc::new(actions_returning(Some(raw))),
            Arc::new(signed_in(Some("Display"))),
        );

        assert_eq!(usecase.execute().await.unwrap(), persisted);
    }

    #[tokio::test]
    async fn falls_back_to_display_name() {
        let usecase = LoadInitialOnboardingState::new(
            Arc::new(actions_returning(None)),
            Arc::new(signed_in(Some("Jane"))),
        );

        let state = usecase.execute().await.unwrap();

        assert_eq!(state.onboarding_info.name, "Jane");
        assert!(!state.is_complete);
    }

    #[tokio::test]
    async fn falls_back_to_anonymous() {
        let usecase = LoadInitialOnboardingState::new(
            Arc::new(actions_returning(None)),
            Arc::new(signed_in(None)),
        );

        assert_eq!(usecase.execute().await.unwrap().onboarding_info.name, ANONYMOUS_NAME);
    }

    #[tokio::test]
    async fn empty_display_name_counts_as_missing() {
        let usecase = LoadInitialOnboardingState::new(
            Arc::new(actions_returning(None)),
            Arc::new(signed_in(Some(""))),
        );

        assert_eq!(usecase.execute().await.unwrap().onboarding_info.name, ANONYMOUS_NAME);
    }

    #[tokio::test]
    async fn unauthenticated_skips_the_read() {
        let mut actions = MockActions::new();
        actions.expect_get_temp_collection().never();
        let mut sessions = MockSessions::new();
        sessions.expect_current_principal().returning(|| Ok(None));

        let usecase = LoadInitialOnboardingState::new(Arc::new(actions), Arc::new(sessions));

        assert!(matches!(
            usecase.execute().await,
            Err(InitialStateError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn action_failure_surfaces() {
        let mut actions = MockActions::new();
        actions
            .expect_get_temp_collection()
            .returning(|_| Err(ActionError::Failed(ActionVerb::Get)));

        let usecase = LoadInitialOnboardingState::new(
            Arc::new(actions),
            Arc::new(signed_in(Some("Jane"))),
        );

        match usecase.execute().await {
            Err(InitialStateError::Action(e)) => {
                assert_eq!(e.to_string(), "Failed to get temp collection")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreadable_state_falls_back_to_default() {
        let usecase = LoadInitialOnboardingState::new(
            Arc::new(actions_returning(Some("{broken".to_string()))),
            Arc::new(signed_in(Some("Jane"))),
        );

        assert_eq!(usecase.execute().await.unwrap().onboarding_info.name, "Jane");
    }
}
