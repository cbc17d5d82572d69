use async_trait::async_trait;
use ts_core::ports::CompletionEvaluatorPort;
use ts_core::{ActionResult, OnboardingInfo};

use super::ServerActions;

/// Every field must hold a non-empty, non-zero value.
pub fn is_onboarding_complete(info: &OnboardingInfo) -> bool {
    !info.name.is_empty()
        && info.hobby.is_some()
        && info.age != 0
        && info
            .description
            .as_deref()
            .is_some_and(|description| !description.is_empty())
}

#[async_trait]
impl CompletionEvaluatorPort for ServerActions {
    async fn is_onboarding_complete(&self, info: &OnboardingInfo) -> ActionResult<bool> {
        Ok(is_onboarding_complete(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ts_core::{Hobby, OnboardingUpdate};

    fn complete() -> OnboardingInfo {
        OnboardingInfo {
            name: "John".to_string(),
            hobby: Some(Hobby::Art),
            age: 28,
            description: Some("hi".to_string()),
        }
    }

    #[test]
    fn fully_populated_record_is_complete() {
        assert!(is_onboarding_complete(&complete()));
    }

    #[test]
    fn any_empty_field_makes_the_record_incomplete() {
        let blanks = [
            OnboardingUpdate::Name(String::new()),
            OnboardingUpdate::Hobby(None),
            OnboardingUpdate::Age(0),
            OnboardingUpdate::Description(None),
            OnboardingUpdate::Description(Some(String::new())),
        ];

        for blank in blanks {
            let mut info = complete();
            info.apply(blank.clone());
            assert!(!is_onboarding_complete(&info), "{blank:?} should be incomplete");
        }
    }

    #[test]
    fn default_record_is_incomplete() {
        assert!(!is_onboarding_complete(&OnboardingInfo::default()));
    }
}
