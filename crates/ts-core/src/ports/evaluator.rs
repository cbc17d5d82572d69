use async_trait::async_trait;

use crate::action::ActionResult;
use crate::onboarding::OnboardingInfo;

/// Decides whether an onboarding record is complete.
///
/// An incomplete record is `Ok(false)`. `Err` is reserved for failures to
/// run the check at all; callers keep their previous answer in that case.
#[async_trait]
pub trait CompletionEvaluatorPort: Send + Sync {
    async fn is_onboarding_complete(&self, info: &OnboardingInfo) -> ActionResult<bool>;
}
