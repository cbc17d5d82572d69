use std::fmt;

use serde::{Deserialize, Serialize};

/// Onboarding steps, one per [`super::OnboardingInfo`] field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStep {
    Name,
    Hobby,
    Age,
    Description,
}

/// Where the flow goes after a step is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDestination {
    Step(OnboardingStep),
    Summary,
}

impl OnboardingStep {
    pub const ORDER: [OnboardingStep; 4] = [
        OnboardingStep::Name,
        OnboardingStep::Hobby,
        OnboardingStep::Age,
        OnboardingStep::Description,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Name => "name",
            OnboardingStep::Hobby => "hobby",
            OnboardingStep::Age => "age",
            OnboardingStep::Description => "description",
        }
    }

    pub fn next(&self) -> Option<OnboardingStep> {
        match self {
            OnboardingStep::Name => Some(OnboardingStep::Hobby),
            OnboardingStep::Hobby => Some(OnboardingStep::Age),
            OnboardingStep::Age => Some(OnboardingStep::Description),
            OnboardingStep::Description => None,
        }
    }

    pub fn destination_after(&self) -> StepDestination {
        self.next()
            .map(StepDestination::Step)
            .unwrap_or(StepDestination::Summary)
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
