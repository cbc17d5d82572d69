use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::step::OnboardingStep;

/// Hobbies offered by the onboarding flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hobby {
    Sports,
    Food,
    Games,
    Travel,
    Music,
    Art,
    Technology,
}

impl Hobby {
    pub const ALL: [Hobby; 7] = [
        Hobby::Sports,
        Hobby::Food,
        Hobby::Games,
        Hobby::Travel,
        Hobby::Music,
        Hobby::Art,
        Hobby::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Hobby::Sports => "Sports",
            Hobby::Food => "Food",
            Hobby::Games => "Games",
            Hobby::Travel => "Travel",
            Hobby::Music => "Music",
            Hobby::Art => "Art",
            Hobby::Technology => "Technology",
        }
    }
}

impl fmt::Display for Hobby {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hobby: {0}")]
pub struct UnknownHobby(pub String);

impl FromStr for Hobby {
    type Err = UnknownHobby;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hobby::ALL
            .into_iter()
            .find(|hobby| hobby.as_str() == s)
            .ok_or_else(|| UnknownHobby(s.to_string()))
    }
}

/// Form fields collected during onboarding.
///
/// Every field is independently default-valued; whether the record is
/// complete is decided by the completion evaluator, never stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hobby: Option<Hobby>,
    #[serde(default)]
    pub age: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for OnboardingInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            hobby: Some(Hobby::Art),
            age: 0,
            description: None,
        }
    }
}

impl OnboardingInfo {
    /// Shallow replace of the single field named by `update`.
    pub fn apply(&mut self, update: OnboardingUpdate) {
        match update {
            OnboardingUpdate::Name(name) => self.name = name,
            OnboardingUpdate::Hobby(hobby) => self.hobby = hobby,
            OnboardingUpdate::Age(age) => self.age = age,
            OnboardingUpdate::Description(description) => self.description = description,
        }
    }
}

/// A single field assignment for [`OnboardingInfo`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingUpdate {
    Name(String),
    Hobby(Option<Hobby>),
    Age(i64),
    Description(Option<String>),
}

impl OnboardingUpdate {
    pub fn step(&self) -> OnboardingStep {
        match self {
            OnboardingUpdate::Name(_) => OnboardingStep::Name,
            OnboardingUpdate::Hobby(_) => OnboardingStep::Hobby,
            OnboardingUpdate::Age(_) => OnboardingStep::Age,
            OnboardingUpdate::Description(_) => OnboardingStep::Description,
        }
    }
}

/// Onboarding store state
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingState {
    pub onboarding_info: OnboardingInfo,
    /// Last result reported by the completion evaluator. May lag
    /// `onboarding_info` until the evaluator answers.
    #[serde(default)]
    pub is_complete: bool,
}
