//! Per-step field validation.
//!
//! Validation never blocks an update on its own: the form layer records the
//! message and still forwards the value, and only refuses to advance.

use super::model::{Hobby, OnboardingInfo, OnboardingUpdate};
use super::step::OnboardingStep;

pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Raw value entered for a step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Empty,
    Text(String),
    Number(i64),
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Text(value)
    }
}

impl From<i64> for FieldInput {
    fn from(value: i64) -> Self {
        FieldInput::Number(value)
    }
}

impl From<Option<String>> for FieldInput {
    fn from(value: Option<String>) -> Self {
        value.map(FieldInput::Text).unwrap_or(FieldInput::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub step: OnboardingStep,
    pub message: &'static str,
}

impl ValidationError {
    fn new(step: OnboardingStep, message: &'static str) -> Self {
        Self { step, message }
    }
}

pub fn validate_step(step: OnboardingStep, input: &FieldInput) -> Result<(), ValidationError> {
    let fail = |message| Err(ValidationError::new(step, message));

    match (step, input) {
        (OnboardingStep::Name, FieldInput::Empty) => fail("Name is required"),
        (OnboardingStep::Name, FieldInput::Text(name)) if name.is_empty() => {
            fail("Name is required")
        }
        (OnboardingStep::Name, FieldInput::Text(_)) => Ok(()),
        (OnboardingStep::Name, FieldInput::Number(_)) => fail("Name is invalid"),

        (OnboardingStep::Hobby, FieldInput::Empty) => fail("Hobby is required"),
        (OnboardingStep::Hobby, FieldInput::Text(text)) => match text.parse::<Hobby>() {
            Ok(_) => Ok(()),
            Err(_) => fail("Hobby is invalid"),
        },
        (OnboardingStep::Hobby, FieldInput::Number(_)) => fail("Hobby is invalid"),

        (OnboardingStep::Age, FieldInput::Empty) => fail("Age is required"),
        (OnboardingStep::Age, FieldInput::Number(age)) if *age < 0 => {
            fail("Age must be positive")
        }
        (OnboardingStep::Age, FieldInput::Number(_)) => Ok(()),
        (OnboardingStep::Age, FieldInput::Text(text)) => match text.trim().parse::<i64>() {
            Ok(age) => validate_step(step, &FieldInput::Number(age)),
            Err(_) => fail("Age must be a number"),
        },

        (OnboardingStep::Description, FieldInput::Empty) => Ok(()),
        (OnboardingStep::Description, FieldInput::Text(text))
            if text.chars().count() > DESCRIPTION_MAX_CHARS =>
        {
            fail("Description is too long")
        }
        (OnboardingStep::Description, FieldInput::Text(_)) => Ok(()),
        (OnboardingStep::Description, FieldInput::Number(_)) => fail("Description is invalid"),
    }
}

impl FieldInput {
    /// Coerces the input into an update for `step`. Values the field cannot
    /// represent collapse to the field's empty value.
    pub fn into_update(self, step: OnboardingStep) -> OnboardingUpdate {
        match step {
            OnboardingStep::Name => OnboardingUpdate::Name(match self {
                FieldInput::Empty => String::new(),
                FieldInput::Text(text) => text,
                FieldInput::Number(n) => n.to_string(),
            }),
            OnboardingStep::Hobby => OnboardingUpdate::Hobby(match self {
                FieldInput::Text(text) => text.parse().ok(),
                FieldInput::Empty | FieldInput::Number(_) => None,
            }),
            OnboardingStep::Age => OnboardingUpdate::Age(match self {
                FieldInput::Number(n) => n,
                FieldInput::Text(text) => text.trim().parse().unwrap_or(0),
                FieldInput::Empty => 0,
            }),
            OnboardingStep::Description => OnboardingUpdate::Description(match self {
                FieldInput::Empty => None,
                FieldInput::Text(text) => Some(text),
                FieldInput::Number(n) => Some(n.to_string()),
            }),
        }
    }

    /// Reads the current value of `step` back out of a record.
    pub fn from_info(info: &OnboardingInfo, step: OnboardingStep) -> Self {
        match step {
            OnboardingStep::Name => FieldInput::Text(info.name.clone()),
            OnboardingStep::Hobby => info
                .hobby
                .map(|hobby| FieldInput::Text(hobby.as_str().to_string()))
                .unwrap_or(FieldInput::Empty),
            OnboardingStep::Age => FieldInput::Number(info.age),
            OnboardingStep::Description => info.description.clone().into(),
        }
    }
}
