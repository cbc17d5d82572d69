//! Wire envelopes wrapping [`OnboardingState`] for persistence and broadcast.

use serde::{Deserialize, Serialize};

use crate::ids::StoreInstanceId;
use crate::onboarding::OnboardingState;

/// Schema marker written alongside persisted state.
pub const PERSISTED_STATE_VERSION: u32 = 0;

/// Persisted form of a store: one opaque string per principal per collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEnvelope {
    pub state: OnboardingState,
    #[serde(default)]
    pub version: u32,
}

impl PersistedEnvelope {
    pub fn new(state: OnboardingState) -> Self {
        Self {
            state,
            version: PERSISTED_STATE_VERSION,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// State change published to other execution contexts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastEnvelope {
    pub source: StoreInstanceId,
    pub state: OnboardingState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_envelope_nests_state_under_state_key() {
        let raw = PersistedEnvelope::new(OnboardingState::default())
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(value["version"], serde_json::json!(0));
        assert_eq!(value["state"]["isComplete"], serde_json::json!(false));
    }

    #[test]
    fn envelope_without_version_defaults_to_zero() {
        let raw = r#"{"state":{"onboardingInfo":{"name":"Ann","hobby":"Food","age":3},"isComplete":false}}"#;
        let envelope = PersistedEnvelope::from_json(raw).unwrap();

        assert_eq!(envelope.version, 0);
        assert_eq!(envelope.state.onboarding_info.name, "Ann");
    }
}
