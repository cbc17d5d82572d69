use serde::{Deserialize, Serialize};

use super::id_macro::generated_id;

/// Identifies one store instance (one execution context) on the message bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreInstanceId(String);

generated_id!(StoreInstanceId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_instance_gets_a_fresh_id() {
        let a = StoreInstanceId::new();
        let b = StoreInstanceId::default();

        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_str());
        assert!(uuid::Uuid::parse_str(a.as_str()).is_ok());
    }
}
