use serde::{Deserialize, Serialize};

use super::id_macro::string_id;

/// Identifier of the authenticated user on whose behalf storage runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

string_id!(PrincipalId);

impl PrincipalId {
    /// Whether the id can be used as a single document path segment.
    ///
    /// Empty ids and ids containing a separator would let one principal
    /// address another principal's namespace.
    pub fn is_path_safe(&self) -> bool {
        !self.0.is_empty() && !self.0.contains('/') && self.0 != "." && self.0 != ".."
    }
}
