//! Results of server-executed actions.
//!
//! Everything that crosses the client/server boundary is an
//! [`ActionResult`]. Causes of unexpected failures stay on the server; the
//! client only ever sees the fixed messages below.

use std::fmt;

use serde::{Deserialize, Serialize};

pub type ActionResult<T> = Result<T, ActionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionVerb {
    Get,
    Set,
    Remove,
}

impl fmt::Display for ActionVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionVerb::Get => "get",
            ActionVerb::Set => "set",
            ActionVerb::Remove => "remove",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The storage name is not in the server's allow-list.
    #[error("Invalid collection")]
    InvalidCollection,

    /// No authenticated principal is attached to the call.
    #[error("User not found")]
    UserNotFound,

    #[error("Failed to {0} temp collection")]
    Failed(ActionVerb),

    /// Failure reported by a remote evaluator or transport.
    #[error("{0}")]
    Remote(String),
}

/// Serializable `{success, data?, error?}` form of an [`ActionResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<ActionResult<T>> for ActionResponse<T> {
    fn from(result: ActionResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Self {
                success: false,
                data: None,
                error: Some(error.to_string()),
            },
        }
    }
}

impl<T> ActionResponse<T> {
    /// Converts a response received over the wire back into a result.
    ///
    /// Fixed server messages map back onto their variants; anything else is
    /// kept verbatim as [`ActionError::Remote`].
    pub fn into_result(self) -> ActionResult<Option<T>> {
        if self.success {
            return Ok(self.data);
        }
        let message = self.error.unwrap_or_default();
        let known = [
            ActionError::InvalidCollection,
            ActionError::UserNotFound,
            ActionError::Failed(ActionVerb::Get),
            ActionError::Failed(ActionVerb::Set),
            ActionError::Failed(ActionVerb::Remove),
        ];
        Err(known
            .into_iter()
            .find(|error| error.to_string() == message)
            .unwrap_or(ActionError::Remote(message)))
    }
}
