use async_trait::async_trait;
use tracing::error;
use ts_core::ports::TempCollectionActionsPort;
use ts_core::{ActionError, ActionResult, ActionVerb, PrincipalId};

use super::ServerActions;
use crate::collections::collection_for_storage;

impl ServerActions {
    /// Checks shared by every temp collection action, in order: the storage
    /// name must be mapped, then a principal must be signed in.
    async fn resolve(
        &self,
        name: &str,
        verb: ActionVerb,
    ) -> ActionResult<(PrincipalId, &'static str)> {
        let Some(collection) = collection_for_storage(name) else {
            return Err(ActionError::InvalidCollection);
        };

        match self.sessions.current_principal().await {
            Ok(Some(principal)) => Ok((principal.id, collection)),
            Ok(None) => Err(ActionError::UserNotFound),
            Err(e) => {
                error!(error = %e, %verb, "error resolving session for temp collection");
                Err(ActionError::Failed(verb))
            }
        }
    }
}

#[async_trait]
impl TempCollectionActionsPort for ServerActions {
    async fn get_temp_collection(&self, name: &str) -> ActionResult<Option<String>> {
        let (principal, collection) = self.resolve(name, ActionVerb::Get).await?;

        self.gateway
            .get(&principal, collection)
            .await
            .map_err(|e| {
                error!(error = %e, "error getting temp collection");
                ActionError::Failed(ActionVerb::Get)
            })
    }

    async fn set_temp_collection(&self, name: &str, value: &str) -> ActionResult<()> {
        let (principal, collection) = self.resolve(name, ActionVerb::Set).await?;

        self.gateway
            .set(&principal, collection, value)
            .await
            .map_err(|e| {
                error!(error = %e, "error setting temp collection");
                ActionError::Failed(ActionVerb::Set)
            })
    }

    async fn remove_temp_collection(&self, name: &str) -> ActionResult<()> {
        let (principal, collection) = self.resolve(name, ActionVerb::Remove).await?;

        self.gateway
            .remove(&principal, collection)
            .await
            .map_err(|e| {
                error!(error = %e, "error removing temp collection");
                ActionError::Failed(ActionVerb::Remove)
            })
    }
}
