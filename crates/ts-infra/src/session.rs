//! Session provider holding a fixed principal.
//!
//! Stands in for cookie-based session verification: whoever constructs the
//! provider decides who is signed in.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use ts_core::ports::{SessionError, SessionPort};
use ts_core::Principal;

#[derive(Default)]
pub struct StaticSessionProvider {
    principal: RwLock<Option<Principal>>,
}

impl StaticSessionProvider {
    pub fn signed_in(principal: Principal) -> Self {
        Self {
            principal: RwLock::new(Some(principal)),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, principal: Principal) {
        *self.principal.write().unwrap_or_else(PoisonError::into_inner) = Some(principal);
    }

    pub fn sign_out(&self) {
        *self.principal.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl SessionPort for StaticSessionProvider {
    async fn current_principal(&self) -> Result<Option<Principal>, SessionError> {
        self.principal
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))
    }
}
