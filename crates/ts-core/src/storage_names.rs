//! Client-visible storage names.
//!
//! These are the only names a client store may use. Which server collection
//! each one lands in is decided on the server side and is not exposed here.

use std::fmt;

/// Stores that persist through the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Onboarding,
}

impl StorageKey {
    pub const ALL: [StorageKey; 1] = [StorageKey::Onboarding];

    pub fn storage_name(&self) -> &'static str {
        match self {
            StorageKey::Onboarding => "onboarding-storage",
        }
    }

    pub fn from_storage_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.storage_name() == name)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_name())
    }
}
