//! Actor and role types
//!
//! Every settlement operation is invoked on behalf of an actor. Authorization
//! is a single role check per operation rather than ad hoc conditionals at
//! call sites.

use serde::{Deserialize, Serialize};

/// Store roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Manager,
}

impl Role {
    pub fn is_manager(&self) -> bool {
        matches!(self, Role::Manager)
    }
}

/// The authenticated caller of a settlement operation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: u64,
    pub role: Role,
}

impl Actor {
    pub fn client(id: u64) -> Self {
        Self {
            id,
            role: Role::Client,
        }
    }

    pub fn manager(id: u64) -> Self {
        Self {
            id,
            role: Role::Manager,
        }
    }
}
