//! Common types for the shared crate
//!
//! Caller identity as resolved by the external authentication layer. The
//! core never parses credentials; every operation receives a [`Requester`].

use serde::{Deserialize, Serialize};

/// Caller role, resolved by the authentication collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Organizer,
    Admin,
}

impl Role {
    /// Admins see and cancel everything.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Admins and organizers may inspect reservations they do not own.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Organizer)
    }
}

/// Authenticated caller of a core operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    pub user_id: String,
    pub role: Role,
}

impl Requester {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    /// Ownership check against a row's `user_id`.
    pub fn owns(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
