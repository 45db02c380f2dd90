//! Enumerated user roles.
//!
//! Role strings stored on user records are matched exactly against a fixed
//! table of labels and identifiers. Anything else is unknown, and unknown
//! roles get no elevated access.

#[cfg(test)]
#[path = "role_test.rs"]
mod role_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RoleError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    HrManager,
    Manager,
    Employee,
}

const ROLE_TABLE: [(Role, &str, &str); 4] = [
    (Role::Admin, "admin", "Admin"),
    (Role::HrManager, "hr_manager", "HR Manager"),
    (Role::Manager, "manager", "Manager"),
    (Role::Employee, "employee", "Employee"),
];

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::HrManager, Role::Manager, Role::Employee];

    /// Stable identifier (`"hr_manager"`).
    #[must_use]
    pub fn id(self) -> &'static str {
        ROLE_TABLE.iter().find(|(role, _, _)| *role == self).map_or("", |(_, id, _)| *id)
    }

    /// Human-readable label (`"HR Manager"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        ROLE_TABLE.iter().find(|(role, _, _)| *role == self).map_or("", |(_, _, label)| *label)
    }

    /// Whether the role may open the assistant's administrative modes.
    #[must_use]
    pub fn can_use_admin_chat(self) -> bool {
        matches!(self, Self::Admin | Self::HrManager)
    }

    /// Whether the role may approve or reject leave requests.
    #[must_use]
    pub fn can_review_leave(self) -> bool {
        !matches!(self, Self::Employee)
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ROLE_TABLE
            .iter()
            .find(|(_, id, label)| raw == *id || raw == *label)
            .map(|(role, _, _)| *role)
            .ok_or_else(|| RoleError::Unknown(raw.to_owned()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
