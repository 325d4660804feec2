use serde::{Deserialize, Serialize};
use std::fmt;

/// Who is using the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Nobody signed in.
    #[default]
    Guest,
    Customer,
    Admin,
    Agent,
    ContentManager,
    Fulfillment,
}

impl Role {
    /// Maps a staff account's free-text `position` to a role.
    ///
    /// Case, spaces, hyphens and underscores are ignored. Returns `None` for
    /// positions with no panel.
    pub fn from_position(position: &str) -> Option<Role> {
        let normalized: String = position
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "admin" | "administrator" | "superadmin" => Some(Role::Admin),
            "agent" | "salesagent" => Some(Role::Agent),
            "contentmanager" | "content" => Some(Role::ContentManager),
            "fulfillment" | "fulfilment" | "delivery" | "deliveryman" => Some(Role::Fulfillment),
            _ => None,
        }
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Guest | Role::Customer)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Guest => write!(f, "guest"),
            Role::Customer => write!(f, "customer"),
            Role::Admin => write!(f, "admin"),
            Role::Agent => write!(f, "agent"),
            Role::ContentManager => write!(f, "content_manager"),
            Role::Fulfillment => write!(f, "fulfillment"),
        }
    }
}
