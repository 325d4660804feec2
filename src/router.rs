//! # Role Router
//!
//! Picks the top-level shell to mount from the session. It holds no state of
//! its own: every navigation asks again with the current [`SessionContext`].

use crate::session::{Role, SessionContext};
use std::fmt;
use tracing::debug;

/// The top-level view trees the client can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shell {
    Storefront,
    AdminPanel,
    AgentPanel,
    ContentPanel,
    FulfillmentPanel,
}

impl fmt::Display for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shell::Storefront => write!(f, "storefront"),
            Shell::AdminPanel => write!(f, "admin"),
            Shell::AgentPanel => write!(f, "agent"),
            Shell::ContentPanel => write!(f, "content"),
            Shell::FulfillmentPanel => write!(f, "fulfillment"),
        }
    }
}

pub struct RoleRouter;

impl RoleRouter {
    /// The shell a session lands in.
    pub fn select(session: &SessionContext) -> Shell {
        let shell = match session.role() {
            Role::Guest | Role::Customer => Shell::Storefront,
            Role::Admin => Shell::AdminPanel,
            Role::Agent => Shell::AgentPanel,
            Role::ContentManager => Shell::ContentPanel,
            Role::Fulfillment => Shell::FulfillmentPanel,
        };
        debug!(role = %session.role(), %shell, "Shell selected");
        shell
    }

    /// Whether the session may mount `shell`. The storefront is open to
    /// everyone; admins may enter every panel.
    pub fn permits(session: &SessionContext, shell: Shell) -> bool {
        shell == Shell::Storefront
            || session.role() == Role::Admin
            || Self::select(session) == shell
    }

    /// The shell to mount for a navigation to `requested`, falling back to
    /// the session's own shell when the request is not permitted.
    pub fn resolve(session: &SessionContext, requested: Shell) -> Shell {
        if Self::permits(session, requested) {
            requested
        } else {
            Self::select(session)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Customer, User};
    use crate::session::SessionRecord;

    fn staff(position: &str) -> SessionContext {
        SessionContext::from_record(Some(SessionRecord::Staff(User {
            user_id: "u-1".into(),
            user_name: "Staff".into(),
            contact: "0100".into(),
            position: position.into(),
            email: None,
            is_active: true,
        })))
    }

    #[test]
    fn test_each_role_gets_exactly_one_shell() {
        assert_eq!(RoleRouter::select(&SessionContext::guest()), Shell::Storefront);
        assert_eq!(RoleRouter::select(&staff("Admin")), Shell::AdminPanel);
        assert_eq!(RoleRouter::select(&staff("Agent")), Shell::AgentPanel);
        assert_eq!(RoleRouter::select(&staff("Content Manager")), Shell::ContentPanel);
        assert_eq!(RoleRouter::select(&staff("Delivery")), Shell::FulfillmentPanel);

        let customer = SessionContext::from_record(Some(SessionRecord::Customer(Customer {
            customer_id: "c-1".into(),
            customer_name: "Rafi".into(),
            contact: "0171".into(),
            email: None,
            address: None,
        })));
        assert_eq!(RoleRouter::select(&customer), Shell::Storefront);
    }

    #[test]
    fn test_resolve_blocks_foreign_panels() {
        let agent = staff("Agent");
        assert_eq!(RoleRouter::resolve(&agent, Shell::AdminPanel), Shell::AgentPanel);
        assert_eq!(RoleRouter::resolve(&agent, Shell::Storefront), Shell::Storefront);
        assert_eq!(
            RoleRouter::resolve(&SessionContext::guest(), Shell::ContentPanel),
            Shell::Storefront
        );
        assert_eq!(
            RoleRouter::resolve(&staff("Admin"), Shell::FulfillmentPanel),
            Shell::FulfillmentPanel
        );
    }
}
