use super::role::Role;
use crate::domain::{Customer, User};
use crate::storage::{self, DurableStorage, PersistedRecord, StorageError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

/// The signed-in account as persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionRecord {
    Customer(Customer),
    Staff(User),
}

impl PersistedRecord for SessionRecord {
    const KEY: &'static str = "session";
    const VERSION: u32 = 1;
}

/// Everything the router and views need to know about the current user,
/// derived once from the session record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    role: Role,
    record: Option<SessionRecord>,
}

impl SessionContext {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn from_record(record: Option<SessionRecord>) -> Self {
        let role = match &record {
            None => Role::Guest,
            Some(SessionRecord::Customer(_)) => Role::Customer,
            Some(SessionRecord::Staff(user)) => Role::from_position(&user.position)
                .unwrap_or_else(|| {
                    warn!(
                        position = %user.position,
                        "Staff position has no panel, treating as guest"
                    );
                    Role::Guest
                }),
        };
        Self { role, record }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_authenticated(&self) -> bool {
        self.record.is_some()
    }

    pub fn record(&self) -> Option<&SessionRecord> {
        self.record.as_ref()
    }

    pub fn customer(&self) -> Option<&Customer> {
        match &self.record {
            Some(SessionRecord::Customer(customer)) => Some(customer),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match &self.record {
            Some(SessionRecord::Staff(user)) => Some(user),
            _ => None,
        }
    }

    pub fn display_name(&self) -> Option<&str> {
        match &self.record {
            Some(SessionRecord::Customer(customer)) => Some(&customer.customer_name),
            Some(SessionRecord::Staff(user)) => Some(&user.user_name),
            None => None,
        }
    }
}

/// Owns the persisted session and publishes the current [`SessionContext`].
///
/// The context is read from storage once in [`SessionManager::load`]; after
/// that only `sign_in` and `sign_out` change it.
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn DurableStorage>,
    sender: Arc<watch::Sender<SessionContext>>,
}

impl SessionManager {
    pub async fn load(storage: Arc<dyn DurableStorage>) -> Result<Self, StorageError> {
        let record = storage::load::<SessionRecord>(storage.as_ref()).await?;
        let context = SessionContext::from_record(record);
        info!(role = %context.role(), "Session restored");

        let (sender, _) = watch::channel(context);
        Ok(Self {
            storage,
            sender: Arc::new(sender),
        })
    }

    pub fn context(&self) -> SessionContext {
        self.sender.borrow().clone()
    }

    /// Receives every future change of the session.
    pub fn subscribe(&self) -> watch::Receiver<SessionContext> {
        self.sender.subscribe()
    }

    pub async fn sign_in(&self, record: SessionRecord) -> Result<SessionContext, StorageError> {
        storage::save(self.storage.as_ref(), &record).await?;
        let context = SessionContext::from_record(Some(record));
        info!(role = %context.role(), "Signed in");
        self.sender.send_replace(context.clone());
        Ok(context)
    }

    pub async fn sign_out(&self) -> Result<(), StorageError> {
        storage::clear::<SessionRecord>(self.storage.as_ref()).await?;
        self.sender.send_replace(SessionContext::guest());
        info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn staff(position: &str) -> User {
        User {
            user_id: "u-1".into(),
            user_name: "Nadia".into(),
            contact: "01811000000".into(),
            position: position.into(),
            email: None,
            is_active: true,
        }
    }

    #[test]
    fn test_context_from_record() {
        assert_eq!(SessionContext::from_record(None).role(), Role::Guest);

        let context = SessionContext::from_record(Some(SessionRecord::Staff(staff("Agent"))));
        assert_eq!(context.role(), Role::Agent);
        assert_eq!(context.display_name(), Some("Nadia"));
        assert!(context.customer().is_none());

        let unknown = SessionContext::from_record(Some(SessionRecord::Staff(staff("Accountant"))));
        assert_eq!(unknown.role(), Role::Guest);
        assert!(unknown.is_authenticated());
    }

    #[tokio::test]
    async fn test_sign_in_persists_and_publishes() {
        let storage = Arc::new(MemoryStorage::new());
        let manager = SessionManager::load(storage.clone()).await.unwrap();
        let mut changes = manager.subscribe();
        assert_eq!(manager.context().role(), Role::Guest);

        manager
            .sign_in(SessionRecord::Staff(staff("Admin")))
            .await
            .unwrap();
        changes.changed().await.unwrap();
        assert_eq!(changes.borrow().role(), Role::Admin);

        let restored = SessionManager::load(storage.clone()).await.unwrap();
        assert_eq!(restored.context().role(), Role::Admin);

        restored.sign_out().await.unwrap();
        let after = SessionManager::load(storage).await.unwrap();
        assert_eq!(after.context(), SessionContext::guest());
    }
}
