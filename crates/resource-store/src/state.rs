//! # Store State
//!
//! The data owned by a store and the rules for mutating it. [`StoreState`] is a
//! plain struct so the transition rules can be tested without spawning an
//! actor; [`StoreActor`](crate::StoreActor) simply feeds it messages in order.

use crate::entity::StoreEntity;
use crate::message::{Outcome, Settlement, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Lifecycle of one named operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// How overlapping requests for the same operation are reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Apply every settlement in arrival order; the last response to land wins.
    #[default]
    LastWriteWins,
    /// Only apply a settlement if it belongs to the most recently issued request.
    LatestIssued,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::LastWriteWins => write!(f, "last_write_wins"),
            ConflictPolicy::LatestIssued => write!(f, "latest_issued"),
        }
    }
}

impl FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "last_write_wins" | "lww" => Ok(ConflictPolicy::LastWriteWins),
            "latest_issued" | "sequenced" => Ok(ConflictPolicy::LatestIssued),
            other => Err(format!(
                "Unknown conflict policy: '{}'. Valid options: last_write_wins, latest_issued",
                other
            )),
        }
    }
}

/// Request bookkeeping for one (store, operation) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationStatus {
    pub state: RequestState,
    pub last_error: Option<String>,
    /// Sequence number of the most recently issued request.
    pub issued: u64,
    /// Requests issued at or below this number predate the last reset.
    floor: u64,
}

/// The most recent failure recorded by a store, with the operation it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub op: &'static str,
    pub message: String,
}

/// A point-in-time copy of a store, as seen by views.
#[derive(Debug, Clone)]
pub struct StoreSnapshot<T: StoreEntity> {
    pub collection: Vec<T>,
    pub current: Option<T>,
    pub operations: HashMap<&'static str, OperationStatus>,
    pub last_error: Option<StoreFailure>,
}

impl<T: StoreEntity> StoreSnapshot<T> {
    /// Request state of `op`; operations never dispatched are `Idle`.
    pub fn state(&self, op: &str) -> RequestState {
        self.operations
            .get(op)
            .map(|status| status.state)
            .unwrap_or_default()
    }

    pub fn is_pending(&self, op: &str) -> bool {
        self.state(op) == RequestState::Pending
    }

    /// Failure message of the last settlement of `op`, if it failed.
    pub fn error(&self, op: &str) -> Option<&str> {
        self.operations
            .get(op)
            .and_then(|status| status.last_error.as_deref())
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.collection.iter().find(|item| &item.id() == id)
    }
}

/// The mutable state behind a store actor.
#[derive(Debug)]
pub struct StoreState<T: StoreEntity> {
    collection: Vec<T>,
    current: Option<T>,
    operations: HashMap<&'static str, OperationStatus>,
    last_error: Option<StoreFailure>,
    policy: ConflictPolicy,
}

impl<T: StoreEntity> StoreState<T> {
    pub fn new(policy: ConflictPolicy) -> Self {
        Self {
            collection: Vec::new(),
            current: None,
            operations: HashMap::new(),
            last_error: None,
            policy,
        }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Marks `op` as pending and hands out the ticket for its settlement.
    pub fn begin(&mut self, op: &'static str) -> Ticket {
        let status = self.operations.entry(op).or_default();
        status.issued += 1;
        status.state = RequestState::Pending;
        status.last_error = None;
        let seq = status.issued;

        if self.last_error.as_ref().is_some_and(|failure| failure.op == op) {
            self.last_error = None;
        }
        Ticket { op, seq }
    }

    /// Records the result of a request started with [`StoreState::begin`].
    pub fn settle(&mut self, ticket: Ticket, result: Result<Outcome<T>, String>) -> Settlement {
        let policy = self.policy;
        let status = self.operations.entry(ticket.op).or_default();

        if ticket.seq <= status.floor {
            return Settlement::Discarded;
        }
        if policy == ConflictPolicy::LatestIssued && ticket.seq < status.issued {
            return Settlement::Discarded;
        }

        match result {
            Ok(outcome) => {
                status.state = RequestState::Succeeded;
                status.last_error = None;
                self.apply(outcome);
            }
            Err(message) => {
                status.state = RequestState::Failed;
                status.last_error = Some(message.clone());
                self.last_error = Some(StoreFailure {
                    op: ticket.op,
                    message,
                });
            }
        }
        Settlement::Applied
    }

    /// Clears all data and request flags. Requests still in flight will be
    /// discarded when they settle.
    pub fn reset(&mut self) {
        self.collection.clear();
        self.current = None;
        self.last_error = None;
        for status in self.operations.values_mut() {
            status.state = RequestState::Idle;
            status.last_error = None;
            status.floor = status.issued;
        }
    }

    pub fn snapshot(&self) -> StoreSnapshot<T> {
        StoreSnapshot {
            collection: self.collection.clone(),
            current: self.current.clone(),
            operations: self.operations.clone(),
            last_error: self.last_error.clone(),
        }
    }

    fn apply(&mut self, outcome: Outcome<T>) {
        match outcome {
            Outcome::Replace(items) => self.collection = items,
            Outcome::Current(item) => self.current = item,
            Outcome::Upsert(item) => {
                let id = item.id();
                if self.current.as_ref().is_some_and(|current| current.id() == id) {
                    self.current = Some(item.clone());
                }
                match self.collection.iter_mut().find(|entry| entry.id() == id) {
                    Some(slot) => *slot = item,
                    None => self.collection.push(item),
                }
            }
            Outcome::Patch(id, patch) => {
                let mut matched = false;
                if let Some(entry) = self.collection.iter_mut().find(|entry| entry.id() == id) {
                    entry.apply_patch(&patch);
                    matched = true;
                }
                if let Some(current) = self.current.as_mut().filter(|current| current.id() == id) {
                    current.apply_patch(&patch);
                    matched = true;
                }
                if !matched {
                    warn!(%id, "Patch target not cached");
                }
            }
            Outcome::Remove(id) => {
                self.collection.retain(|entry| entry.id() != id);
                if self.current.as_ref().is_some_and(|current| current.id() == id) {
                    self.current = None;
                }
            }
            Outcome::Unchanged => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Showroom {
        id: String,
        name: String,
    }

    impl StoreEntity for Showroom {
        type Id = String;
        type Patch = String;

        fn id(&self) -> String {
            self.id.clone()
        }

        fn apply_patch(&mut self, name: &String) {
            self.name = name.clone();
        }
    }

    fn showroom(id: &str, name: &str) -> Showroom {
        Showroom {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn test_unknown_operation_is_idle() {
        let state = StoreState::<Showroom>::new(ConflictPolicy::default());
        assert_eq!(state.snapshot().state("showrooms"), RequestState::Idle);
    }

    #[test]
    fn test_replace_then_upsert_splices_by_id() {
        let mut state = StoreState::new(ConflictPolicy::default());
        let ticket = state.begin("showrooms");
        state.settle(
            ticket,
            Ok(Outcome::Replace(vec![showroom("s1", "Gulshan"), showroom("s2", "Banani")])),
        );

        let ticket = state.begin("update");
        state.settle(ticket, Ok(Outcome::Upsert(showroom("s1", "Gulshan 2"))));
        let ticket = state.begin("create");
        state.settle(ticket, Ok(Outcome::Upsert(showroom("s3", "Uttara"))));

        let snapshot = state.snapshot();
        let names: Vec<_> = snapshot.collection.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Gulshan 2", "Banani", "Uttara"]);
    }

    #[test]
    fn test_failure_keeps_data_and_records_error() {
        let mut state = StoreState::new(ConflictPolicy::default());
        let ticket = state.begin("showrooms");
        state.settle(ticket, Ok(Outcome::Replace(vec![showroom("s1", "Gulshan")])));

        let ticket = state.begin("showrooms");
        state.settle(ticket, Err("Server unavailable".into()));

        let snapshot = state.snapshot();
        assert_eq!(snapshot.state("showrooms"), RequestState::Failed);
        assert_eq!(snapshot.error("showrooms"), Some("Server unavailable"));
        assert_eq!(snapshot.collection, vec![showroom("s1", "Gulshan")]);
        assert_eq!(
            snapshot.last_error,
            Some(StoreFailure {
                op: "showrooms",
                message: "Server unavailable".into()
            })
        );
    }

    #[test]
    fn test_begin_clears_error_of_same_operation_only() {
        let mut state = StoreState::<Showroom>::new(ConflictPolicy::default());
        let ticket = state.begin("showrooms");
        state.settle(ticket, Err("boom".into()));

        state.begin("create");
        assert!(state.snapshot().last_error.is_some());

        state.begin("showrooms");
        let snapshot = state.snapshot();
        assert!(snapshot.last_error.is_none());
        assert_eq!(snapshot.error("showrooms"), None);
        assert!(snapshot.is_pending("showrooms"));
    }

    #[test]
    fn test_patch_is_idempotent_and_targets_one_entry() {
        let mut state = StoreState::new(ConflictPolicy::default());
        let ticket = state.begin("showrooms");
        state.settle(
            ticket,
            Ok(Outcome::Replace(vec![showroom("s1", "Gulshan"), showroom("s2", "Banani")])),
        );

        for _ in 0..2 {
            let ticket = state.begin("update");
            state.settle(ticket, Ok(Outcome::Patch("s2".into(), "Dhanmondi".into())));
        }

        let snapshot = state.snapshot();
        assert_eq!(
            snapshot.collection,
            vec![showroom("s1", "Gulshan"), showroom("s2", "Dhanmondi")]
        );
    }

    #[test]
    fn test_remove_drops_entry_and_current() {
        let mut state = StoreState::new(ConflictPolicy::default());
        let ticket = state.begin("showrooms");
        state.settle(ticket, Ok(Outcome::Replace(vec![showroom("s1", "Gulshan")])));
        let ticket = state.begin("detail");
        state.settle(ticket, Ok(Outcome::Current(Some(showroom("s1", "Gulshan")))));

        let ticket = state.begin("delete");
        state.settle(ticket, Ok(Outcome::Remove("s1".into())));

        let snapshot = state.snapshot();
        assert!(snapshot.collection.is_empty());
        assert!(snapshot.current.is_none());
    }

    #[test]
    fn test_last_write_wins_applies_late_stale_response() {
        let mut state = StoreState::new(ConflictPolicy::LastWriteWins);
        let first = state.begin("showrooms");
        let second = state.begin("showrooms");

        assert_eq!(
            state.settle(second, Ok(Outcome::Replace(vec![showroom("new", "Second")]))),
            Settlement::Applied
        );
        assert_eq!(
            state.settle(first, Ok(Outcome::Replace(vec![showroom("old", "First")]))),
            Settlement::Applied
        );
        assert_eq!(state.snapshot().collection, vec![showroom("old", "First")]);
    }

    #[test]
    fn test_latest_issued_discards_stale_response() {
        let mut state = StoreState::new(ConflictPolicy::LatestIssued);
        let first = state.begin("showrooms");
        let second = state.begin("showrooms");

        state.settle(second, Ok(Outcome::Replace(vec![showroom("new", "Second")])));
        assert_eq!(
            state.settle(first, Ok(Outcome::Replace(vec![showroom("old", "First")]))),
            Settlement::Discarded
        );

        let snapshot = state.snapshot();
        assert_eq!(snapshot.collection, vec![showroom("new", "Second")]);
        assert_eq!(snapshot.state("showrooms"), RequestState::Succeeded);
    }

    #[test]
    fn test_reset_discards_requests_in_flight() {
        let mut state = StoreState::new(ConflictPolicy::LastWriteWins);
        let ticket = state.begin("showrooms");
        state.reset();

        assert_eq!(
            state.settle(ticket, Ok(Outcome::Replace(vec![showroom("s1", "Gulshan")]))),
            Settlement::Discarded
        );
        let snapshot = state.snapshot();
        assert!(snapshot.collection.is_empty());
        assert_eq!(snapshot.state("showrooms"), RequestState::Idle);
    }

    #[test]
    fn test_conflict_policy_parsing() {
        assert_eq!("latest-issued".parse::<ConflictPolicy>(), Ok(ConflictPolicy::LatestIssued));
        assert_eq!("LWW".parse::<ConflictPolicy>(), Ok(ConflictPolicy::LastWriteWins));
        assert!("newest".parse::<ConflictPolicy>().is_err());
    }
}
