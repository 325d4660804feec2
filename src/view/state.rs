use crate::api::GENERIC_FAILURE;
use resource_store::{RequestState, StoreEntity, StoreSnapshot};

/// What a list view should render for one operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    /// Inline error in place of the list.
    Failed(String),
    /// The request succeeded with nothing to show.
    Empty,
    Ready(Vec<T>),
}

impl<T: Clone> ViewState<T> {
    /// Renders `items` according to the lifecycle of `op`.
    ///
    /// Operations that were never dispatched show as loading, since the view
    /// dispatches them on mount.
    pub fn from_parts(state: RequestState, error: Option<&str>, items: &[T]) -> Self {
        match state {
            RequestState::Idle | RequestState::Pending => ViewState::Loading,
            RequestState::Failed => ViewState::Failed(
                error
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or(GENERIC_FAILURE)
                    .to_string(),
            ),
            RequestState::Succeeded if items.is_empty() => ViewState::Empty,
            RequestState::Succeeded => ViewState::Ready(items.to_vec()),
        }
    }

    pub fn items(&self) -> &[T] {
        match self {
            ViewState::Ready(items) => items,
            _ => &[],
        }
    }
}

impl<T: StoreEntity> ViewState<T> {
    /// The store's collection as seen through `op`.
    pub fn of(snapshot: &StoreSnapshot<T>, op: &str) -> Self {
        Self::from_parts(snapshot.state(op), snapshot.error(op), &snapshot.collection)
    }

    /// Same as [`ViewState::of`] for a list derived from the collection
    /// (filtered, sorted or paged).
    pub fn derived(snapshot: &StoreSnapshot<T>, op: &str, items: &[T]) -> Self {
        Self::from_parts(snapshot.state(op), snapshot.error(op), items)
    }
}

/// Transient outcome of a mutation, shown as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Saving,
    Saved,
    Error(String),
}

/// Feedback for a mutation `op`, or `None` before it was ever dispatched.
pub fn mutation_feedback<T: StoreEntity>(
    snapshot: &StoreSnapshot<T>,
    op: &str,
) -> Option<Feedback> {
    match snapshot.state(op) {
        RequestState::Idle => None,
        RequestState::Pending => Some(Feedback::Saving),
        RequestState::Succeeded => Some(Feedback::Saved),
        RequestState::Failed => Some(Feedback::Error(
            snapshot.error(op).unwrap_or(GENERIC_FAILURE).to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states() {
        assert_eq!(
            ViewState::<u32>::from_parts(RequestState::Pending, None, &[1]),
            ViewState::Loading
        );
        assert_eq!(
            ViewState::<u32>::from_parts(RequestState::Succeeded, None, &[]),
            ViewState::Empty
        );
        assert_eq!(
            ViewState::from_parts(RequestState::Succeeded, None, &[1, 2]),
            ViewState::Ready(vec![1, 2])
        );
        assert_eq!(
            ViewState::<u32>::from_parts(RequestState::Failed, Some("Server down"), &[1]),
            ViewState::Failed("Server down".into())
        );
        assert_eq!(
            ViewState::<u32>::from_parts(RequestState::Failed, None, &[]),
            ViewState::Failed(GENERIC_FAILURE.into())
        );
    }
}
