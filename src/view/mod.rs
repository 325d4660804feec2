//! Pure derivations from store snapshots and local UI state.
//!
//! Nothing here talks to the network or writes to a store; views read a
//! snapshot, combine it with what the user typed or clicked, and render.

pub mod aggregate;
pub mod catalog;
pub mod dashboard;
pub mod format;
pub mod paginate;
pub mod state;

pub use aggregate::{bucketize, Bucket, BucketUnit, Dated};
pub use catalog::{price_bounds, ProductQuery, SortKey};
pub use dashboard::{count_by_status, summarize_orders, OrderSummary};
pub use format::{format_amount, format_date, format_date_time, format_money};
pub use paginate::{paginate, InfiniteScroll, Page};
pub use state::{mutation_feedback, Feedback, ViewState};
