//! Resource clients: one per backend resource, each pairing the shared
//! [`ApiClient`](crate::api::ApiClient) with the store(s) it reports to.
//!
//! Every operation follows the same shape: validate the input, mark the
//! operation pending, perform exactly one request, then settle the store with
//! the merged result or the normalized failure.

pub mod brand_client;
pub mod cart_client;
pub mod category_client;
pub mod customer_client;
pub mod error;
pub mod order_client;
pub mod product_client;
pub mod shipping_client;
pub mod showroom_client;
pub mod user_client;

pub use brand_client::*;
pub use cart_client::*;
pub use category_client::*;
pub use customer_client::*;
pub use error::*;
pub use order_client::*;
pub use product_client::*;
pub use shipping_client::*;
pub use showroom_client::*;
pub use user_client::*;

use crate::api::ApiError;
use validator::Validate;

/// Runs client-side checks. Called before any store transition, so a
/// rejected input leaves the store exactly as it was.
pub(crate) fn validated<V: Validate>(input: &V) -> Result<(), ClientError> {
    input.validate().map_err(ClientError::from)
}

pub(crate) fn not_found(message: &str) -> ClientError {
    ClientError::Api(ApiError::NotFound(message.to_string()))
}

/// Implements [`StoreClient`](resource_store::StoreClient) for a client whose
/// handle lives in a `store` field. The client name defaults to
/// `<Entity>Client`.
macro_rules! impl_store_client {
    ($entity:ident) => {
        $crate::clients::impl_store_client!($entity, $entity);
    };
    ($entity:ident, $prefix:ident) => {
        paste::paste! {
            impl resource_store::StoreClient<$crate::domain::$entity> for [<$prefix Client>] {
                type Error = $crate::clients::ClientError;

                fn store(&self) -> &resource_store::StoreHandle<$crate::domain::$entity> {
                    &self.store
                }
            }
        }
    };
}

pub(crate) use impl_store_client;
