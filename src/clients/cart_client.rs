use super::{validated, ClientError, OrderClient};
use crate::api::{endpoints, ApiClient, ApiRequest};
use crate::domain::{CartAddition, CartLine, CartPatch, Order, Product};
use crate::session::CartIdentity;
use resource_store::{Outcome, StoreHandle};
use tracing::{info, instrument, warn};

/// The shopper's cart, keyed on the server by the persisted transaction number.
#[derive(Clone)]
pub struct CartClient {
    api: ApiClient,
    store: StoreHandle<CartLine>,
    identity: CartIdentity,
    orders: OrderClient,
}

impl CartClient {
    pub const FETCH: &'static str = "cart";
    pub const ADD: &'static str = "add";
    pub const UPDATE: &'static str = "update";
    pub const REMOVE: &'static str = "remove";

    pub fn new(
        api: ApiClient,
        store: StoreHandle<CartLine>,
        identity: CartIdentity,
        orders: OrderClient,
    ) -> Self {
        Self {
            api,
            store,
            identity,
            orders,
        }
    }

    /// The transaction number the cart is filed under on the server.
    pub async fn transaction_number(&self) -> Result<String, ClientError> {
        Ok(self.identity.current().await?)
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self) -> Result<Vec<CartLine>, ClientError> {
        let tx = self.transaction_number().await?;
        let work = async {
            let lines: Vec<CartLine> = self.api.get_json(endpoints::cart::get(&tx)).await?;
            Ok::<_, ClientError>(lines)
        };
        self.store
            .run(Self::FETCH, work, |lines| Outcome::Replace(lines.clone()))
            .await
    }

    /// Puts `quantity` of `product` in the cart. A product already in the cart
    /// has its line replaced.
    #[instrument(skip(self, product), fields(product = %product.product_id))]
    pub async fn add(&self, product: &Product, quantity: u32) -> Result<CartLine, ClientError> {
        let tx = self.transaction_number().await?;
        let addition = CartAddition::new(tx, product, quantity);
        validated(&addition)?;

        let work = async {
            self.api.submit_json(endpoints::cart::add(), &addition).await?;
            Ok::<_, ClientError>(CartLine {
                product_id: product.product_id.clone(),
                product_name: product.product_name.clone(),
                quantity,
                price: product.price,
            })
        };
        self.store
            .run(Self::ADD, work, |line| Outcome::Upsert(line.clone()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_quantity(&self, product_id: &str, quantity: u32) -> Result<(), ClientError> {
        if quantity == 0 {
            return Err(ClientError::Validation("Quantity must be at least 1".into()));
        }
        let tx = self.transaction_number().await?;

        let work = async {
            self.api
                .acknowledge(ApiRequest::put(endpoints::cart::set_quantity(
                    &tx, product_id, quantity,
                )))
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::UPDATE, work, |_| {
                Outcome::Patch(product_id.to_string(), CartPatch { quantity })
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, product_id: &str) -> Result<(), ClientError> {
        let tx = self.transaction_number().await?;
        let work = async {
            self.api
                .acknowledge(ApiRequest::delete(endpoints::cart::remove(&tx, product_id)))
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::REMOVE, work, |_| Outcome::Remove(product_id.to_string()))
            .await
    }

    /// Places the order for the current cart, then starts a fresh cart.
    ///
    /// The cart is only cleared when checkout succeeds. Once the server has
    /// placed the order the result is `Ok`, even if the new cart number could
    /// not be persisted.
    #[instrument(skip(self))]
    pub async fn checkout(&self, customer_id: &str) -> Result<Option<Order>, ClientError> {
        let tx = self.transaction_number().await?;
        let order = self.orders.checkout(&tx, customer_id).await?;
        if let Err(e) = self.clear().await {
            warn!(error = %e, "Order placed but the cart could not be fully cleared");
        }
        Ok(order)
    }

    /// Forgets the current cart: a new transaction number is issued and the
    /// local lines are dropped.
    ///
    /// A failure to persist the new number is returned after the lines are
    /// dropped.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<String, ClientError> {
        let issued = self.identity.regenerate().await;
        self.store.reset().await?;
        let tx = issued?;
        info!(transaction_number = %tx, "Cart cleared");
        Ok(tx)
    }
}

super::impl_store_client!(CartLine, Cart);
