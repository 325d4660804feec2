use super::{not_found, ClientError};
use crate::api::{endpoints, ApiClient, ApiRequest, RequestBody};
use crate::domain::{DeliveryAddress, Order, OrderLifeCycle, OrderLine, OrderPatch};
use chrono::NaiveDate;
use resource_store::{Outcome, StoreHandle};
use tracing::{debug, info, instrument};

/// Stores owned by the order resource.
///
/// The order list, the lines of the sales order being inspected, its delivery
/// address and the available life-cycle stages each have their own store and
/// request lifecycle.
#[derive(Clone)]
pub struct OrderStores {
    pub orders: StoreHandle<Order>,
    pub lines: StoreHandle<OrderLine>,
    pub addresses: StoreHandle<DeliveryAddress>,
    pub life_cycles: StoreHandle<OrderLifeCycle>,
}

#[derive(Clone)]
pub struct OrderClient {
    api: ApiClient,
    stores: OrderStores,
}

impl OrderClient {
    pub const ORDERS: &'static str = "orders";
    pub const CHECKOUT: &'static str = "checkout";
    pub const TRANSITION: &'static str = "transition";
    pub const DELIVERY_UPDATE: &'static str = "deliveryUpdate";
    pub const SALES_ORDER: &'static str = "salesOrder";
    pub const DELIVERY_ADDRESS: &'static str = "deliveryAddress";
    pub const LIFE_CYCLES: &'static str = "lifeCycles";

    pub fn new(api: ApiClient, stores: OrderStores) -> Self {
        Self { api, stores }
    }

    pub fn stores(&self) -> &OrderStores {
        &self.stores
    }

    /// Orders placed between `from` and `to`, both inclusive.
    ///
    /// An empty result is a successful fetch, not a failure.
    #[instrument(skip(self), fields(%from, %to))]
    pub async fn fetch_by_date(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Order>, ClientError> {
        if from > to {
            return Err(ClientError::Validation(
                "Start date must not be after end date".into(),
            ));
        }

        let work = async {
            let path = endpoints::order::by_date(
                &from.format("%Y-%m-%d").to_string(),
                &to.format("%Y-%m-%d").to_string(),
            );
            let orders: Vec<Order> = self.api.get_json(path).await?;
            debug!(count = orders.len(), "Orders fetched");
            Ok::<_, ClientError>(orders)
        };
        self.stores
            .orders
            .run(Self::ORDERS, work, |orders| Outcome::Replace(orders.clone()))
            .await
    }

    /// Turns the cart into an order. Returns the new order when the server
    /// sends it back.
    #[instrument(skip(self))]
    pub async fn checkout(
        &self,
        cart_id: &str,
        customer_id: &str,
    ) -> Result<Option<Order>, ClientError> {
        info!("Checking out cart");
        let work = async {
            let request = ApiRequest::post(
                endpoints::order::checkout(cart_id, customer_id),
                RequestBody::Empty,
            );
            let order: Option<Order> = self.api.fetch(request).await?;
            Ok::<_, ClientError>(order)
        };
        self.stores
            .orders
            .run(Self::CHECKOUT, work, |order| match order {
                Some(order) => Outcome::Upsert(order.clone()),
                None => Outcome::Unchanged,
            })
            .await
    }

    /// Moves an order to another life-cycle stage.
    #[instrument(
        skip(self, order, stage),
        fields(order = %order.order_code, stage = %stage.life_cycle_name)
    )]
    pub async fn transition(
        &self,
        order: &Order,
        stage: &OrderLifeCycle,
    ) -> Result<(), ClientError> {
        let work = async {
            let path = endpoints::order::transition(
                &stage.life_cycle_id.to_string(),
                &order.order_id.to_string(),
            );
            self.api
                .acknowledge(ApiRequest::post(path, RequestBody::Empty))
                .await?;
            Ok::<_, ClientError>(())
        };
        self.stores
            .orders
            .run(Self::TRANSITION, work, |_| {
                Outcome::Patch(
                    order.order_code.clone(),
                    OrderPatch {
                        order_status: Some(stage.life_cycle_name.clone()),
                    },
                )
            })
            .await
    }

    /// Asks the server to refresh an order's delivery status.
    #[instrument(skip(self))]
    pub async fn delivery_update(&self, order_code: &str) -> Result<Option<Order>, ClientError> {
        let work = async {
            let order: Option<Order> = self
                .api
                .get_json(endpoints::order::delivery_update(order_code))
                .await?;
            Ok::<_, ClientError>(order)
        };
        self.stores
            .orders
            .run(Self::DELIVERY_UPDATE, work, |order| match order {
                Some(order) => Outcome::Upsert(order.clone()),
                None => Outcome::Unchanged,
            })
            .await
    }

    /// Lines of one sales order. An order without lines is reported as not found.
    #[instrument(skip(self))]
    pub async fn fetch_sales_order(&self, order_id: i64) -> Result<Vec<OrderLine>, ClientError> {
        let work = async {
            let lines: Vec<OrderLine> = self
                .api
                .get_json(endpoints::order::sales_order(&order_id.to_string()))
                .await?;
            if lines.is_empty() {
                return Err(not_found("No order details found"));
            }
            Ok::<_, ClientError>(lines)
        };
        self.stores
            .lines
            .run(Self::SALES_ORDER, work, |lines| Outcome::Replace(lines.clone()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_delivery_address(
        &self,
        order_id: i64,
    ) -> Result<DeliveryAddress, ClientError> {
        let work = async {
            let address: Option<DeliveryAddress> = self
                .api
                .get_json(endpoints::order::delivery_address(&order_id.to_string()))
                .await?;
            address.ok_or_else(|| not_found("No delivery address found"))
        };
        self.stores
            .addresses
            .run(Self::DELIVERY_ADDRESS, work, |address| {
                Outcome::Current(Some(address.clone()))
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_life_cycles(&self) -> Result<Vec<OrderLifeCycle>, ClientError> {
        let work = async {
            let stages: Vec<OrderLifeCycle> =
                self.api.get_json(endpoints::order::life_cycles()).await?;
            Ok::<_, ClientError>(stages)
        };
        self.stores
            .life_cycles
            .run(Self::LIFE_CYCLES, work, |stages| Outcome::Replace(stages.clone()))
            .await
    }
}

impl resource_store::StoreClient<Order> for OrderClient {
    type Error = ClientError;

    fn store(&self) -> &StoreHandle<Order> {
        &self.stores.orders
    }
}
