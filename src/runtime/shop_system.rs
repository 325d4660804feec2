use crate::api::{ApiClient, ApiError, HttpTransport, Transport};
use crate::clients::{
    BrandClient, CartClient, CategoryClient, ClientError, CustomerClient, OrderClient, OrderStores,
    ProductClient, ShippingClient, ShippingStores, ShowroomClient, UserClient,
};
use crate::config::{AppConfig, StoreSettings};
use crate::domain::{Credentials, Order};
use crate::notifications::{NotificationFeed, NotificationListener};
use crate::router::{RoleRouter, Shell};
use crate::session::{CartIdentity, SessionContext, SessionManager, SessionRecord};
use crate::storage::{DurableStorage, FileStorage, StorageError};
use chrono::{Duration, NaiveDate, Utc};
use resource_store::{StoreActor, StoreClient, StoreEntity, StoreHandle};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("API setup failed: {0}")]
    Api(#[from] ApiError),

    #[error("Storage failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Store task failed: {0}")]
    Task(String),
}

/// How far back the order panels look when they are mounted.
const ORDER_WINDOW_DAYS: i64 = 30;

/// The running client: every store actor, the resource clients wired to
/// them, the session and the notification feed.
///
/// Views borrow the clients from here; nothing else spawns store actors.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load(None)?;
/// let system = ShopSystem::start(config).await?;
///
/// let shell = system.mount_current().await;
/// let products = system.products.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    pub products: ProductClient,
    pub brands: BrandClient,
    pub categories: CategoryClient,
    pub showrooms: ShowroomClient,
    pub orders: OrderClient,
    pub cart: CartClient,
    pub customers: CustomerClient,
    pub users: UserClient,
    pub shipping: ShippingClient,
    pub session: SessionManager,
    pub notifications: NotificationFeed,

    config: AppConfig,
    listener: Option<NotificationListener>,
    handles: Vec<JoinHandle<()>>,
}

impl ShopSystem {
    /// Starts the system against the configured HTTP API, persisting to the
    /// configured storage directory.
    pub async fn start(config: AppConfig) -> Result<Self, SystemError> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config.api)?);
        let storage: Arc<dyn DurableStorage> = Arc::new(FileStorage::new(config.storage_dir()));
        Self::with_parts(config, transport, storage).await
    }

    /// Starts the system on an explicit transport and storage backend.
    pub async fn with_parts(
        config: AppConfig,
        transport: Arc<dyn Transport>,
        storage: Arc<dyn DurableStorage>,
    ) -> Result<Self, SystemError> {
        let api = ApiClient::new(transport);
        let session = SessionManager::load(storage.clone()).await?;

        let mut handles = Vec::new();
        let settings = &config.stores;

        let products = ProductClient::new(api.clone(), spawn_store(settings, &mut handles));
        let brands = BrandClient::new(api.clone(), spawn_store(settings, &mut handles));
        let categories = CategoryClient::new(api.clone(), spawn_store(settings, &mut handles));
        let showrooms = ShowroomClient::new(api.clone(), spawn_store(settings, &mut handles));
        let customers = CustomerClient::new(api.clone(), spawn_store(settings, &mut handles));
        let users = UserClient::new(api.clone(), spawn_store(settings, &mut handles));

        let orders = OrderClient::new(
            api.clone(),
            OrderStores {
                orders: spawn_store(settings, &mut handles),
                lines: spawn_store(settings, &mut handles),
                addresses: spawn_store(settings, &mut handles),
                life_cycles: spawn_store(settings, &mut handles),
            },
        );

        // The cart checks out through the order resource.
        let cart = CartClient::new(
            api.clone(),
            spawn_store(settings, &mut handles),
            CartIdentity::new(storage.clone()),
            orders.clone(),
        );

        let shipping = ShippingClient::new(
            api,
            ShippingStores {
                countries: spawn_store(settings, &mut handles),
                divisions: spawn_store(settings, &mut handles),
                locations: spawn_store(settings, &mut handles),
            },
            storage,
        );

        let notifications = NotificationFeed::new(config.notifications.capacity);
        let listener = config
            .notifications
            .url
            .clone()
            .map(|url| NotificationListener::spawn(url, notifications.clone()));

        info!(
            stores = handles.len(),
            policy = %settings.conflict_policy,
            notifications = listener.is_some(),
            "Shop system started"
        );

        Ok(Self {
            products,
            brands,
            categories,
            showrooms,
            orders,
            cart,
            customers,
            users,
            shipping,
            session,
            notifications,
            config,
            listener,
            handles,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session_context(&self) -> SessionContext {
        self.session.context()
    }

    /// Signs a staff member in and persists the session.
    pub async fn login_staff(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionContext, ClientError> {
        let user = self.users.login(credentials).await?;
        Ok(self.session.sign_in(SessionRecord::Staff(user)).await?)
    }

    pub async fn login_customer(
        &self,
        credentials: &Credentials,
    ) -> Result<SessionContext, ClientError> {
        let customer = self.customers.login(credentials).await?;
        Ok(self.session.sign_in(SessionRecord::Customer(customer)).await?)
    }

    /// Clears the persisted session and the stores holding account data.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.users.reset().await?;
        self.customers.reset().await?;
        self.session.sign_out().await?;
        Ok(())
    }

    /// Places the signed-in customer's cart as an order.
    pub async fn checkout(&self) -> Result<Option<Order>, ClientError> {
        let context = self.session.context();
        let Some(customer) = context.customer() else {
            return Err(ClientError::Validation("Sign in to place an order".into()));
        };
        self.cart.checkout(&customer.customer_id).await
    }

    /// Resolves a navigation to `requested` against the session, then mounts
    /// the resulting shell.
    pub async fn navigate(&self, requested: Shell) -> Shell {
        let shell = RoleRouter::resolve(&self.session.context(), requested);
        self.mount(shell).await;
        shell
    }

    /// Mounts the shell the current session lands in.
    pub async fn mount_current(&self) -> Shell {
        let shell = RoleRouter::select(&self.session.context());
        self.mount(shell).await;
        shell
    }

    /// Dispatches the fetches a shell needs on mount.
    pub async fn mount(&self, shell: Shell) {
        self.mount_on(shell, Utc::now().date_naive()).await
    }

    /// Same as [`ShopSystem::mount`] with an explicit "today" for the order
    /// window.
    ///
    /// Fetches run concurrently. A failing fetch is recorded in its store and
    /// does not stop the others.
    pub async fn mount_on(&self, shell: Shell, today: NaiveDate) {
        info!(%shell, "Mounting shell");
        let from = today - Duration::days(ORDER_WINDOW_DAYS);

        match shell {
            Shell::Storefront => {
                let with_cart = self.session.context().customer().is_some();
                let (products, brands, categories, showrooms, cart) = tokio::join!(
                    self.products.fetch_all(),
                    self.brands.fetch_all(),
                    self.categories.fetch_all(),
                    self.showrooms.fetch_all(),
                    async {
                        if with_cart {
                            self.cart.fetch().await.map(|_| ())
                        } else {
                            Ok(())
                        }
                    },
                );
                report(ProductClient::FETCH_ALL, products.map(|_| ()));
                report(BrandClient::FETCH_ALL, brands.map(|_| ()));
                report(CategoryClient::FETCH_ALL, categories.map(|_| ()));
                report(ShowroomClient::FETCH_ALL, showrooms.map(|_| ()));
                report(CartClient::FETCH, cart);
            }
            Shell::AdminPanel => {
                let (products, orders, users, customers) = tokio::join!(
                    self.products.fetch_all(),
                    self.orders.fetch_by_date(from, today),
                    self.users.fetch_all(),
                    self.customers.fetch_all(),
                );
                report(ProductClient::FETCH_ALL, products.map(|_| ()));
                report(OrderClient::ORDERS, orders.map(|_| ()));
                report(UserClient::FETCH_ALL, users.map(|_| ()));
                report(CustomerClient::FETCH_ALL, customers.map(|_| ()));
            }
            Shell::ContentPanel => {
                let (products, brands, categories, showrooms) = tokio::join!(
                    self.products.fetch_all(),
                    self.brands.fetch_all(),
                    self.categories.fetch_all(),
                    self.showrooms.fetch_all(),
                );
                report(ProductClient::FETCH_ALL, products.map(|_| ()));
                report(BrandClient::FETCH_ALL, brands.map(|_| ()));
                report(CategoryClient::FETCH_ALL, categories.map(|_| ()));
                report(ShowroomClient::FETCH_ALL, showrooms.map(|_| ()));
            }
            Shell::AgentPanel | Shell::FulfillmentPanel => {
                let (orders, stages) = tokio::join!(
                    self.orders.fetch_by_date(from, today),
                    self.orders.fetch_life_cycles(),
                );
                report(OrderClient::ORDERS, orders.map(|_| ()));
                report(OrderClient::LIFE_CYCLES, stages.map(|_| ()));
            }
        }
    }

    /// Stops the notification listener, closes every store channel and waits
    /// for the store tasks to finish.
    ///
    /// Store tasks exit once the last handle is gone, so handles cloned out of
    /// the system must be dropped before calling this.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down shop system...");

        if let Some(listener) = self.listener {
            if let Err(e) = listener.stop().await {
                warn!(error = %e, "Notification listener ended with an error");
            }
        }

        drop(self.products);
        drop(self.brands);
        drop(self.categories);
        drop(self.showrooms);
        drop(self.orders);
        drop(self.cart);
        drop(self.customers);
        drop(self.users);
        drop(self.shipping);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(SystemError::Task(e.to_string()));
            }
        }

        info!("Shop system shutdown complete.");
        Ok(())
    }
}

fn spawn_store<T: StoreEntity>(
    settings: &StoreSettings,
    handles: &mut Vec<JoinHandle<()>>,
) -> StoreHandle<T> {
    let (actor, handle) = StoreActor::<T>::new(settings.buffer_size, settings.conflict_policy);
    handles.push(tokio::spawn(actor.run()));
    handle
}

fn report(op: &str, result: Result<(), ClientError>) {
    if let Err(e) = result {
        warn!(op, error = %e, "Fetch on mount failed");
    }
}
