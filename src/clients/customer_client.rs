use super::{not_found, validated, ClientError};
use crate::api::{endpoints, ApiClient};
use crate::domain::{Credentials, Customer, CustomerCreate};
use resource_store::{Outcome, StoreHandle};
use tracing::{info, instrument};
use uuid::Uuid;

/// Storefront accounts: sign-up, sign-in and the admin customer list.
#[derive(Clone)]
pub struct CustomerClient {
    api: ApiClient,
    store: StoreHandle<Customer>,
}

impl CustomerClient {
    pub const FETCH_ALL: &'static str = "customers";
    pub const REGISTER: &'static str = "register";
    pub const LOGIN: &'static str = "login";

    pub fn new(api: ApiClient, store: StoreHandle<Customer>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Customer>, ClientError> {
        let work = async {
            let customers: Vec<Customer> = self.api.get_json(endpoints::users::customers()).await?;
            Ok::<_, ClientError>(customers)
        };
        self.store
            .run(Self::FETCH_ALL, work, |customers| {
                Outcome::Replace(customers.clone())
            })
            .await
    }

    #[instrument(skip(self, create), fields(contact = %create.contact))]
    pub async fn register(&self, create: CustomerCreate) -> Result<Customer, ClientError> {
        validated(&create)?;
        let customer_id = Uuid::new_v4().to_string();
        info!(%customer_id, "Registering customer");

        let work = async {
            self.api
                .submit_json(endpoints::users::create_customer(), &create.payload(&customer_id))
                .await?;
            Ok::<_, ClientError>(create.into_customer(customer_id))
        };
        self.store
            .run(Self::REGISTER, work, |customer| Outcome::Upsert(customer.clone()))
            .await
    }

    /// Checks the credentials and loads the account into `current`.
    #[instrument(skip(self, credentials), fields(contact = %credentials.contact))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Customer, ClientError> {
        validated(credentials)?;
        let work = async {
            let customer: Option<Customer> = self
                .api
                .get_json(endpoints::users::customer_login(
                    &credentials.contact,
                    &credentials.password,
                ))
                .await?;
            customer.ok_or_else(|| not_found("Invalid contact number or password"))
        };
        self.store
            .run(Self::LOGIN, work, |customer| {
                Outcome::Current(Some(customer.clone()))
            })
            .await
    }
}

super::impl_store_client!(Customer);
