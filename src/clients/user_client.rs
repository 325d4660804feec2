use super::{not_found, validated, ClientError};
use crate::api::{endpoints, ApiClient, ApiRequest, RequestBody};
use crate::domain::{Credentials, User, UserCreate};
use resource_store::{Outcome, StoreHandle};
use tracing::{info, instrument};
use uuid::Uuid;

/// Staff accounts.
#[derive(Clone)]
pub struct UserClient {
    api: ApiClient,
    store: StoreHandle<User>,
}

impl UserClient {
    pub const FETCH_ALL: &'static str = "users";
    pub const CREATE: &'static str = "create";
    pub const LOGIN: &'static str = "login";

    pub fn new(api: ApiClient, store: StoreHandle<User>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<User>, ClientError> {
        let work = async {
            let users: Vec<User> = self.api.get_json(endpoints::users::all()).await?;
            Ok::<_, ClientError>(users)
        };
        self.store
            .run(Self::FETCH_ALL, work, |users| Outcome::Replace(users.clone()))
            .await
    }

    #[instrument(skip(self, create), fields(position = %create.position))]
    pub async fn create(&self, create: UserCreate) -> Result<User, ClientError> {
        validated(&create)?;
        let user_id = Uuid::new_v4().to_string();
        info!(%user_id, "Creating user");

        let work = async {
            self.api
                .submit_json(endpoints::users::create_user(), &create.payload(&user_id))
                .await?;
            Ok::<_, ClientError>(create.into_user(user_id))
        };
        self.store
            .run(Self::CREATE, work, |user| Outcome::Upsert(user.clone()))
            .await
    }

    #[instrument(skip(self, credentials), fields(contact = %credentials.contact))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ClientError> {
        validated(credentials)?;
        let work = async {
            let request = ApiRequest::post(
                endpoints::users::login(&credentials.contact, &credentials.password),
                RequestBody::Empty,
            );
            let user: Option<User> = self.api.fetch(request).await?;
            user.ok_or_else(|| not_found("Invalid contact number or password"))
        };
        self.store
            .run(Self::LOGIN, work, |user| Outcome::Current(Some(user.clone())))
            .await
    }
}

super::impl_store_client!(User);
