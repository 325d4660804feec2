use super::{validated, ClientError};
use crate::api::{endpoints, ApiClient};
use crate::domain::{Category, CategoryCreate, CategoryUpdate};
use resource_store::{Outcome, StoreHandle};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryClient {
    api: ApiClient,
    store: StoreHandle<Category>,
}

impl CategoryClient {
    pub const FETCH_ALL: &'static str = "categories";
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";

    pub fn new(api: ApiClient, store: StoreHandle<Category>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Category>, ClientError> {
        let work = async {
            let categories: Vec<Category> = self.api.get_json(endpoints::category::all()).await?;
            Ok::<_, ClientError>(categories)
        };
        self.store
            .run(Self::FETCH_ALL, work, |categories| {
                Outcome::Replace(categories.clone())
            })
            .await
    }

    #[instrument(skip(self, create), fields(name = %create.category_name))]
    pub async fn create(&self, create: CategoryCreate) -> Result<Category, ClientError> {
        validated(&create)?;
        let category_id = Uuid::new_v4().to_string();
        info!(%category_id, "Creating category");

        let work = async {
            self.api
                .post_form(endpoints::category::create(), create.to_form(&category_id))
                .await?;
            Ok::<_, ClientError>(create.into_category(category_id))
        };
        self.store
            .run(Self::CREATE, work, |category| Outcome::Upsert(category.clone()))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        category_id: &str,
        update: CategoryUpdate,
    ) -> Result<(), ClientError> {
        validated(&update)?;
        let work = async {
            self.api
                .submit_json(endpoints::category::update(category_id), &update)
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::UPDATE, work, |_| {
                Outcome::Patch(category_id.to_string(), update.clone())
            })
            .await
    }
}

super::impl_store_client!(Category);
