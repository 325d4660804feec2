use super::{validated, ClientError};
use crate::api::{endpoints, ApiClient};
use crate::domain::{Brand, BrandCreate, BrandUpdate};
use resource_store::{Outcome, StoreHandle};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct BrandClient {
    api: ApiClient,
    store: StoreHandle<Brand>,
}

impl BrandClient {
    pub const FETCH_ALL: &'static str = "brands";
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";

    pub fn new(api: ApiClient, store: StoreHandle<Brand>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Brand>, ClientError> {
        let work = async {
            let brands: Vec<Brand> = self.api.get_json(endpoints::brand::all()).await?;
            Ok::<_, ClientError>(brands)
        };
        self.store
            .run(Self::FETCH_ALL, work, |brands| Outcome::Replace(brands.clone()))
            .await
    }

    #[instrument(skip(self, create), fields(name = %create.brand_name))]
    pub async fn create(&self, create: BrandCreate) -> Result<Brand, ClientError> {
        validated(&create)?;
        let brand_id = Uuid::new_v4().to_string();
        info!(%brand_id, "Creating brand");

        let work = async {
            self.api
                .post_form(endpoints::brand::create(), create.to_form(&brand_id))
                .await?;
            Ok::<_, ClientError>(create.into_brand(brand_id))
        };
        self.store
            .run(Self::CREATE, work, |brand| Outcome::Upsert(brand.clone()))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, brand_id: &str, update: BrandUpdate) -> Result<(), ClientError> {
        validated(&update)?;
        let work = async {
            self.api
                .submit_json(endpoints::brand::update(brand_id), &update)
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::UPDATE, work, |_| {
                Outcome::Patch(brand_id.to_string(), update.clone())
            })
            .await
    }
}

super::impl_store_client!(Brand);
