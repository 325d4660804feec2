use super::{validated, ClientError};
use crate::api::{endpoints, ApiClient};
use crate::domain::{Showroom, ShowroomCreate, ShowroomUpdate};
use resource_store::{Outcome, StoreHandle};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Clone)]
pub struct ShowroomClient {
    api: ApiClient,
    store: StoreHandle<Showroom>,
}

impl ShowroomClient {
    pub const FETCH_ALL: &'static str = "showrooms";
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";

    pub fn new(api: ApiClient, store: StoreHandle<Showroom>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Showroom>, ClientError> {
        let work = async {
            let showrooms: Vec<Showroom> = self.api.get_json(endpoints::showroom::all()).await?;
            Ok::<_, ClientError>(showrooms)
        };
        self.store
            .run(Self::FETCH_ALL, work, |showrooms| {
                Outcome::Replace(showrooms.clone())
            })
            .await
    }

    #[instrument(skip(self, create), fields(name = %create.showroom_name))]
    pub async fn create(&self, create: ShowroomCreate) -> Result<Showroom, ClientError> {
        validated(&create)?;
        let showroom_id = Uuid::new_v4().to_string();
        info!(%showroom_id, "Creating showroom");

        let work = async {
            self.api
                .post_form(endpoints::showroom::create(), create.to_form(&showroom_id))
                .await?;
            Ok::<_, ClientError>(create.into_showroom(showroom_id))
        };
        self.store
            .run(Self::CREATE, work, |showroom| Outcome::Upsert(showroom.clone()))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        showroom_id: &str,
        update: ShowroomUpdate,
    ) -> Result<(), ClientError> {
        validated(&update)?;
        let work = async {
            self.api
                .submit_json(endpoints::showroom::update(showroom_id), &update)
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::UPDATE, work, |_| {
                Outcome::Patch(showroom_id.to_string(), update.clone())
            })
            .await
    }
}

super::impl_store_client!(Showroom);
