use super::ClientError;
use crate::api::{endpoints, ApiClient};
use crate::domain::{Country, Division, Location, ShippingSelection};
use crate::storage::{self, DurableStorage, PersistedRecord};
use resource_store::{Outcome, StoreHandle};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

impl PersistedRecord for ShippingSelection {
    const KEY: &'static str = "shipping_selection";
    const VERSION: u32 = 1;
}

#[derive(Clone)]
pub struct ShippingStores {
    pub countries: StoreHandle<Country>,
    pub divisions: StoreHandle<Division>,
    pub locations: StoreHandle<Location>,
}

/// The three-level country → division → location lookup.
///
/// Choosing a level clears every level below it, both in the stores and in
/// the cached selection, before the next level is fetched.
#[derive(Clone)]
pub struct ShippingClient {
    api: ApiClient,
    stores: ShippingStores,
    storage: Arc<dyn DurableStorage>,
    selection: Arc<Mutex<Option<ShippingSelection>>>,
}

impl ShippingClient {
    pub const COUNTRIES: &'static str = "countries";
    pub const DIVISIONS: &'static str = "divisions";
    pub const LOCATIONS: &'static str = "locations";

    pub fn new(api: ApiClient, stores: ShippingStores, storage: Arc<dyn DurableStorage>) -> Self {
        Self {
            api,
            stores,
            storage,
            selection: Arc::new(Mutex::new(None)),
        }
    }

    pub fn stores(&self) -> &ShippingStores {
        &self.stores
    }

    #[instrument(skip(self))]
    pub async fn fetch_countries(&self) -> Result<Vec<Country>, ClientError> {
        let work = async {
            let countries: Vec<Country> =
                self.api.get_json(endpoints::shipping::countries()).await?;
            Ok::<_, ClientError>(countries)
        };
        self.stores
            .countries
            .run(Self::COUNTRIES, work, |countries| {
                Outcome::Replace(countries.clone())
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_divisions(&self, country_id: i64) -> Result<Vec<Division>, ClientError> {
        let work = async {
            let divisions: Vec<Division> = self
                .api
                .get_json(endpoints::shipping::divisions(&country_id.to_string()))
                .await?;
            Ok::<_, ClientError>(divisions)
        };
        self.stores
            .divisions
            .run(Self::DIVISIONS, work, |divisions| {
                Outcome::Replace(divisions.clone())
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_locations(&self, division_id: i64) -> Result<Vec<Location>, ClientError> {
        let work = async {
            let locations: Vec<Location> = self
                .api
                .get_json(endpoints::shipping::locations(&division_id.to_string()))
                .await?;
            Ok::<_, ClientError>(locations)
        };
        self.stores
            .locations
            .run(Self::LOCATIONS, work, |locations| {
                Outcome::Replace(locations.clone())
            })
            .await
    }

    /// Picks a country and loads its divisions.
    #[instrument(skip(self, country), fields(country = %country.country_name))]
    pub async fn select_country(&self, country: Country) -> Result<Vec<Division>, ClientError> {
        let country_id = country.country_id;
        self.update_selection(|selection| selection.select_country(country))
            .await?;
        self.stores.divisions.reset().await?;
        self.stores.locations.reset().await?;
        self.fetch_divisions(country_id).await
    }

    /// Picks a division and loads its locations.
    #[instrument(skip(self, division), fields(division = %division.division_name))]
    pub async fn select_division(&self, division: Division) -> Result<Vec<Location>, ClientError> {
        let division_id = division.division_id;
        self.update_selection(|selection| selection.select_division(division))
            .await?;
        self.stores.locations.reset().await?;
        self.fetch_locations(division_id).await
    }

    #[instrument(skip(self, location), fields(location = %location.location_name))]
    pub async fn select_location(
        &self,
        location: Location,
    ) -> Result<ShippingSelection, ClientError> {
        self.update_selection(|selection| selection.select_location(location))
            .await
    }

    /// The current selection, read from durable storage on first use.
    pub async fn selection(&self) -> Result<ShippingSelection, ClientError> {
        let mut cached = self.selection.lock().await;
        if let Some(selection) = cached.as_ref() {
            return Ok(selection.clone());
        }
        let loaded = storage::load::<ShippingSelection>(self.storage.as_ref())
            .await?
            .unwrap_or_default();
        *cached = Some(loaded.clone());
        Ok(loaded)
    }

    pub async fn clear_selection(&self) -> Result<(), ClientError> {
        let mut cached = self.selection.lock().await;
        storage::clear::<ShippingSelection>(self.storage.as_ref()).await?;
        *cached = Some(ShippingSelection::default());
        Ok(())
    }

    async fn update_selection<F>(&self, change: F) -> Result<ShippingSelection, ClientError>
    where
        F: FnOnce(&mut ShippingSelection),
    {
        let mut cached = self.selection.lock().await;
        let mut selection = match cached.take() {
            Some(selection) => selection,
            None => storage::load::<ShippingSelection>(self.storage.as_ref())
                .await?
                .unwrap_or_default(),
        };
        change(&mut selection);

        let saved = storage::save(self.storage.as_ref(), &selection).await;
        *cached = Some(selection.clone());
        saved?;
        debug!(complete = selection.is_complete(), "Shipping selection saved");
        Ok(selection)
    }
}

impl resource_store::StoreClient<Country> for ShippingClient {
    type Error = ClientError;

    fn store(&self) -> &StoreHandle<Country> {
        &self.stores.countries
    }
}
