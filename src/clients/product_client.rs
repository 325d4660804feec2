use super::{not_found, validated, ClientError};
use crate::api::{endpoints, ApiClient, FormData};
use crate::domain::{ImageUpload, Product, ProductCreate, ProductUpdate};
use resource_store::{Outcome, StoreHandle};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Async operations against the product endpoints.
///
/// Filtered fetches (by brand, by showroom) replace the collection like a
/// fetch-all, but are tracked under their own operation names so a listing
/// view can tell which query it is looking at.
#[derive(Clone)]
pub struct ProductClient {
    api: ApiClient,
    store: StoreHandle<Product>,
}

impl ProductClient {
    pub const FETCH_ALL: &'static str = "products";
    pub const FETCH_ONE: &'static str = "product";
    pub const BY_BRAND: &'static str = "productsByBrand";
    pub const BY_SHOWROOM: &'static str = "productsByShowroom";
    pub const CREATE: &'static str = "create";
    pub const UPDATE: &'static str = "update";
    pub const IMAGE_EDIT: &'static str = "imageEdit";

    pub fn new(api: ApiClient, store: StoreHandle<Product>) -> Self {
        Self { api, store }
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Product>, ClientError> {
        let work = async {
            let products: Vec<Product> = self.api.get_json(endpoints::product::all()).await?;
            debug!(count = products.len(), "Products fetched");
            Ok::<_, ClientError>(products)
        };
        self.store
            .run(Self::FETCH_ALL, work, |products| Outcome::Replace(products.clone()))
            .await
    }

    /// Loads one product into `current` for the detail view.
    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, product_id: &str) -> Result<Product, ClientError> {
        let work = async {
            let product: Option<Product> =
                self.api.get_json(endpoints::product::by_id(product_id)).await?;
            product.ok_or_else(|| not_found("Product not found"))
        };
        self.store
            .run(Self::FETCH_ONE, work, |product| {
                Outcome::Current(Some(product.clone()))
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_brand(&self, brand_id: &str) -> Result<Vec<Product>, ClientError> {
        let work = async {
            let products: Vec<Product> = self
                .api
                .get_json(endpoints::product::by_brand(brand_id))
                .await?;
            Ok::<_, ClientError>(products)
        };
        self.store
            .run(Self::BY_BRAND, work, |products| Outcome::Replace(products.clone()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn fetch_by_showroom(&self, showroom_id: &str) -> Result<Vec<Product>, ClientError> {
        let work = async {
            let products: Vec<Product> = self
                .api
                .get_json(endpoints::product::by_showroom(showroom_id))
                .await?;
            Ok::<_, ClientError>(products)
        };
        self.store
            .run(Self::BY_SHOWROOM, work, |products| Outcome::Replace(products.clone()))
            .await
    }

    /// Submits a new product under a freshly generated id.
    #[instrument(skip(self, create), fields(name = %create.product_name))]
    pub async fn create(&self, create: ProductCreate) -> Result<Product, ClientError> {
        validated(&create)?;
        let product_id = Uuid::new_v4().to_string();
        info!(%product_id, "Creating product");

        let work = async {
            self.api
                .post_form(endpoints::product::create(), create.to_form(&product_id))
                .await?;
            Ok::<_, ClientError>(create.into_product(product_id))
        };
        self.store
            .run(Self::CREATE, work, |product| Outcome::Upsert(product.clone()))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, product_id: &str, update: ProductUpdate) -> Result<(), ClientError> {
        validated(&update)?;
        let work = async {
            self.api
                .submit_json(endpoints::product::update(product_id), &update)
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::UPDATE, work, |_| {
                Outcome::Patch(product_id.to_string(), update.clone())
            })
            .await
    }

    /// Replaces the product's image.
    #[instrument(skip(self, image), fields(file = %image.file_name))]
    pub async fn edit_image(
        &self,
        product_id: &str,
        image: ImageUpload,
    ) -> Result<(), ClientError> {
        validated(&image)?;
        let work = async {
            let form = FormData::new()
                .text("productID", product_id)
                .file(image.to_part("image"));
            self.api
                .post_form(endpoints::product::image_edit(), form)
                .await?;
            Ok::<_, ClientError>(())
        };
        self.store
            .run(Self::IMAGE_EDIT, work, |_| {
                Outcome::Patch(
                    product_id.to_string(),
                    ProductUpdate {
                        image: Some(image.file_name.clone()),
                        ..Default::default()
                    },
                )
            })
            .await
    }
}

super::impl_store_client!(Product);
