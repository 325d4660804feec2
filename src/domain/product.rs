//! Catalog products.

use super::image::ImageUpload;
use crate::api::FormData;
use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product as served by the catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "productID")]
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub brand_id: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(rename = "showRoomID", default)]
    pub showroom_id: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

/// Fields an edit may change. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Set locally after an image edit; never sent in an update body.
    #[serde(skip)]
    pub image: Option<String>,
}

impl StoreEntity for Product {
    type Id = String;
    type Patch = ProductUpdate;

    fn id(&self) -> String {
        self.product_id.clone()
    }

    fn apply_patch(&mut self, patch: &ProductUpdate) {
        if let Some(name) = &patch.product_name {
            self.product_name = name.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        if let Some(image) = &patch.image {
            self.image = Some(image.clone());
        }
    }
}

/// Payload of the "new product" form.
#[derive(Debug, Clone, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand_id: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category_id: String,
    #[validate(length(min = 1, message = "Showroom is required"))]
    pub showroom_id: String,
    #[validate(range(exclusive_min = 0.0, message = "Price must be positive"))]
    pub price: f64,
    pub stock: u32,
    pub description: Option<String>,
    #[validate(nested)]
    pub image: ImageUpload,
}

impl ProductCreate {
    /// Multipart body for `Product-Post`, carrying the client-generated id.
    pub fn to_form(&self, product_id: &str) -> FormData {
        FormData::new()
            .text("productID", product_id)
            .text("productName", &self.product_name)
            .text("brandId", &self.brand_id)
            .text("categoryId", &self.category_id)
            .text("showRoomID", &self.showroom_id)
            .text("price", self.price)
            .text("stock", self.stock)
            .optional_text("description", self.description.as_ref())
            .file(self.image.to_part("image"))
    }

    /// The product as it will exist once the server accepts it.
    pub fn into_product(self, product_id: String) -> Product {
        Product {
            product_id,
            product_name: self.product_name,
            brand_id: Some(self.brand_id),
            category_id: Some(self.category_id),
            showroom_id: Some(self.showroom_id),
            price: self.price,
            stock: self.stock,
            description: self.description,
            image: Some(self.image.file_name),
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_backend_field_names() {
        let product: Product = serde_json::from_value(json!({
            "productID": "p-1",
            "productName": "Kettle",
            "brandId": "b-1",
            "showRoomID": "s-1",
            "price": 1250.0,
            "stock": 4
        }))
        .unwrap();

        assert_eq!(product.product_id, "p-1");
        assert_eq!(product.showroom_id.as_deref(), Some("s-1"));
        assert_eq!(product.category_id, None);
        assert!(product.is_active);
    }

    #[test]
    fn test_update_body_omits_unset_fields() {
        let update = ProductUpdate {
            price: Some(99.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"price": 99.0}));
    }

    #[test]
    fn test_create_requires_fields_and_image() {
        let create = ProductCreate {
            product_name: String::new(),
            brand_id: "b-1".into(),
            category_id: "c-1".into(),
            showroom_id: "s-1".into(),
            price: 0.0,
            stock: 1,
            description: None,
            image: ImageUpload::new("kettle.png", "image/png", Vec::new()),
        };

        let errors = create.validate().unwrap_err();
        let fields = errors.errors();
        assert!(fields.contains_key("product_name"));
        assert!(fields.contains_key("price"));
        assert!(fields.contains_key("image"));
    }

    #[test]
    fn test_form_carries_generated_id() {
        let create = ProductCreate {
            product_name: "Kettle".into(),
            brand_id: "b-1".into(),
            category_id: "c-1".into(),
            showroom_id: "s-1".into(),
            price: 1250.0,
            stock: 3,
            description: None,
            image: ImageUpload::new("kettle.png", "image/png", vec![1, 2, 3]),
        };

        let form = create.to_form("p-42");
        assert_eq!(form.field("productID"), Some("p-42"));
        assert_eq!(form.field("description"), None);
        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].field, "image");
    }
}
