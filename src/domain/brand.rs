use super::image::ImageUpload;
use crate::api::FormData;
use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub brand_id: String,
    pub brand_name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
}

fn active() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BrandUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Brand name is required"))]
    pub brand_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl StoreEntity for Brand {
    type Id = String;
    type Patch = BrandUpdate;

    fn id(&self) -> String {
        self.brand_id.clone()
    }

    fn apply_patch(&mut self, patch: &BrandUpdate) {
        if let Some(name) = &patch.brand_name {
            self.brand_name = name.clone();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct BrandCreate {
    #[validate(length(min = 1, message = "Brand name is required"))]
    pub brand_name: String,
    #[validate(nested)]
    pub image: ImageUpload,
}

impl BrandCreate {
    pub fn to_form(&self, brand_id: &str) -> FormData {
        FormData::new()
            .text("brandId", brand_id)
            .text("brandName", &self.brand_name)
            .text("isActive", true)
            .file(self.image.to_part("image"))
    }

    pub fn into_brand(self, brand_id: String) -> Brand {
        Brand {
            brand_id,
            brand_name: self.brand_name,
            image: Some(self.image.file_name),
            is_active: true,
        }
    }
}
