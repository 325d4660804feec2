use super::image::ImageUpload;
use crate::api::FormData;
use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: String,
    pub category_name: String,
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
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Category name is required"))]
    pub category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl StoreEntity for Category {
    type Id = String;
    type Patch = CategoryUpdate;

    fn id(&self) -> String {
        self.category_id.clone()
    }

    fn apply_patch(&mut self, patch: &CategoryUpdate) {
        if let Some(name) = &patch.category_name {
            self.category_name = name.clone();
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct CategoryCreate {
    #[validate(length(min = 1, message = "Category name is required"))]
    pub category_name: String,
    #[validate(nested)]
    pub image: ImageUpload,
}

impl CategoryCreate {
    pub fn to_form(&self, category_id: &str) -> FormData {
        FormData::new()
            .text("categoryId", category_id)
            .text("categoryName", &self.category_name)
            .text("isActive", true)
            .file(self.image.to_part("image"))
    }

    pub fn into_category(self, category_id: String) -> Category {
        Category {
            category_id,
            category_name: self.category_name,
            image: Some(self.image.file_name),
            is_active: true,
        }
    }
}
