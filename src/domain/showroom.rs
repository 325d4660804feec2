use super::image::ImageUpload;
use crate::api::FormData;
use resource_store::StoreEntity;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A physical showroom products can be browsed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showroom {
    #[serde(rename = "showRoomID")]
    pub showroom_id: String,
    #[serde(rename = "showRoomName")]
    pub showroom_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
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
pub struct ShowroomUpdate {
    #[serde(rename = "showRoomName", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Showroom name is required"))]
    pub showroom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl StoreEntity for Showroom {
    type Id = String;
    type Patch = ShowroomUpdate;

    fn id(&self) -> String {
        self.showroom_id.clone()
    }

    fn apply_patch(&mut self, patch: &ShowroomUpdate) {
        if let Some(name) = &patch.showroom_name {
            self.showroom_name = name.clone();
        }
        if let Some(address) = &patch.address {
            self.address = Some(address.clone());
        }
        if let Some(contact) = &patch.contact {
            self.contact = Some(contact.clone());
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ShowroomCreate {
    #[validate(length(min = 1, message = "Showroom name is required"))]
    pub showroom_name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    pub contact: Option<String>,
    #[validate(nested)]
    pub image: ImageUpload,
}

impl ShowroomCreate {
    pub fn to_form(&self, showroom_id: &str) -> FormData {
        FormData::new()
            .text("showRoomID", showroom_id)
            .text("showRoomName", &self.showroom_name)
            .text("address", &self.address)
            .optional_text("contact", self.contact.as_ref())
            .text("isActive", true)
            .file(self.image.to_part("image"))
    }

    pub fn into_showroom(self, showroom_id: String) -> Showroom {
        Showroom {
            showroom_id,
            showroom_name: self.showroom_name,
            address: Some(self.address),
            contact: self.contact,
            image: Some(self.image.file_name),
            is_active: true,
        }
    }
}
