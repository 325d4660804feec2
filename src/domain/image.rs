use crate::api::FilePart;
use validator::Validate;

/// An image picked for upload alongside a create or edit form.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ImageUpload {
    #[validate(length(min = 1, message = "Image file name is required"))]
    pub file_name: String,
    pub content_type: String,
    #[validate(length(min = 1, message = "Image must not be empty"))]
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// The multipart part carrying this image under `field`.
    pub fn to_part(&self, field: &str) -> FilePart {
        FilePart {
            field: field.to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}
