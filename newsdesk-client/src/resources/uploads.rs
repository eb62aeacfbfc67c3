use shared::models::UploadedImage;

use crate::{
    api::{ApiClient, envelope_data},
    error::ClientError,
};

const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// `/upload/image`: stores a file and returns its public URL.
#[derive(Debug, Clone)]
pub struct Uploads {
    api: ApiClient,
}

impl Uploads {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Uploads an image and returns where the backend stored it.
    ///
    /// Empty files and non-image MIME types are refused locally.
    pub async fn image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<UploadedImage, ClientError> {
        if bytes.is_empty() {
            return Err(ClientError::Validation("image file is empty".to_string()));
        }
        if !ALLOWED_IMAGE_TYPES.contains(&mime) {
            return Err(ClientError::Validation(format!(
                "unsupported image type '{mime}'"
            )));
        }
        let body = self.api.upload_image(file_name, bytes, mime).await?;
        envelope_data("/upload/image", body)
    }

    /// Best-effort MIME type for a file name, by extension.
    pub fn guess_mime(file_name: &str) -> Option<&'static str> {
        let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "svg" => Some("image/svg+xml"),
            _ => None,
        }
    }
}
