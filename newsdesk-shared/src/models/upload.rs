use serde::{Deserialize, Serialize};

/// `data` of `POST /upload/image`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedImage {
    /// Public URL of the stored image.
    pub url: String,
}
