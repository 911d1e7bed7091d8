use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An image payload selected for upload: bytes plus the declared media type.
#[derive(Clone, Debug)]
pub struct ImageFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ImageFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Registration request body for `POST /api/images`.
///
/// Produced by the submission workflow; the workflow never reads it back.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewImage {
    pub url: String,
    pub title: String,
    pub description: String,
}

/// A registered catalog entry as returned by the listing endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogImage {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_file_size() {
        let file = ImageFile::new("sunset.png", "image/png", vec![0u8; 128]);
        assert_eq!(file.size(), 128);
    }

    #[test]
    fn new_image_serializes_flat() {
        let body = NewImage {
            url: "https://cdn/x.png".to_string(),
            title: "Sunset".to_string(),
            description: "A nice view".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "url": "https://cdn/x.png",
                "title": "Sunset",
                "description": "A nice view",
            })
        );
    }
}
