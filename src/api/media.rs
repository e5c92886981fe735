//! Image Endpoints
//!
//! Multipart uploads: item images, palette extraction and the classifier
//! service. The multipart body sets its own content type.

use reqwest::multipart::{Form, Part};

use super::{segment, ApiClient, ApiError};
use crate::models::{Classification, ColorEntry, ColorPalette, ImageFile};

fn image_form(file: &ImageFile) -> Result<Form, ApiError> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.content_type)
        .map_err(|e| ApiError::Multipart(e.to_string()))?;
    Ok(Form::new().part("file", part))
}

impl ApiClient {
    /// Attach an image to an existing item
    pub async fn upload_image(&self, id: &str, file: &ImageFile) -> Result<(), ApiError> {
        let url = self.url(&format!("/items/{}/upload-image", segment(id)));
        let request = self.authorized(self.http.post(url).multipart(image_form(file)?));
        self.send_empty(request).await?;
        log::info!("[API] Uploaded image {} for item {}", file.name, id);
        Ok(())
    }

    /// Dominant colours of an image, most frequent first
    pub async fn extract_colors(&self, file: &ImageFile) -> Result<Vec<ColorEntry>, ApiError> {
        let request = self.authorized(self.http.post(self.url("/extract-colors")).multipart(image_form(file)?));
        let palette: ColorPalette = self.send_json(request).await?;
        Ok(palette.colors)
    }

    /// Best-guess clothing label from the classifier service
    pub async fn classify(&self, file: &ImageFile) -> Result<String, ApiError> {
        let url = format!("{}/classify", self.config.classifier_url);
        let result: Classification = self.send_json(self.http.post(url).multipart(image_form(file)?)).await?;
        Ok(result.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{client_for, serve_once};
    use crate::session::{AuthStore, MemoryStorage};

    fn png() -> ImageFile {
        ImageFile::new("dress.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_invalid_mime_is_rejected_before_sending() {
        let file = ImageFile::new("x", "not a mime", vec![1]);
        assert!(matches!(image_form(&file), Err(ApiError::Multipart(_))));
    }

    #[tokio::test]
    async fn test_upload_is_multipart() {
        let (base, server) = serve_once("200 OK", r#"{"message":"Image uploaded successfully","path":"images/wardrobe/dress"}"#);
        let client = client_for(&base, AuthStore::new(MemoryStorage::default()));

        client.upload_image("item-9", &png()).await.unwrap();

        let request = server.join().unwrap();
        let lower = request.to_ascii_lowercase();
        assert!(request.starts_with("POST /api/v1/items/item-9/upload-image "));
        assert!(lower.contains("content-type: multipart/form-data; boundary="));
        assert!(!lower.contains("content-type: application/json"));
        assert!(request.contains(r#"name="file"; filename="dress.png""#));
    }

    #[tokio::test]
    async fn test_extract_colors_keeps_order() {
        let body = r#"{"colors":[{"color":[250,250,250],"percentage":61.0},{"color":[20,40,200],"percentage":39.0}]}"#;
        let (base, server) = serve_once("200 OK", body);
        let client = client_for(&base, AuthStore::new(MemoryStorage::default()));

        let colors = client.extract_colors(&png()).await.unwrap();
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0].color, [250, 250, 250]);
        assert_eq!(colors[1].hex(), "#1428c8");
        assert!(server.join().unwrap().starts_with("POST /api/v1/extract-colors "));
    }

    #[tokio::test]
    async fn test_classify_targets_classifier_service() {
        let (base, server) = serve_once("200 OK", r#"{"message":"Trousers"}"#);
        let client = client_for(&base, AuthStore::new(MemoryStorage::default()));

        assert_eq!(client.classify(&png()).await.unwrap(), "Trousers");
        assert!(server.join().unwrap().starts_with("POST /classify "));
    }
}
