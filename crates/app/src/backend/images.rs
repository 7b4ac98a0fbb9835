//! Product images in the `products` storage bucket.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use storefront::products::ImageUpload;
use tracing::debug;

use crate::images::{ImageError, ImageStore, object_name};

use super::{BackendError, RestBackend, checked};

const BUCKET: &str = "products";

#[async_trait]
impl ImageStore for RestBackend {
    async fn upload_image(&self, image: &ImageUpload) -> Result<String, ImageError> {
        let name = object_name(image);

        let request = self
            .http
            .post(object_url(&self.config.url, BUCKET, &name))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header(CONTENT_TYPE, &image.content_type)
            .body(image.bytes.clone());

        checked(request.send().await.map_err(BackendError::from)?).await?;

        debug!(%name, size = image.size(), "image uploaded");

        Ok(public_url(&self.config.url, BUCKET, &name))
    }
}

fn object_url(base: &str, bucket: &str, name: &str) -> String {
    format!(
        "{}/storage/v1/object/{bucket}/{name}",
        base.trim_end_matches('/')
    )
}

fn public_url(base: &str, bucket: &str, name: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{bucket}/{name}",
        base.trim_end_matches('/')
    )
}
