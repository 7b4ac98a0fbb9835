//! Product image store.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rand::{Rng, distributions::Alphanumeric};
use storefront::products::ImageUpload;
use thiserror::Error;

use crate::backend::BackendError;

/// Errors raised while uploading a product image.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The storage bucket rejected the upload or could not be reached.
    #[error("image upload failed")]
    Backend(#[from] BackendError),
}

#[automock]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads `image` under a fresh name, returning its public URL.
    async fn upload_image(&self, image: &ImageUpload) -> Result<String, ImageError>;
}

/// Generate a bucket object name of the form `{millis}-{suffix}.{ext}`.
pub(crate) fn object_name(image: &ImageUpload) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();

    name_for(image, Timestamp::now().as_millisecond(), &suffix)
}

fn name_for(image: &ImageUpload, millis: i64, suffix: &str) -> String {
    match image.extension() {
        Some(extension) => format!("{millis}-{suffix}.{extension}"),
        None => format!("{millis}-{suffix}"),
    }
}
