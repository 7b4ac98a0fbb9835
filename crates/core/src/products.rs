//! Products

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Largest image the admin panel accepts for upload.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Product, as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product title
    pub title: String,

    /// Product price, in whole rupees
    pub price: u64,

    /// Public location of the product image
    #[serde(rename = "image_url")]
    pub image_reference: String,
}

/// Filter products whose title contains `query`, ignoring case.
///
/// A blank query matches everything. Catalog order is preserved.
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();

    products
        .iter()
        .filter(|product| needle.is_empty() || product.title.to_lowercase().contains(&needle))
        .collect()
}

/// Errors raised by the admin product form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductDraftError {
    /// The title was blank.
    #[error("Product title is required")]
    MissingTitle,

    /// No image was uploaded and no existing image was kept.
    #[error("Please upload an image")]
    MissingImage,

    /// The selected file is not an image.
    #[error("Please select an image")]
    NotAnImage,

    /// The selected image exceeds [`MAX_IMAGE_BYTES`].
    #[error("Image must be less than 5MB")]
    ImageTooLarge,
}

/// An image file selected in the admin product form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name as selected, used for its extension
    pub file_name: String,

    /// MIME type of the file
    pub content_type: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image from disk, taking its MIME type from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read.
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = fs::read(path)?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            content_type: content_type_for(&file_name).to_string(),
            file_name,
            bytes,
        })
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }

    /// Lower-cased file extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Check the upload is an image no larger than [`MAX_IMAGE_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`ProductDraftError::NotAnImage`] or [`ProductDraftError::ImageTooLarge`].
    pub fn validate(&self) -> Result<(), ProductDraftError> {
        if !self.content_type.starts_with("image/") {
            return Err(ProductDraftError::NotAnImage);
        }

        if self.size() > MAX_IMAGE_BYTES {
            return Err(ProductDraftError::ImageTooLarge);
        }

        Ok(())
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("avif") => "image/avif",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Product form contents: a new product when `id` is `None`, an edit otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Product being edited, if any
    pub id: Option<ProductId>,

    /// Product title
    pub title: String,

    /// Product price, in whole rupees
    pub price: u64,

    /// Image reference, either freshly uploaded or kept from the existing product
    pub image_reference: String,
}

impl ProductDraft {
    /// Trim the draft and check the required fields are present.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductDraftError`] naming the first missing field.
    pub fn validated(self) -> Result<Self, ProductDraftError> {
        self.check_title()?;

        let title = self.title.trim().to_string();
        let image_reference = self.image_reference.trim().to_string();

        if image_reference.is_empty() {
            return Err(ProductDraftError::MissingImage);
        }

        Ok(Self {
            title,
            image_reference,
            ..self
        })
    }

    /// Check the title is not blank.
    ///
    /// # Errors
    ///
    /// Returns [`ProductDraftError::MissingTitle`].
    pub fn check_title(&self) -> Result<(), ProductDraftError> {
        if self.title.trim().is_empty() {
            return Err(ProductDraftError::MissingTitle);
        }

        Ok(())
    }

    /// Whether saving this draft edits an existing product.
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}
