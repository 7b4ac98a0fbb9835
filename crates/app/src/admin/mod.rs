//! Admin service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use storefront::{
    orders::{Order, revenue},
    products::{ImageUpload, Product, ProductDraft, ProductDraftError, ProductId},
};
use thiserror::Error;
use tracing::{error, info};

use crate::{
    catalog::{CatalogError, CatalogStore},
    images::{ImageError, ImageStore},
    notify::{Notification, Notifier},
    orders::{OrderStore, OrdersError},
};

/// Errors raised by admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The product being edited or deleted does not exist.
    #[error("product not found")]
    NotFound,

    /// The product form is incomplete or the selected image is unusable.
    #[error(transparent)]
    InvalidProduct(#[from] ProductDraftError),

    /// The product image could not be uploaded.
    #[error("failed to upload product image")]
    Image(#[from] ImageError),

    /// The catalog store failed.
    #[error("catalog operation failed")]
    Catalog(#[source] CatalogError),

    /// The order store failed.
    #[error("failed to load orders")]
    Orders(#[from] OrdersError),
}

impl From<CatalogError> for AdminError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound => Self::NotFound,
            other => Self::Catalog(other),
        }
    }
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dashboard {
    /// Number of products in the catalog
    pub products: usize,

    /// Number of orders placed
    pub orders: usize,

    /// Sum of all order totals, in whole rupees
    pub revenue: u64,
}

/// Product and order management for shop staff.
pub struct AdminService {
    catalog: Arc<dyn CatalogStore>,
    images: Arc<dyn ImageStore>,
    orders: Arc<dyn OrderStore>,
    notifier: Arc<dyn Notifier>,
}

impl Debug for AdminService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdminService").finish_non_exhaustive()
    }
}

impl AdminService {
    /// Create a new admin service over the given collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        images: Arc<dyn ImageStore>,
        orders: Arc<dyn OrderStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            catalog,
            images,
            orders,
            notifier,
        }
    }

    /// Retrieve all products.
    ///
    /// # Errors
    ///
    /// Returns an error when the catalog cannot be read.
    pub async fn products(&self) -> Result<Vec<Product>, AdminError> {
        Ok(self.catalog.list_products().await?)
    }

    /// Retrieve all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error when orders cannot be read.
    pub async fn orders(&self) -> Result<Vec<Order>, AdminError> {
        Ok(self.orders.list_orders().await?)
    }

    /// Count products and orders and total the revenue.
    ///
    /// # Errors
    ///
    /// Returns an error when either store cannot be read.
    pub async fn dashboard(&self) -> Result<Dashboard, AdminError> {
        let products = self.catalog.list_products().await?;
        let orders = self.orders.list_orders().await?;

        Ok(Dashboard {
            products: products.len(),
            orders: orders.len(),
            revenue: revenue(&orders),
        })
    }

    /// Create or update a product from the admin form.
    ///
    /// When `image` is given it is uploaded first and its public URL replaces the draft's
    /// image reference; nothing is written to the catalog if the upload fails.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::InvalidProduct`] for an incomplete draft or unusable image,
    /// [`AdminError::Image`] when the upload fails, [`AdminError::NotFound`] when editing a
    /// product that no longer exists, or a catalog error.
    pub async fn save_product(
        &self,
        mut draft: ProductDraft,
        image: Option<ImageUpload>,
    ) -> Result<Product, AdminError> {
        if let Some(image) = image {
            if let Err(invalid) = draft.check_title().and_then(|()| image.validate()) {
                self.notifier.notify(Notification::error(invalid.to_string()));

                return Err(invalid.into());
            }

            match self.images.upload_image(&image).await {
                Ok(url) => draft.image_reference = url,
                Err(upload_error) => {
                    error!(
                        error = %upload_error,
                        file = %image.file_name,
                        "failed to upload product image"
                    );

                    self.notifier
                        .notify(Notification::error("Error saving product"));

                    return Err(upload_error.into());
                }
            }
        }

        let draft = match draft.validated() {
            Ok(draft) => draft,
            Err(invalid) => {
                self.notifier.notify(Notification::error(invalid.to_string()));

                return Err(invalid.into());
            }
        };

        let updating = draft.is_update();

        match self.catalog.upsert_product(draft.into()).await {
            Ok(product) => {
                info!(product_id = %product.id, updating, "product saved");

                self.notifier.notify(Notification::success(if updating {
                    "Product updated"
                } else {
                    "Product added"
                }));

                Ok(product)
            }
            Err(save_error) => {
                error!(error = %save_error, "failed to save product");

                self.notify_catalog_failure(&save_error, "Error saving product");

                Err(save_error.into())
            }
        }
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] when no such product exists, or a catalog error.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), AdminError> {
        match self.catalog.delete_product(id).await {
            Ok(()) => {
                info!(product_id = %id, "product deleted");

                self.notifier.notify(Notification::success("Product deleted"));

                Ok(())
            }
            Err(delete_error) => {
                error!(product_id = %id, error = %delete_error, "failed to delete product");

                self.notify_catalog_failure(&delete_error, "Error deleting product");

                Err(delete_error.into())
            }
        }
    }

    fn notify_catalog_failure(&self, failure: &CatalogError, otherwise: &'static str) {
        let message = match failure {
            CatalogError::NotFound => "Product not found",
            CatalogError::Backend(_) => otherwise,
        };

        self.notifier.notify(Notification::error(message));
    }
}
