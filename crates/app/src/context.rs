//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{
    admin::AdminService,
    backend::{BackendConfig, RestBackend},
    catalog::CatalogStore,
    checkout::CheckoutService,
    images::ImageStore,
    notify::Notifier,
    orders::OrderStore,
    receipts::{HttpReceiptSender, ReceiptSender, ReceiptSenderConfig},
};

/// Collaborators shared by the storefront services.
#[derive(Clone)]
pub struct AppContext {
    /// Product catalog
    pub catalog: Arc<dyn CatalogStore>,

    /// Product image bucket
    pub images: Arc<dyn ImageStore>,

    /// Order store
    pub orders: Arc<dyn OrderStore>,

    /// Receipt email sender
    pub receipts: Arc<dyn ReceiptSender>,

    /// Where user-facing notifications go
    pub notifier: Arc<dyn Notifier>,
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context against the hosted backend and receipt endpoint.
    #[must_use]
    pub fn connect(
        backend: BackendConfig,
        receipts: ReceiptSenderConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let backend = Arc::new(RestBackend::new(backend));

        Self {
            catalog: backend.clone(),
            images: backend.clone(),
            orders: backend,
            receipts: Arc::new(HttpReceiptSender::new(receipts)),
            notifier,
        }
    }

    /// Checkout service over this context's order store and receipt sender.
    #[must_use]
    pub fn checkout(&self) -> CheckoutService {
        CheckoutService::new(
            Arc::clone(&self.orders),
            Arc::clone(&self.receipts),
            Arc::clone(&self.notifier),
        )
    }

    /// Admin service over this context's catalog, image bucket and order store.
    #[must_use]
    pub fn admin(&self) -> AdminService {
        AdminService::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.images),
            Arc::clone(&self.orders),
            Arc::clone(&self.notifier),
        )
    }
}
