//! Storefront configuration

use std::path::PathBuf;

use clap::Args;
use storefront::storage::FileStore;

use crate::{backend::BackendConfig, receipts::ReceiptSenderConfig};

/// Hosted backend settings.
#[derive(Debug, Args)]
pub struct BackendArgs {
    /// Hosted backend project URL
    #[arg(long, env = "STOREFRONT_BACKEND_URL")]
    pub backend_url: String,

    /// Hosted backend API key
    #[arg(long, env = "STOREFRONT_API_KEY", hide_env_values = true)]
    pub api_key: String,
}

impl BackendArgs {
    /// Connection settings for the hosted backend.
    #[must_use]
    pub fn backend(&self) -> BackendConfig {
        BackendConfig {
            url: self.backend_url.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

/// Storefront settings shared by every command.
#[derive(Debug, Args)]
pub struct StorefrontConfig {
    /// Hosted backend settings.
    #[command(flatten)]
    pub backend: BackendArgs,

    /// Endpoint that emails order receipts
    #[arg(long, env = "STOREFRONT_RECEIPT_URL")]
    pub receipt_url: String,

    /// Directory holding the persisted cart
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,

    /// Send notifications to the log instead of the terminal
    #[arg(long, env = "STOREFRONT_HEADLESS")]
    pub headless: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl StorefrontConfig {
    /// Where receipt requests are posted.
    #[must_use]
    pub fn receipts(&self) -> ReceiptSenderConfig {
        ReceiptSenderConfig {
            endpoint: self.receipt_url.clone(),
        }
    }

    /// Key-value store backing the cart between runs.
    #[must_use]
    pub fn cart_store(&self) -> FileStore {
        FileStore::new(self.data_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        config: StorefrontConfig,
    }

    #[test]
    fn flags_build_collaborator_configs() -> TestResult {
        let harness = Harness::try_parse_from([
            "storefront",
            "--backend-url",
            "https://shop.example",
            "--api-key",
            "anon",
            "--receipt-url",
            "https://shop.example/api/send-receipt",
            "--data-dir",
            "/tmp/cart",
        ])?;

        let backend = harness.config.backend.backend();

        assert_eq!(backend.url, "https://shop.example");
        assert_eq!(backend.api_key, "anon");
        assert_eq!(
            harness.config.receipts().endpoint,
            "https://shop.example/api/send-receipt"
        );
        assert_eq!(harness.config.cart_store().dir(), Path::new("/tmp/cart"));
        assert!(!harness.config.headless);

        Ok(())
    }

    #[test]
    fn headless_flag_is_read() -> TestResult {
        let harness = Harness::try_parse_from([
            "storefront",
            "--backend-url",
            "https://shop.example",
            "--api-key",
            "anon",
            "--receipt-url",
            "https://shop.example/api/send-receipt",
            "--headless",
        ])?;

        assert!(harness.config.headless);

        Ok(())
    }
}
