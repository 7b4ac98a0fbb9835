use std::sync::Arc;

use clap::{Parser, Subcommand};
use storefront_app::{
    config::StorefrontConfig,
    context::AppContext,
    notify::{LogNotifier, Notifier},
};

mod admin;
mod cart;
mod checkout;
mod notifier;
mod products;

#[derive(Debug, Parser)]
#[command(name = "storefront", about = "Floral Blossom storefront", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: StorefrontConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered by title
    Products(products::ProductsArgs),

    /// Inspect or change the cart
    Cart(cart::CartCommand),

    /// Place an order for the cart
    Checkout(checkout::CheckoutArgs),

    /// Manage products and review orders
    Admin(admin::AdminCommand),
}

impl Cli {
    pub(crate) fn log_level(&self) -> &str {
        &self.config.log_level
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let notifier: Arc<dyn Notifier> = if self.config.headless {
            Arc::new(LogNotifier)
        } else {
            Arc::new(notifier::TerminalNotifier)
        };

        let context = AppContext::connect(
            self.config.backend.backend(),
            self.config.receipts(),
            notifier,
        );

        match self.command {
            Commands::Products(args) => products::run(&context, args).await,
            Commands::Cart(command) => cart::run(&context, &self.config, command).await,
            Commands::Checkout(args) => checkout::run(&context, &self.config, args).await,
            Commands::Admin(command) => admin::run(&context, command).await,
        }
    }
}
