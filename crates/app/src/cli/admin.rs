use std::path::PathBuf;

use clap::{Args, Subcommand};
use storefront::{
    money::format_rupees,
    products::{ImageUpload, ProductDraft, ProductId},
};
use storefront_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Debug, Subcommand)]
enum AdminSubcommand {
    /// Show product count, order count and revenue
    Dashboard,

    /// List orders, newest first
    Orders,

    /// Add a product, or update one when --id is given
    SaveProduct(SaveProductArgs),

    /// Delete a product
    DeleteProduct {
        /// Product id
        id: ProductId,
    },
}

#[derive(Debug, Args)]
struct SaveProductArgs {
    /// Product to update
    #[arg(long)]
    id: Option<ProductId>,

    /// Product title
    #[arg(long)]
    title: String,

    /// Price in whole rupees
    #[arg(long)]
    price: u64,

    /// Image URL to keep when no new file is uploaded
    #[arg(long, default_value = "")]
    image: String,

    /// Image file to upload to the product bucket
    #[arg(long, conflicts_with = "image")]
    image_file: Option<PathBuf>,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(context: &AppContext, command: AdminCommand) -> Result<(), String> {
    let admin = context.admin();

    match command.command {
        AdminSubcommand::Dashboard => {
            let dashboard = admin
                .dashboard()
                .await
                .map_err(|error| format!("failed to load dashboard: {error}"))?;

            println!("products: {}", dashboard.products);
            println!("orders: {}", dashboard.orders);
            println!("revenue: {}", format_rupees(dashboard.revenue));
        }
        AdminSubcommand::Orders => {
            let orders = admin
                .orders()
                .await
                .map_err(|error| format!("failed to load orders: {error}"))?;

            if orders.is_empty() {
                println!("no orders yet");
                return Ok(());
            }

            for order in orders {
                let payload = &order.payload;

                println!("order_id: {}", order.id);
                println!("created_at: {}", order.created_at);
                println!("customer: {} <{}>", payload.customer_name(), payload.email());
                println!("phone: {}", payload.phone());
                println!("address: {}", payload.full_address());
                println!("items: {}", payload.items().len());
                println!("total: {}", format_rupees(payload.total()));
                println!("status: {:?}", payload.status());
                println!();
            }
        }
        AdminSubcommand::SaveProduct(args) => {
            let image = args
                .image_file
                .as_deref()
                .map(ImageUpload::read)
                .transpose()
                .map_err(|error| format!("failed to read image file: {error}"))?;

            let product = admin
                .save_product(
                    ProductDraft {
                        id: args.id,
                        title: args.title,
                        price: args.price,
                        image_reference: args.image,
                    },
                    image,
                )
                .await
                .map_err(|error| error.to_string())?;

            println!("product_id: {}", product.id);
            println!("image_url: {}", product.image_reference);
        }
        AdminSubcommand::DeleteProduct { id } => {
            admin
                .delete_product(id)
                .await
                .map_err(|error| error.to_string())?;
        }
    }

    Ok(())
}
