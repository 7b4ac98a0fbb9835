use clap::{Args, Subcommand};
use storefront::{
    cart::CartManager, money::format_rupees, products::ProductId, storage::KeyValueStore,
};
use storefront_app::{config::StorefrontConfig, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show cart contents and totals
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },

    /// Change a line's quantity by a signed amount
    Quantity {
        /// Product id
        id: ProductId,

        /// Amount to add; negative values remove units
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Empty the cart
    Clear,
}

pub(crate) async fn run(
    context: &AppContext,
    config: &StorefrontConfig,
    command: CartCommand,
) -> Result<(), String> {
    let mut cart = CartManager::open(config.cart_store());

    match command.command {
        CartSubcommand::Show => {}
        CartSubcommand::Add { id } => {
            let products = context
                .catalog
                .list_products()
                .await
                .map_err(|error| format!("failed to load products: {error}"))?;

            let product = products
                .iter()
                .find(|product| product.id == id)
                .ok_or_else(|| format!("product {id} not found"))?;

            cart.add(product);
        }
        CartSubcommand::Quantity { id, delta } => cart.update_quantity(id, delta),
        CartSubcommand::Remove { id } => cart.remove(id),
        CartSubcommand::Clear => cart.clear(),
    }

    print_cart(&cart);

    Ok(())
}

#[expect(clippy::print_stdout, reason = "CLI output")]
fn print_cart<S: KeyValueStore>(cart: &CartManager<S>) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    for line in cart.lines() {
        println!(
            "{:>4}  {:<32}  x{:<3}  {}",
            line.product_id.get(),
            line.title,
            line.quantity,
            format_rupees(line.line_total())
        );
    }

    println!();
    println!("items: {}", cart.total_quantity());
    println!("total: {}", format_rupees(cart.total_price()));
}
