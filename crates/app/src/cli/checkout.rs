use clap::Args;
use storefront::{cart::CartManager, checkout::CustomerDetails, money::format_rupees};
use storefront_app::{checkout::CheckoutError, config::StorefrontConfig, context::AppContext};

/// Delivery details. Blank fields are reported by validation rather than by the parser.
#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Full name
    #[arg(long, default_value = "")]
    name: String,

    /// 10-digit phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Email address for the receipt
    #[arg(long, default_value = "")]
    email: String,

    /// Street address
    #[arg(long, default_value = "")]
    address: String,

    /// City
    #[arg(long, default_value = "")]
    city: String,

    /// 6-digit pincode
    #[arg(long, default_value = "")]
    pincode: String,

    /// Delivery notes
    #[arg(long)]
    notes: Option<String>,
}

impl From<CheckoutArgs> for CustomerDetails {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            name: args.name,
            phone: args.phone,
            email: args.email,
            address: args.address,
            city: args.city,
            pincode: args.pincode,
            notes: args.notes,
        }
    }
}

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "CLI output"
)]
pub(crate) async fn run(
    context: &AppContext,
    config: &StorefrontConfig,
    args: CheckoutArgs,
) -> Result<(), String> {
    let mut cart = CartManager::open(config.cart_store());
    let details = CustomerDetails::from(args);

    let placed = match context.checkout().place_order(&mut cart, &details).await {
        Ok(placed) => placed,
        Err(CheckoutError::Invalid(report)) => {
            for field_error in report.iter() {
                eprintln!("  {field_error}");
            }

            return Err("checkout form has errors".to_string());
        }
        Err(error) => return Err(error.to_string()),
    };

    println!("order_id: {}", placed.order.id);
    println!("total: {}", format_rupees(placed.order.payload.total()));
    println!("created_at: {}", placed.order.created_at);

    match placed.receipt.settled().await {
        Some(_) => println!("receipt sent to {}", placed.order.payload.email()),
        None => println!("receipt could not be sent; the order is still placed"),
    }

    Ok(())
}
