use clap::Args;
use storefront::{money::format_rupees, products::search};
use storefront_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only show products whose title contains this text
    #[arg(long)]
    search: Option<String>,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(context: &AppContext, args: ProductsArgs) -> Result<(), String> {
    let products = context
        .catalog
        .list_products()
        .await
        .map_err(|error| format!("failed to load products: {error}"))?;

    let found = search(&products, args.search.as_deref().unwrap_or_default());

    if found.is_empty() {
        println!("no products found");
        return Ok(());
    }

    for product in found {
        println!(
            "{:>4}  {:<32}  {}",
            product.id.get(),
            product.title,
            format_rupees(product.price)
        );
    }

    Ok(())
}
