use std::io::{self, Write};

use bistro::{
    ids::RestaurantId,
    pricing::format_amount,
    products::{Product, categories, in_category},
};
use bistro_app::context::AppContext;
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct MenuArgs {
    /// Restaurant id
    restaurant: String,

    /// Only show this category
    #[arg(short, long)]
    category: Option<String>,
}

pub(crate) async fn run(args: MenuArgs, context: &AppContext) -> Result<(), String> {
    let products = context
        .catalog
        .list_products(&RestaurantId::new(args.restaurant))
        .await
        .map_err(|error| format!("failed to load menu: {error}"))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let width = products
        .iter()
        .map(|product| product.name.chars().count())
        .max()
        .unwrap_or_default();

    let uncategorised: Vec<&Product<'_>> = products
        .iter()
        .filter(|product| product.category.is_none())
        .collect();

    let groups = categories(&products)
        .into_iter()
        .map(|category| (category, in_category(&products, category).collect::<Vec<_>>()))
        .chain((!uncategorised.is_empty()).then_some(("Outros", uncategorised)));

    for (category, items) in groups {
        if args
            .category
            .as_deref()
            .is_some_and(|wanted| wanted != category)
        {
            continue;
        }

        writeln!(handle, "\n{category}").map_err(|error| error.to_string())?;

        for product in items {
            writeln!(
                handle,
                "  {:<width$}  {:>10}  {}",
                product.name,
                format_amount(&product.price),
                product.id,
            )
            .map_err(|error| error.to_string())?;
        }
    }

    Ok(())
}
