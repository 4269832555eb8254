use std::io::{self, Write};

use bistro::{pricing::format_amount, restaurants::Restaurant};
use bistro_app::context::AppContext;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Style, object::Columns},
};

#[derive(Tabled)]
struct RestaurantRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Delivery")]
    delivery: String,
    #[tabled(rename = "Fee")]
    fee: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&Restaurant<'_>> for RestaurantRow {
    fn from(restaurant: &Restaurant<'_>) -> Self {
        let name = if restaurant.is_open {
            restaurant.name.clone()
        } else {
            format!("{} (fechado)", restaurant.name)
        };

        Self {
            id: restaurant.id.to_string(),
            name,
            category: restaurant.category.clone(),
            delivery: restaurant
                .delivery_window
                .map(|window| window.to_string())
                .unwrap_or_default(),
            fee: if restaurant.has_free_delivery() {
                "Grátis".to_string()
            } else {
                format_amount(&restaurant.delivery_fee)
            },
            rating: restaurant
                .rating
                .map(|rating| format!("★ {rating:.1}"))
                .unwrap_or_default(),
        }
    }
}

pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    let restaurants = context
        .catalog
        .list_restaurants()
        .await
        .map_err(|error| format!("failed to list restaurants: {error}"))?;

    let mut table = Table::new(restaurants.iter().map(RestaurantRow::from));

    table
        .with(Style::modern_rounded())
        .modify(Columns::new(4..6), Alignment::right());

    writeln!(io::stdout().lock(), "{table}").map_err(|error| error.to_string())
}
