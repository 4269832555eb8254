//! Cart Fixtures

use serde::Deserialize;

/// Wrapper for a cart in YAML
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines referencing menu products by id
    pub items: Vec<CartLineFixture>,

    /// Code of a coupon from the coupon book to apply
    #[serde(default)]
    pub coupon: Option<String>,
}

/// A product reference and how many units to add
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Menu product id
    pub product: String,

    /// Units to add
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}
