use std::{
    io::{self, Write},
    path::PathBuf,
};

use bistro::{coupons::Coupon, fixtures::Fixture, pricing::round_to_cents, receipt::Receipt};
use clap::Args;
use jiff::Timestamp;
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct QuoteArgs {
    /// Fixture set name
    #[arg(short, long, default_value = "burger-joint")]
    fixture: String,

    /// Directory holding the `menus`, `coupons` and `carts` fixtures
    #[arg(long, env = "BISTRO_FIXTURES", default_value = "./fixtures")]
    fixtures_dir: PathBuf,

    /// Coupon code from the fixture coupon book, replacing the cart's own
    #[arg(short, long)]
    coupon: Option<String>,

    /// Delivery fee, replacing the restaurant's (e.g. 4.99)
    #[arg(long, env = "BISTRO_DELIVERY_FEE")]
    delivery_fee: Option<Decimal>,
}

pub(crate) fn run(args: QuoteArgs) -> Result<(), String> {
    let QuoteArgs {
        fixture: set,
        fixtures_dir,
        coupon,
        delivery_fee,
    } = args;

    let fixture = Fixture::from_set_in(fixtures_dir, &set)
        .map_err(|error| format!("failed to load fixture {set:?}: {error}"))?;

    let cart = fixture
        .cart()
        .map_err(|error| format!("failed to build cart: {error}"))?;

    let code = coupon.as_deref().or(fixture.cart_coupon_code());

    let cart = match code {
        Some(code) => {
            let coupon = Coupon::resolve(code, fixture.lookup_coupon(code), Timestamp::now())
                .map_err(|error| error.to_string())?;

            cart.apply_coupon(coupon).map_err(|error| error.to_string())?
        }
        None => cart,
    };

    let delivery_fee = match delivery_fee {
        Some(amount) => round_to_cents(amount, cart.currency()),
        None => fixture.delivery_fee().map_err(|error| error.to_string())?,
    };

    let receipt = Receipt::from_cart(&cart, delivery_fee).map_err(|error| error.to_string())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if let Some(restaurant) = fixture.restaurant() {
        writeln!(handle, "\n {}", restaurant.name).map_err(|error| error.to_string())?;
    }

    receipt
        .write_to(&mut handle)
        .map_err(|error| format!("failed to write receipt: {error}"))
}
