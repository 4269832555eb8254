use std::io::{self, Write};

use bistro::{
    cart::Cart,
    ids::RestaurantId,
    items::LineItem,
    orders::{Address, OrderRequest, PaymentMethod, eta_display},
    receipt::Receipt,
};
use bistro_app::{config::ClientConfig, context::AppContext};
use clap::Args;
use jiff::Timestamp;
use rusty_money::iso::BRL;

use crate::cli::{account::sign_in, labels};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Restaurant id
    #[arg(long)]
    restaurant: String,

    /// Product to order as `id` or `id=quantity`; repeatable
    #[arg(short, long = "item", required = true)]
    items: Vec<String>,

    /// Street
    #[arg(long)]
    street: String,

    /// House number
    #[arg(long)]
    number: String,

    /// District
    #[arg(long)]
    district: Option<String>,

    /// City
    #[arg(long, requires = "state")]
    city: Option<String>,

    /// State
    #[arg(long, requires = "city")]
    state: Option<String>,

    /// Coupon code
    #[arg(short, long)]
    coupon: Option<String>,

    /// Payment method (credit_card, debit_card, cash, pix)
    #[arg(long, default_value_t = PaymentMethod::CreditCard)]
    payment: PaymentMethod,
}

pub(crate) async fn run(
    args: CheckoutArgs,
    config: &ClientConfig,
    context: &AppContext,
) -> Result<(), String> {
    let restaurant_id = RestaurantId::new(args.restaurant);

    let restaurant = context
        .catalog
        .list_restaurants()
        .await
        .map_err(|error| format!("failed to list restaurants: {error}"))?
        .into_iter()
        .find(|restaurant| restaurant.id == restaurant_id)
        .ok_or_else(|| format!("unknown restaurant {restaurant_id}"))?;

    if !restaurant.is_open {
        return Err(format!("{} is not taking orders", restaurant.name));
    }

    let products = context
        .catalog
        .list_products(&restaurant_id)
        .await
        .map_err(|error| format!("failed to load menu: {error}"))?;

    let mut cart = Cart::for_restaurant(restaurant_id, BRL);

    for raw in &args.items {
        let (id, quantity) = parse_item(raw)?;

        let product = products
            .iter()
            .find(|product| product.id.as_str() == id)
            .ok_or_else(|| format!("{id:?} is not on the menu"))?;

        let line = LineItem::new(product.id.clone(), product.name.clone(), product.price, quantity)
            .map_err(|error| error.to_string())?;

        cart = cart.add_line(line).map_err(|error| error.to_string())?;
    }

    let now = Timestamp::now();

    if let Some(code) = args.coupon.as_deref() {
        cart = context
            .checkout
            .apply_coupon_code(&cart, code, now)
            .await
            .map_err(|error| format!("coupon {code:?} not applied: {error}"))?;
    }

    let mut address = Address::new(args.street, args.number).map_err(|error| error.to_string())?;

    if let Some(district) = args.district {
        address = address.with_district(district);
    }

    if let (Some(city), Some(state)) = (args.city, args.state) {
        address = address.with_city(city, state);
    }

    let mut request = OrderRequest::new(now)
        .with_address(address)
        .with_payment_method(args.payment);

    if let Some(window) = restaurant.delivery_window {
        request = request.with_delivery_window(window);
    }

    let session = sign_in(config, context).await?;

    let placed = context
        .checkout
        .place_order(&cart, restaurant.delivery_fee, request, &session)
        .await
        .map_err(|error| format!("order not placed: {error}"))?;

    let receipt = Receipt::from_order(&placed.order).map_err(|error| error.to_string())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle, "\n {}", restaurant.name).map_err(|error| error.to_string())?;

    receipt
        .write_to(&mut handle)
        .map_err(|error| format!("failed to write receipt: {error}"))?;

    writeln!(
        handle,
        " Pedido #{} confirmado\n Pagamento: {}\n Entrega: {}",
        placed.reference.short(),
        labels::payment(placed.order.payment_method()),
        placed.order.address(),
    )
    .map_err(|error| error.to_string())?;

    if let Some(eta) = placed.order.estimated_delivery_time() {
        writeln!(handle, " Tempo estimado: {}", eta_display(eta, now))
            .map_err(|error| error.to_string())?;
    }

    Ok(())
}

fn parse_item(raw: &str) -> Result<(&str, u32), String> {
    match raw.split_once('=') {
        Some((id, quantity)) => quantity
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|quantity| *quantity > 0)
            .map(|quantity| (id.trim(), quantity))
            .ok_or_else(|| format!("invalid quantity in {raw:?}")),
        None => Ok((raw.trim(), 1)),
    }
}
