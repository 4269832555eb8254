//! Integration tests for pricing a burger joint order end to end.
//!
//! The `burger-joint` fixture set holds:
//!
//! - Whopper R$ 25.90 × 2 and Batata Frita R$ 12.50 × 1 (subtotal R$ 64.30)
//! - Delivery fee R$ 5.99, delivered in 30-40 min
//! - `SAVE10`: R$ 10.00 off orders of at least R$ 20.00
//!
//! Expected total: R$ 64.30 + R$ 5.99 - R$ 10.00 = R$ 60.29

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use rusty_money::Money;
use testresult::TestResult;

use bistro::prelude::*;

fn placed_at() -> Result<Timestamp, jiff::Error> {
    "2026-03-01T19:30:00Z".parse()
}

#[test]
fn burger_joint_quote_matches_expected_totals() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;
    let currency = fixture.currency()?;

    let cart = fixture.cart_with_coupon()?;
    let quote = cart.quote(fixture.delivery_fee()?)?;

    assert_eq!(quote.subtotal(), Money::from_minor(64_30, currency));
    assert_eq!(quote.discount(), Money::from_minor(10_00, currency));
    assert_eq!(quote.total(), Money::from_minor(60_29, currency));
    assert_eq!(format_amount(&quote.total()), "R$ 60.29");

    Ok(())
}

#[test]
fn small_order_is_ineligible_for_save10() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;

    // Batata Frita + Refrigerante = R$ 15.00
    let cart = Cart::new(fixture.currency()?)
        .add_item(fixture.product("fries")?)?
        .add_item(fixture.product("soda")?)?;

    assert_eq!(cart.subtotal()?, Money::from_minor(15_00, fixture.currency()?));

    let result = apply_coupon(cart.subtotal()?, fixture.coupon("SAVE10")?);

    match result {
        Err(CouponError::Ineligible { minimum, subtotal }) => {
            assert_eq!(minimum, Decimal::new(20_00, 2));
            assert_eq!(subtotal, Decimal::new(15_00, 2));
        }
        other => panic!("expected Ineligible, got {other:?}"),
    }

    Ok(())
}

#[test]
fn large_fixed_coupon_is_clamped_to_subtotal() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;
    let currency = fixture.currency()?;

    let cart = Cart::new(currency)
        .add_item(fixture.product("soda")?)?
        .apply_coupon(fixture.coupon("BEMVINDO")?.clone())?;

    let quote = cart.quote(fixture.delivery_fee()?)?;

    assert_eq!(quote.discount(), Money::from_minor(2_50, currency));
    assert_eq!(quote.total(), Money::from_minor(5_99, currency));

    Ok(())
}

#[test]
fn expired_coupon_does_not_resolve() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;

    let result = Coupon::resolve("VERAO2024", fixture.lookup_coupon("VERAO2024"), placed_at()?);

    assert!(matches!(result, Err(CouponError::Invalid(code)) if code == "VERAO2024"));

    Ok(())
}

#[test]
fn coupon_codes_are_case_sensitive() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;

    let result = Coupon::resolve("save10", fixture.lookup_coupon("save10"), placed_at()?);

    assert!(matches!(result, Err(CouponError::Invalid(_))));

    Ok(())
}

#[test]
fn placing_the_fixture_cart_freezes_an_order() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;
    let restaurant = fixture.restaurant().ok_or(FixtureError::NoMenu)?;

    let cart = fixture.cart_with_coupon()?;

    let mut request = OrderRequest::new(placed_at()?)
        .with_address(Address::new("Rua das Flores", "123")?.with_label("Casa"))
        .with_payment_method(PaymentMethod::Pix);

    if let Some(window) = restaurant.delivery_window {
        request = request.with_delivery_window(window);
    }

    let order = place_order(&cart, restaurant.delivery_fee, request)?;

    assert_eq!(order.status(), OrderStatus::Pending);
    assert_eq!(order.total(), Money::from_minor(60_29, fixture.currency()?));
    assert_eq!(order.restaurant_id(), Some(&restaurant.id));
    assert_eq!(
        order.estimated_delivery_time(),
        Some(placed_at()?.checked_add(SignedDuration::from_mins(40))?)
    );

    // The caller clears the cart after submission; the order keeps its lines.
    let cleared = cart.clear();

    assert!(cleared.is_empty());
    assert_eq!(order.items().len(), 2);
    assert_eq!(order.item_count(), 3);

    Ok(())
}

#[test]
fn empty_cart_cannot_be_placed() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;

    let result = place_order(
        &Cart::new(fixture.currency()?),
        fixture.delivery_fee()?,
        OrderRequest::new(placed_at()?).with_address(Address::new("Av. Paulista", "1000")?),
    );

    assert!(matches!(result, Err(PlaceOrderError::EmptyCart)));

    Ok(())
}

#[test]
fn percentage_coupon_on_free_delivery_pizzeria() -> TestResult {
    let fixture = Fixture::from_set("pizzeria")?;
    let currency = fixture.currency()?;

    let cart = fixture.cart_with_coupon()?;
    let quote = cart.quote(fixture.delivery_fee()?)?;

    // 45.00 + 49.90 + 2 × 11.00 = 116.90; 15% = 17.535, rounded half away from zero
    assert_eq!(quote.subtotal(), Money::from_minor(116_90, currency));
    assert_eq!(quote.discount(), Money::from_minor(17_54, currency));
    assert_eq!(quote.total(), Money::from_minor(99_36, currency));
    assert!(fixture.restaurant().is_some_and(Restaurant::has_free_delivery));

    Ok(())
}

#[test]
fn menu_categories_keep_menu_order() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;

    assert_eq!(
        categories(fixture.products()),
        ["Burgers", "Acompanhamentos", "Bebidas"]
    );
    assert_eq!(in_category(fixture.products(), "Burgers").count(), 2);

    Ok(())
}

#[test]
fn receipt_for_the_fixture_cart() -> TestResult {
    let fixture = Fixture::from_set("burger-joint")?;

    let receipt = Receipt::from_cart(&fixture.cart_with_coupon()?, fixture.delivery_fee()?)?;

    let mut out = Vec::new();
    receipt.write_to(&mut out)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("Batata Frita"));
    assert!(output.contains("R$ 60.29"));

    Ok(())
}
