//! Integration tests for the order status lifecycle and delivery tracking.

use jiff::{SignedDuration, Timestamp};
use testresult::TestResult;

use bistro::prelude::*;

fn placed_at() -> Result<Timestamp, jiff::Error> {
    "2026-03-01T19:30:00Z".parse()
}

fn pending_order() -> Result<Order<'static>, Box<dyn std::error::Error>> {
    let fixture = Fixture::from_set("burger-joint")?;
    let restaurant = fixture.restaurant().ok_or(FixtureError::NoMenu)?;

    let request = OrderRequest::new(placed_at()?)
        .with_address(Address::new("Rua das Flores", "123")?)
        .with_delivery_window(DeliveryWindow::new(30, 40));

    Ok(place_order(&fixture.cart()?, restaurant.delivery_fee, request)?)
}

#[test]
fn order_walks_the_whole_lifecycle() -> TestResult {
    let mut order = pending_order()?;

    let mut steps = Vec::new();

    for next in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ] {
        order.transition_status(next)?;
        steps.push(order.tracking_step());
    }

    assert_eq!(
        steps,
        [
            Some(TrackingStep::Preparing),
            Some(TrackingStep::Preparing),
            Some(TrackingStep::OnTheWay),
            Some(TrackingStep::Delivered),
        ]
    );
    assert!(order.status().is_terminal());

    Ok(())
}

#[test]
fn delivered_order_cannot_go_back_to_preparing() -> TestResult {
    let mut order = pending_order()?;

    for next in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ] {
        order.transition_status(next)?;
    }

    assert_eq!(
        order.transition_status(OrderStatus::Preparing),
        Err(LifecycleError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Preparing,
        })
    );
    assert_eq!(order.status(), OrderStatus::Delivered);

    Ok(())
}

#[test]
fn pending_order_can_be_cancelled() -> TestResult {
    let mut order = pending_order()?;

    order.transition_status(OrderStatus::Cancelled)?;

    assert_eq!(order.status(), OrderStatus::Cancelled);
    assert_eq!(order.tracking_step(), None);

    Ok(())
}

#[test]
fn order_on_the_way_cannot_be_cancelled() -> TestResult {
    let mut order = pending_order()?;

    order.transition_status(OrderStatus::Preparing)?;
    order.transition_status(OrderStatus::Ready)?;
    order.transition_status(OrderStatus::OnTheWay)?;

    assert!(matches!(
        order.transition_status(OrderStatus::Cancelled),
        Err(LifecycleError::InvalidTransition { .. })
    ));

    Ok(())
}

#[test]
fn eta_counts_down_and_clamps_at_zero() -> TestResult {
    let order = pending_order()?;
    let placed_at = placed_at()?;

    assert_eq!(order.eta_minutes(placed_at), Some(40));
    assert_eq!(
        order.eta_minutes(placed_at.checked_add(SignedDuration::from_mins(25))?),
        Some(15)
    );
    assert_eq!(
        order.eta_minutes(placed_at.checked_add(SignedDuration::from_hours(2))?),
        Some(0)
    );

    Ok(())
}

#[test]
fn order_history_is_split_into_active_and_past() -> TestResult {
    let active = pending_order()?;

    let mut delivered = pending_order()?;
    for next in [
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
    ] {
        delivered.transition_status(next)?;
    }

    let mut cancelled = pending_order()?;
    cancelled.transition_status(OrderStatus::Cancelled)?;

    let (current, past) = partition_orders([delivered, active.clone(), cancelled]);

    assert_eq!(current.len(), 1);
    assert_eq!(current.first().map(Order::id), Some(active.id()));
    assert_eq!(past.len(), 2);

    Ok(())
}

#[test]
fn every_order_gets_a_fresh_id() -> TestResult {
    let first = pending_order()?;
    let second = pending_order()?;

    assert_ne!(first.id(), second.id());

    Ok(())
}
