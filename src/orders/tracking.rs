//! Delivery tracking helpers

use std::time::Duration;

use humanize_duration::{Truncate, prelude::DurationExt};
use jiff::Timestamp;

use super::Order;

/// Progress shown to the customer while an order is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrackingStep {
    /// Pending, preparing or ready
    Preparing,

    /// With the courier
    OnTheWay,

    /// Handed over
    Delivered,
}

impl TrackingStep {
    /// Steps in display order.
    pub const ALL: [TrackingStep; 3] = [
        TrackingStep::Preparing,
        TrackingStep::OnTheWay,
        TrackingStep::Delivered,
    ];

    /// Position of the step in [`TrackingStep::ALL`].
    pub fn index(self) -> usize {
        match self {
            TrackingStep::Preparing => 0,
            TrackingStep::OnTheWay => 1,
            TrackingStep::Delivered => 2,
        }
    }

    /// Pairs every step with whether `current` has reached it.
    pub fn progress(current: TrackingStep) -> [(TrackingStep, bool); 3] {
        TrackingStep::ALL.map(|step| (step, step <= current))
    }
}

/// Whole minutes from `now` until `eta`, rounded to the nearest minute and never negative.
pub fn minutes_until(eta: Timestamp, now: Timestamp) -> u64 {
    let millis = eta.duration_since(now).as_millis();

    if millis <= 0 {
        return 0;
    }

    u64::try_from((millis + 30_000) / 60_000).unwrap_or(u64::MAX)
}

/// Humanised time left until `eta`, e.g. `25m`, truncated to minutes.
pub fn eta_display(eta: Timestamp, now: Timestamp) -> String {
    let minutes = minutes_until(eta, now);

    if minutes == 0 {
        return "0m".to_string();
    }

    let remaining = Duration::from_secs(minutes.saturating_mul(60));

    format!("{}", remaining.human(Truncate::Minute))
}

/// Splits orders into active ones and history, keeping their relative order.
pub fn partition_orders<'a>(
    orders: impl IntoIterator<Item = Order<'a>>,
) -> (Vec<Order<'a>>, Vec<Order<'a>>) {
    orders
        .into_iter()
        .partition(|order| order.status().is_active())
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    fn now() -> Result<Timestamp, jiff::Error> {
        "2026-03-01T12:00:00Z".parse()
    }

    #[test]
    fn minutes_until_rounds_to_nearest_minute() -> TestResult {
        let now = now()?;

        assert_eq!(minutes_until(now.checked_add(SignedDuration::from_secs(89))?, now), 1);
        assert_eq!(minutes_until(now.checked_add(SignedDuration::from_secs(90))?, now), 2);
        assert_eq!(minutes_until(now.checked_add(SignedDuration::from_mins(40))?, now), 40);

        Ok(())
    }

    #[test]
    fn minutes_until_is_clamped_at_zero() -> TestResult {
        let now = now()?;

        assert_eq!(minutes_until(now.checked_sub(SignedDuration::from_mins(5))?, now), 0);
        assert_eq!(minutes_until(now, now), 0);

        Ok(())
    }

    #[test]
    fn eta_display_is_never_empty() -> TestResult {
        let now = now()?;

        let soon = now.checked_add(SignedDuration::from_mins(25))?;
        let overdue = now.checked_sub(SignedDuration::from_mins(5))?;
        let imminent = now.checked_add(SignedDuration::from_secs(20))?;

        assert_eq!(eta_display(soon, now), "25m");
        assert_eq!(eta_display(overdue, now), "0m");
        assert_eq!(eta_display(imminent, now), "0m");

        Ok(())
    }

    #[test]
    fn progress_marks_reached_steps() {
        assert_eq!(
            TrackingStep::progress(TrackingStep::OnTheWay),
            [
                (TrackingStep::Preparing, true),
                (TrackingStep::OnTheWay, true),
                (TrackingStep::Delivered, false),
            ]
        );
    }

    #[test]
    fn index_matches_display_order() {
        for (i, step) in TrackingStep::ALL.into_iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }
}
