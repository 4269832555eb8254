//! Order status lifecycle

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tracking::TrackingStep;

/// Errors raised by the order lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LifecycleError {
    /// The requested status change is not part of the lifecycle.
    #[error("cannot move an order from {from} to {to}")]
    InvalidTransition {
        /// Current status
        from: OrderStatus,
        /// Requested status
        to: OrderStatus,
    },

    /// The text is not a known status.
    #[error("unknown order status {0:?}")]
    UnknownStatus(String),
}

/// Where an order is in its lifecycle.
///
/// ```text
/// pending → preparing → ready → on_the_way → delivered
///    └──────────┴─────────┴──→ cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, waiting for the restaurant.
    #[default]
    Pending,

    /// Accepted and being prepared.
    Preparing,

    /// Waiting for a courier.
    Ready,

    /// With the courier; can no longer be cancelled.
    OnTheWay,

    /// Handed to the customer.
    Delivered,

    /// Cancelled before pickup.
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::OnTheWay,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Whether moving from this status to `next` is a legal lifecycle step.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Preparing)
                | (OrderStatus::Preparing, OrderStatus::Ready)
                | (OrderStatus::Ready, OrderStatus::OnTheWay)
                | (OrderStatus::OnTheWay, OrderStatus::Delivered)
                | (
                    OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready,
                    OrderStatus::Cancelled
                )
        )
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] if the step is not legal, including
    /// self transitions and any step out of a terminal status.
    pub fn transition(self, next: OrderStatus) -> Result<OrderStatus, LifecycleError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(LifecycleError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Delivered and cancelled orders never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Orders still in progress.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Tracking progress reached by this status, `None` once cancelled.
    pub fn tracking_step(self) -> Option<TrackingStep> {
        match self {
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready => {
                Some(TrackingStep::Preparing)
            }
            OrderStatus::OnTheWay => Some(TrackingStep::OnTheWay),
            OrderStatus::Delivered => Some(TrackingStep::Delivered),
            OrderStatus::Cancelled => None,
        }
    }

    /// Wire name, e.g. `on_the_way`.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::OnTheWay => "on_the_way",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LifecycleError::UnknownStatus(s.to_string()))
    }
}
