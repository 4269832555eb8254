//! Restaurants

use std::{fmt, str::FromStr};

use jiff::SignedDuration;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::ids::RestaurantId;

/// Errors parsing a delivery window.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeliveryWindowError {
    /// The text was not of the form `"30-40 min"` or `"25 min"`.
    #[error("invalid delivery window: {0:?}")]
    Invalid(String),
}

/// Advertised delivery time range in minutes, e.g. `30-40 min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryWindow {
    min_minutes: u32,
    max_minutes: u32,
}

impl DeliveryWindow {
    /// Create a window. The bounds are swapped if given in reverse.
    pub fn new(min_minutes: u32, max_minutes: u32) -> Self {
        Self {
            min_minutes: min_minutes.min(max_minutes),
            max_minutes: min_minutes.max(max_minutes),
        }
    }

    /// Lower bound in minutes
    pub fn min_minutes(&self) -> u32 {
        self.min_minutes
    }

    /// Upper bound in minutes
    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }

    /// Upper bound as a duration; estimates use the pessimistic end of the window.
    pub fn upper_bound(&self) -> SignedDuration {
        SignedDuration::from_mins(i64::from(self.max_minutes))
    }
}

impl FromStr for DeliveryWindow {
    type Err = DeliveryWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DeliveryWindowError::Invalid(s.to_string());

        let range = s.trim().strip_suffix("min").unwrap_or(s).trim();

        let parse = |part: &str| part.trim().parse::<u32>().map_err(|_err| invalid());

        match range.split_once('-') {
            Some((min, max)) => Ok(Self::new(parse(min)?, parse(max)?)),
            None => {
                let minutes = parse(range)?;

                Ok(Self::new(minutes, minutes))
            }
        }
    }
}

impl fmt::Display for DeliveryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min_minutes == self.max_minutes {
            write!(f, "{} min", self.max_minutes)
        } else {
            write!(f, "{}-{} min", self.min_minutes, self.max_minutes)
        }
    }
}

/// Restaurant
#[derive(Debug, Clone)]
pub struct Restaurant<'a> {
    /// Catalog id
    pub id: RestaurantId,

    /// Restaurant name
    pub name: String,

    /// Cuisine category, e.g. "Pizza"
    pub category: String,

    /// Advertised delivery time
    pub delivery_window: Option<DeliveryWindow>,

    /// Delivery fee; zero means free delivery
    pub delivery_fee: Money<'a, Currency>,

    /// Average rating, 0 to 5
    pub rating: Option<Decimal>,

    /// Whether the restaurant is taking orders
    pub is_open: bool,

    /// Image URL
    pub image: Option<String>,
}

impl Restaurant<'_> {
    /// Whether delivery is free.
    pub fn has_free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}
