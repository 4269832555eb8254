//! Coupon Records

use bistro::coupons::{Coupon, CouponDiscount};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{domain::catalog::records::brl, http::ClientError};

/// How a coupon's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// `discount_value` is in percentage points
    Percentage,

    /// `discount_value` is an amount in reais
    Fixed,
}

/// Coupon as returned by `GET /coupons/validate/{code}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponRecord {
    /// Canonical code, when the API echoes it
    #[serde(default)]
    pub code: Option<String>,

    /// How `discount_value` is read
    pub discount_type: DiscountType,

    /// Percentage points or reais
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_value: Decimal,

    /// Minimum subtotal in reais
    #[serde(default, with = "rust_decimal::serde::float")]
    pub min_order: Decimal,

    /// End of validity
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl CouponRecord {
    /// Build the domain coupon; `requested` stands in when the API omits the code.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] if the discount or minimum is out of range.
    pub fn into_coupon(self, requested: &str) -> Result<Coupon<'static>, ClientError> {
        let discount = match self.discount_type {
            DiscountType::Percentage => CouponDiscount::percentage(self.discount_value),
            DiscountType::Fixed => CouponDiscount::fixed(brl(self.discount_value)?),
        }
        .map_err(|error| ClientError::Decode(error.to_string()))?;

        let code = self.code.unwrap_or_else(|| requested.to_string());

        let coupon = Coupon::new(code, discount, brl(self.min_order)?)
            .map_err(|error| ClientError::Decode(error.to_string()))?;

        Ok(match self.expires_at {
            Some(expires_at) => coupon.with_expiry(expires_at),
            None => coupon,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::BRL};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn fixed_coupon_from_reference_payload() -> TestResult {
        let record: CouponRecord = serde_json::from_str(
            r#"{"discountType":"fixed","discountValue":10,"minOrder":20}"#,
        )?;

        let coupon = record.into_coupon("SAVE10")?;

        assert_eq!(coupon.code(), "SAVE10");
        assert_eq!(coupon.min_order(), &Money::from_minor(20_00, BRL));
        assert!(matches!(
            coupon.discount(),
            CouponDiscount::Fixed(amount) if *amount == Money::from_minor(10_00, BRL)
        ));

        Ok(())
    }

    #[test]
    fn returned_code_wins_over_requested() -> TestResult {
        let record: CouponRecord = serde_json::from_str(
            r#"{"code":"SAVE10","discountType":"percentage","discountValue":10,"minOrder":0}"#,
        )?;

        let coupon = record.into_coupon("save10")?;

        assert_eq!(coupon.code(), "SAVE10");
        assert!(matches!(coupon.discount(), CouponDiscount::Percentage(_)));

        Ok(())
    }

    #[test]
    fn expiry_is_carried_over() -> TestResult {
        let record: CouponRecord = serde_json::from_str(
            r#"{"discountType":"percentage","discountValue":20,"minOrder":0,"expiresAt":"2024-03-20T00:00:00Z"}"#,
        )?;

        let coupon = record.into_coupon("VERAO2024")?;

        assert!(coupon.is_expired("2024-03-21T00:00:00Z".parse()?));

        Ok(())
    }

    #[test]
    fn out_of_range_percentage_is_a_decode_error() -> TestResult {
        let record: CouponRecord = serde_json::from_str(
            r#"{"discountType":"percentage","discountValue":150,"minOrder":0}"#,
        )?;

        assert!(matches!(record.into_coupon("X"), Err(ClientError::Decode(_))));

        Ok(())
    }
}
