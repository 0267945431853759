//! Coupon codes. Discounts are flat currency amounts, not percentages.

use once_cell::sync::Lazy;
use std::collections::HashMap;

static COUPONS: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| HashMap::from([("DISCOUNT10", 10.0), ("SAVE20", 20.0)]));

/// Flat discount for a coupon code, matched case-insensitively.
pub fn coupon_discount(code: &str) -> Option<f64> {
    let code = code.trim().to_ascii_uppercase();
    COUPONS.get(code.as_str()).copied()
}
