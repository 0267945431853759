//! Subtotal, shipping, VAT and total for a group of cart lines

use serde::Serialize;
use std::collections::BTreeMap;

/// Fixed VAT rate applied to subtotal + shipping.
pub const VAT_RATE: f64 = 0.15;

/// Numeric snapshot of one cart line
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineAmounts {
    pub unit_price: Option<f64>,
    pub quantity: Option<u64>,
    pub shipping_cost: Option<f64>,
    /// Shipping must be agreed with the supplier; `shipping_cost` is not usable.
    pub shipping_negotiable: bool,
}

impl LineAmounts {
    /// `price × quantity` when both are usable numbers.
    pub fn line_total(&self) -> Option<f64> {
        let price = self.unit_price.filter(|p| p.is_finite())?;
        let quantity = self.quantity.filter(|q| *q > 0)?;
        Some(price * quantity as f64)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub subtotal: f64,
    pub shipping: f64,
    pub vat: f64,
    pub discount: f64,
    pub total: f64,
    /// Lines left out of the subtotal because their price or quantity is unusable.
    pub negotiable_lines: usize,
    /// Lines whose shipping is "Unlimited"; their shipping counts as 0 above.
    pub negotiable_shipping: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TotalDisplay {
    Amount(f64),
    ContactSupplier,
}

impl CostBreakdown {
    /// Shipping total is only meaningful when no line has negotiable shipping.
    pub fn shipping_is_negotiable(&self) -> bool {
        self.negotiable_shipping > 0
    }

    /// A total is shown only when every line is priced and it is above zero.
    pub fn total_display(&self) -> TotalDisplay {
        if self.negotiable_lines == 0 && self.negotiable_shipping == 0 && self.total > 0.0 {
            TotalDisplay::Amount(self.total)
        } else {
            TotalDisplay::ContactSupplier
        }
    }

    pub fn is_payable(&self) -> bool {
        matches!(self.total_display(), TotalDisplay::Amount(_))
    }
}

/// NaN, infinite and missing values count as zero.
pub fn safe_value(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub fn aggregate(lines: &[LineAmounts], discount: f64) -> CostBreakdown {
    let mut subtotal = 0.0;
    let mut shipping = 0.0;
    let mut negotiable_lines = 0;
    let mut negotiable_shipping = 0;

    for line in lines {
        match line.line_total() {
            Some(amount) => subtotal += amount,
            None => negotiable_lines += 1,
        }
        if line.shipping_negotiable {
            negotiable_shipping += 1;
        } else {
            shipping += safe_value(line.shipping_cost);
        }
    }

    let discount = safe_value(Some(discount));
    let vat = (subtotal + shipping) * VAT_RATE;
    let total = subtotal + shipping + vat - discount;

    CostBreakdown {
        subtotal,
        shipping,
        vat,
        discount,
        total,
        negotiable_lines,
        negotiable_shipping,
    }
}

/// Group lines by owning supplier, ordered by supplier id.
pub fn group_by_supplier<T, F>(items: Vec<T>, supplier_of: F) -> BTreeMap<String, Vec<T>>
where
    F: Fn(&T) -> &str,
{
    let mut groups: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        groups
            .entry(supplier_of(&item).to_string())
            .or_default()
            .push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(price: f64, quantity: u64, shipping: f64) -> LineAmounts {
        LineAmounts {
            unit_price: Some(price),
            quantity: Some(quantity),
            shipping_cost: Some(shipping),
            shipping_negotiable: false,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        for q in [1u64, 2, 7, 130] {
            let totals = aggregate(&[line(5.0, q, 0.0)], 0.0);
            assert!(approx(totals.subtotal, 5.0 * q as f64));
        }
    }

    #[test]
    fn vat_is_fifteen_percent_of_subtotal_and_shipping() {
        let totals = aggregate(&[line(3.33, 7, 1.11), line(0.07, 3, 0.0)], 0.0);
        assert!(approx(totals.vat, (totals.subtotal + totals.shipping) * 0.15));
        assert!(approx(totals.total, totals.subtotal + totals.shipping + totals.vat));
    }

    #[test]
    fn shipping_is_summed_per_line() {
        let totals = aggregate(&[line(10.0, 1, 5.0), line(10.0, 1, 5.0)], 0.0);
        assert!(approx(totals.shipping, 10.0));
    }

    #[test]
    fn coupon_is_a_flat_deduction() {
        let totals = aggregate(&[line(50.0, 2, 10.0)], 20.0);
        assert!(approx(totals.subtotal, 100.0));
        assert!(approx(totals.vat, 16.5));
        assert!(approx(totals.total, 106.5));
    }

    #[test]
    fn invalid_price_is_excluded_and_total_needs_supplier() {
        let lines = [LineAmounts {
            unit_price: Some(f64::NAN),
            quantity: Some(3),
            shipping_cost: None,
            shipping_negotiable: false,
        }];
        let totals = aggregate(&lines, 0.0);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.negotiable_lines, 1);
        assert_eq!(totals.total, 0.0);
        assert_eq!(totals.total_display(), TotalDisplay::ContactSupplier);
    }

    #[test]
    fn negative_total_needs_supplier() {
        let totals = aggregate(&[line(1.0, 1, 0.0)], 20.0);
        assert!(totals.total < 0.0);
        assert_eq!(totals.total_display(), TotalDisplay::ContactSupplier);
        assert!(!totals.is_payable());
    }

    #[test]
    fn nan_shipping_counts_as_zero() {
        let totals = aggregate(&[line(10.0, 2, f64::NAN)], 0.0);
        assert_eq!(totals.shipping, 0.0);
        assert!(approx(totals.total, 23.0));
    }

    #[test]
    fn groups_are_keyed_by_supplier() {
        let items = vec![("s2", 1), ("s1", 2), ("s2", 3)];
        let groups = group_by_supplier(items, |item| item.0);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["s1", "s2"]);
        assert_eq!(groups["s2"].len(), 2);
    }

    #[test]
    fn unpriced_line_hides_a_positive_total() {
        let unpriced = LineAmounts {
            unit_price: None,
            quantity: Some(2),
            shipping_cost: Some(20.0),
            shipping_negotiable: false,
        };
        let totals = aggregate(&[line(10.0, 1, 0.0), unpriced], 0.0);
        assert!(totals.total > 0.0);
        assert_eq!(totals.total_display(), TotalDisplay::ContactSupplier);
        assert!(!totals.is_payable());
    }

    #[test]
    fn negotiable_shipping_is_flagged_and_not_summed() {
        let mut to_jeddah = line(100.0, 1, 0.0);
        to_jeddah.shipping_cost = None;
        to_jeddah.shipping_negotiable = true;

        let totals = aggregate(&[line(10.0, 1, 5.0), to_jeddah], 0.0);
        assert!(approx(totals.shipping, 5.0));
        assert_eq!(totals.negotiable_shipping, 1);
        assert!(totals.shipping_is_negotiable());
        assert_eq!(totals.total_display(), TotalDisplay::ContactSupplier);
    }
}
