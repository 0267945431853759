//! Tiered pricing engine
//!
//! Pure functions over product tiers and cart lines:
//! tier selection -> location shipping -> cost aggregation -> presentation.
//! Nothing here touches the database.

pub mod coupon;
pub mod currency;
pub mod location;
pub mod tiers;
pub mod totals;

pub use coupon::coupon_discount;
pub use currency::{format_amount, parse_amount, Locale};
pub use location::{delivery_locations, resolve_location_price, ShippingCost};
pub use tiers::{
    parse_bound, parse_quantity, select_tier, tier_ranges, unit_price, LocationPrice, PriceTier,
    QtyBound, Scalar, TierRange, UnitPrice, UNLIMITED,
};
pub use totals::{
    aggregate, group_by_supplier, safe_value, CostBreakdown, LineAmounts, TotalDisplay, VAT_RATE,
};

/// Price of `quantity` units delivered to `location`
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub quantity: u64,
    pub tier_index: Option<usize>,
    pub unit_price: UnitPrice,
    pub shipping: ShippingCost,
    pub breakdown: CostBreakdown,
}

pub fn quote(tiers: &[PriceTier], quantity: u64, location: &str) -> Quote {
    let selected = select_tier(quantity, tiers);
    let unit_price = selected
        .map(|(_, tier)| tier.unit_price())
        .unwrap_or(UnitPrice::Negotiable);
    let shipping = resolve_location_price(location, tiers);

    let line = LineAmounts {
        unit_price: unit_price.amount(),
        quantity: Some(quantity),
        shipping_cost: shipping.amount(),
        shipping_negotiable: shipping.is_negotiable(),
    };

    Quote {
        quantity,
        tier_index: selected.map(|(index, _)| index),
        unit_price,
        shipping,
        breakdown: aggregate(&[line], 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_combines_tier_and_location() {
        let tiers = vec![
            PriceTier {
                min_qty: 1u64.into(),
                max_qty: 10u64.into(),
                price: Some(5.0.into()),
                locations: vec![LocationPrice {
                    location: "Riyadh".into(),
                    location_price: Scalar::unlimited(),
                }],
            },
            PriceTier {
                min_qty: 11u64.into(),
                max_qty: Scalar::unlimited(),
                price: Some(4.0.into()),
                locations: vec![LocationPrice {
                    location: "Jeddah".into(),
                    location_price: 20.0.into(),
                }],
            },
        ];

        let q = quote(&tiers, 5, "Jeddah");
        assert_eq!(q.tier_index, Some(0));
        assert_eq!(q.unit_price, UnitPrice::Fixed(5.0));
        assert_eq!(q.breakdown.subtotal, 25.0);
        assert_eq!(q.shipping, ShippingCost::Fixed(20.0));

        let q = quote(&tiers, 15, "Riyadh");
        assert_eq!(q.unit_price, UnitPrice::Fixed(4.0));
        assert_eq!(q.shipping, ShippingCost::ContactSupplier);
        assert_eq!(q.breakdown.shipping, 0.0);
        assert!(q.breakdown.shipping_is_negotiable());
        assert_eq!(q.breakdown.total_display(), TotalDisplay::ContactSupplier);
    }

    #[test]
    fn quantity_below_first_tier_has_no_total() {
        let tiers = vec![PriceTier {
            min_qty: 10u64.into(),
            max_qty: Scalar::unlimited(),
            price: Some(5.0.into()),
            locations: vec![LocationPrice {
                location: "Riyadh".into(),
                location_price: 20.0.into(),
            }],
        }];

        let q = quote(&tiers, 2, "Riyadh");
        assert_eq!(q.unit_price, UnitPrice::Negotiable);
        assert_eq!(q.breakdown.negotiable_lines, 1);
        assert_eq!(q.breakdown.total_display(), TotalDisplay::ContactSupplier);
    }
}
