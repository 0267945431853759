//! Delivery location shipping resolution
//!
//! Location prices are looked up across every tier of a product, not only the
//! tier matched by quantity.

use super::tiers::{LocationPrice, PriceTier};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShippingCost {
    Fixed(f64),
    /// `"Unlimited"` or any other non-numeric price.
    ContactSupplier,
    /// The product does not deliver to this location ("N/A").
    NotAvailable,
}

impl ShippingCost {
    pub fn amount(&self) -> Option<f64> {
        match self {
            ShippingCost::Fixed(cost) => Some(*cost),
            _ => None,
        }
    }

    pub fn is_negotiable(&self) -> bool {
        matches!(self, ShippingCost::ContactSupplier)
    }
}

fn all_locations(tiers: &[PriceTier]) -> impl Iterator<Item = &LocationPrice> {
    tiers.iter().flat_map(|tier| tier.locations.iter())
}

pub fn resolve_location_price(location: &str, tiers: &[PriceTier]) -> ShippingCost {
    let Some(entry) = all_locations(tiers).find(|entry| entry.location == location) else {
        return ShippingCost::NotAvailable;
    };

    if entry.location_price.is_unlimited() {
        return ShippingCost::ContactSupplier;
    }

    match entry.location_price.as_amount() {
        Some(cost) if cost >= 0.0 => ShippingCost::Fixed(cost),
        _ => ShippingCost::ContactSupplier,
    }
}

/// Distinct location names in first-seen order.
pub fn delivery_locations(tiers: &[PriceTier]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in all_locations(tiers) {
        if !names.iter().any(|n| n == &entry.location) {
            names.push(entry.location.clone());
        }
    }
    names
}
