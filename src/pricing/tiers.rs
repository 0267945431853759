//! Quantity tiers and unit price selection

use serde::{Deserialize, Serialize};

/// Sentinel used by suppliers for "no upper bound" and "not numerically defined".
pub const UNLIMITED: &str = "Unlimited";

/// A raw value as stored in product documents.
///
/// Tier bounds and prices were entered through free-text form fields, so the
/// same field can hold `10`, `"10"` or `"Unlimited"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    pub fn unlimited() -> Self {
        Scalar::Text(UNLIMITED.to_string())
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().eq_ignore_ascii_case(UNLIMITED))
    }

    /// Finite numeric value, parsing numeric strings.
    pub fn as_amount(&self) -> Option<f64> {
        let value = match self {
            Scalar::Number(n) => *n,
            Scalar::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

/// Upper bound of a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyBound {
    Limited(u64),
    Unlimited,
}

impl QtyBound {
    pub fn contains(&self, quantity: u64) -> bool {
        match self {
            QtyBound::Limited(max) => quantity <= *max,
            QtyBound::Unlimited => true,
        }
    }
}

/// Shipping price for one named delivery location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPrice {
    pub location: String,
    pub location_price: Scalar,
}

/// One quantity range of a product with its unit price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTier {
    pub min_qty: Scalar,
    pub max_qty: Scalar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Scalar>,
    #[serde(default)]
    pub locations: Vec<LocationPrice>,
}

impl PriceTier {
    /// Parsed `(min, max)` bounds, `None` when either cannot be read.
    pub fn bounds(&self) -> Option<(u64, QtyBound)> {
        let min = parse_quantity(&self.min_qty)?;
        let max = parse_bound(&self.max_qty)?;
        Some((min, max))
    }

    pub fn matches(&self, quantity: u64) -> bool {
        match self.bounds() {
            Some((min, max)) => min <= quantity && max.contains(quantity),
            None => false,
        }
    }

    /// Unit price of this tier; zero and missing prices are negotiable.
    pub fn unit_price(&self) -> UnitPrice {
        match self.price.as_ref().and_then(Scalar::as_amount) {
            Some(price) if price > 0.0 => UnitPrice::Fixed(price),
            _ => UnitPrice::Negotiable,
        }
    }
}

/// Resolved unit price for a quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnitPrice {
    Fixed(f64),
    /// No tier matched or the tier has no real price: contact the supplier.
    Negotiable,
}

impl UnitPrice {
    pub fn amount(&self) -> Option<f64> {
        match self {
            UnitPrice::Fixed(price) => Some(*price),
            UnitPrice::Negotiable => None,
        }
    }
}

/// Selectable quantity range shown on the product page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierRange {
    pub index: usize,
    pub min: u64,
    pub max: Option<u64>,
    pub label: String,
    pub unit_price: Option<f64>,
}

/// Integer parse with leading-digit semantics: `"12 pcs"` reads as 12.
pub fn parse_quantity(value: &Scalar) -> Option<u64> {
    match value {
        Scalar::Number(n) if n.is_finite() && *n >= 0.0 => Some(n.trunc() as u64),
        Scalar::Number(_) => None,
        Scalar::Text(s) => {
            let digits: String = s
                .trim()
                .trim_start_matches('+')
                .chars()
                .take_while(char::is_ascii_digit)
                .collect();
            digits.parse().ok()
        }
    }
}

pub fn parse_bound(value: &Scalar) -> Option<QtyBound> {
    if value.is_unlimited() {
        return Some(QtyBound::Unlimited);
    }
    parse_quantity(value).map(QtyBound::Limited)
}

/// First tier in list order whose range contains `quantity`.
///
/// Overlapping tiers resolve to the earliest one.
pub fn select_tier(quantity: u64, tiers: &[PriceTier]) -> Option<(usize, &PriceTier)> {
    tiers
        .iter()
        .enumerate()
        .find(|(_, tier)| tier.matches(quantity))
}

pub fn unit_price(quantity: u64, tiers: &[PriceTier]) -> UnitPrice {
    select_tier(quantity, tiers)
        .map(|(_, tier)| tier.unit_price())
        .unwrap_or(UnitPrice::Negotiable)
}

pub fn tier_ranges(tiers: &[PriceTier]) -> Vec<TierRange> {
    tiers
        .iter()
        .enumerate()
        .filter_map(|(index, tier)| {
            let (min, max) = tier.bounds()?;
            let (max, label) = match max {
                QtyBound::Limited(max) => (Some(max), format!("{}-{}", min, max)),
                QtyBound::Unlimited => (None, format!("{}+", min)),
            };
            Some(TierRange {
                index,
                min,
                max,
                label,
                unit_price: tier.unit_price().amount(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min: impl Into<Scalar>, max: impl Into<Scalar>, price: Option<Scalar>) -> PriceTier {
        PriceTier {
            min_qty: min.into(),
            max_qty: max.into(),
            price,
            locations: vec![],
        }
    }

    fn two_tiers() -> Vec<PriceTier> {
        vec![
            tier(1u64, 10u64, Some(5.0.into())),
            tier(11u64, UNLIMITED, Some(4.0.into())),
        ]
    }

    #[test]
    fn quantity_in_open_ended_tier() {
        assert_eq!(unit_price(15, &two_tiers()), UnitPrice::Fixed(4.0));
        assert_eq!(unit_price(1_000_000, &two_tiers()), UnitPrice::Fixed(4.0));
    }

    #[test]
    fn bounds_are_inclusive() {
        let tiers = two_tiers();
        assert_eq!(select_tier(1, &tiers).map(|(i, _)| i), Some(0));
        assert_eq!(select_tier(10, &tiers).map(|(i, _)| i), Some(0));
        assert_eq!(select_tier(11, &tiers).map(|(i, _)| i), Some(1));
    }

    #[test]
    fn no_match_is_negotiable() {
        let tiers = vec![tier(5u64, 10u64, Some(3.0.into()))];
        assert_eq!(unit_price(2, &tiers), UnitPrice::Negotiable);
        assert_eq!(unit_price(11, &tiers), UnitPrice::Negotiable);
        assert_eq!(unit_price(3, &[]), UnitPrice::Negotiable);
    }

    #[test]
    fn zero_or_missing_price_is_negotiable() {
        let tiers = vec![
            tier(1u64, 10u64, Some(0.0.into())),
            tier(11u64, 20u64, None),
            tier(21u64, 30u64, Some("call us".into())),
        ];
        assert_eq!(unit_price(5, &tiers), UnitPrice::Negotiable);
        assert_eq!(unit_price(15, &tiers), UnitPrice::Negotiable);
        assert_eq!(unit_price(25, &tiers), UnitPrice::Negotiable);
    }

    #[test]
    fn string_bounds_and_prices_are_parsed() {
        let tiers = vec![tier("1", "10", Some("7.5".into())), tier("11", "unlimited", Some("6".into()))];
        assert_eq!(unit_price(3, &tiers), UnitPrice::Fixed(7.5));
        assert_eq!(unit_price(50, &tiers), UnitPrice::Fixed(6.0));
    }

    #[test]
    fn overlapping_tiers_take_first_match() {
        let tiers = vec![
            tier(1u64, 20u64, Some(9.0.into())),
            tier(10u64, 30u64, Some(8.0.into())),
        ];
        assert_eq!(unit_price(15, &tiers), UnitPrice::Fixed(9.0));
    }

    #[test]
    fn unreadable_bounds_never_match() {
        let tiers = vec![tier("", "10", Some(2.0.into())), tier(UNLIMITED, UNLIMITED, Some(1.0.into()))];
        assert_eq!(unit_price(5, &tiers), UnitPrice::Negotiable);
    }

    #[test]
    fn parse_quantity_reads_leading_digits() {
        assert_eq!(parse_quantity(&"12 pcs".into()), Some(12));
        assert_eq!(parse_quantity(&" 40 ".into()), Some(40));
        assert_eq!(parse_quantity(&"abc".into()), None);
        assert_eq!(parse_quantity(&Scalar::Number(-3.0)), None);
        assert_eq!(parse_quantity(&Scalar::Number(7.9)), Some(7));
    }

    #[test]
    fn ranges_are_labelled() {
        let ranges = tier_ranges(&two_tiers());
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].label, "1-10");
        assert_eq!(ranges[1].label, "11+");
        assert_eq!(ranges[1].max, None);
        assert_eq!(ranges[1].unit_price, Some(4.0));
    }

    #[test]
    fn tier_documents_accept_mixed_shapes() {
        let raw = serde_json::json!([
            {"minQty": "1", "maxQty": 10, "price": 5, "locations": [{"location": "Riyadh", "locationPrice": "Unlimited"}]},
            {"minQty": 11, "maxQty": "Unlimited", "price": null}
        ]);
        let tiers: Vec<PriceTier> = serde_json::from_value(raw).unwrap();
        assert_eq!(tiers.len(), 2);
        assert!(tiers[0].locations[0].location_price.is_unlimited());
        assert_eq!(tiers[1].price, None);
        assert!(tiers[1].locations.is_empty());
    }
}
