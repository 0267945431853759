//! Input validation shared by every product, catalog and cart form
//!
//! All functions are pure; rejected input never reaches the store.

mod product;

pub use product::validate_product;

use std::fmt;

use crate::pricing::{PriceTier, QtyBound, Scalar, UNLIMITED};

pub const MAX_ADDITIONAL_IMAGES: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Which side of a tier a quantity is entered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QtyRole {
    Min { first: bool },
    Max,
}

/// Validate a quantity typed into a tier bound field.
pub fn validate_quantity_input(raw: &str, role: QtyRole) -> Result<QtyBound, ValidationError> {
    let field = match role {
        QtyRole::Min { .. } => "minQty",
        QtyRole::Max => "maxQty",
    };
    let value = raw.trim();
    let is_unlimited = value.eq_ignore_ascii_case(UNLIMITED);

    if let QtyRole::Min { first: true } = role
        && (value.is_empty() || value == "0" || is_unlimited)
    {
        return Err(ValidationError::new(
            field,
            "Minimum order quantity must be at least 1",
        ));
    }

    if is_unlimited {
        return match role {
            QtyRole::Max => Ok(QtyBound::Unlimited),
            QtyRole::Min { .. } => Err(ValidationError::new(
                field,
                "'Unlimited' cannot be used as a minimum quantity",
            )),
        };
    }

    if value.is_empty() {
        return Err(ValidationError::new(field, "Quantity is required"));
    }

    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            field,
            "Quantity must be a whole number or 'Unlimited'",
        ));
    }

    match value.parse::<u64>() {
        Ok(0) => Err(ValidationError::new(field, "Quantity must be at least 1")),
        Ok(n) => Ok(QtyBound::Limited(n)),
        Err(_) => Err(ValidationError::new(field, "Quantity is too large")),
    }
}

fn scalar_to_input(value: &Scalar) -> String {
    match value {
        Scalar::Number(n) if n.fract() == 0.0 && *n >= 0.0 => format!("{}", *n as u64),
        Scalar::Number(n) => n.to_string(),
        Scalar::Text(s) => s.clone(),
    }
}

/// Location names are letters and single inner spaces (Arabic letters included).
pub fn validate_location_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new("location", "Location is required"));
    }
    if !name.chars().all(|c| c.is_alphabetic() || c == ' ') || name.contains("  ") {
        return Err(ValidationError::new(
            "location",
            "Location may only contain letters",
        ));
    }
    Ok(name.to_string())
}

/// Reject empty values and case-insensitive duplicates of `existing`.
pub fn validate_new_option(
    field: &str,
    existing: &[String],
    candidate: &str,
) -> Result<String, ValidationError> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return Err(ValidationError::new(field, "Value is required"));
    }
    if existing
        .iter()
        .any(|e| e.trim().to_lowercase() == candidate.to_lowercase())
    {
        return Err(ValidationError::new(
            field,
            format!("'{}' already exists", candidate),
        ));
    }
    Ok(candidate.to_string())
}

fn validate_location_price(field: &str, value: &Scalar) -> Result<(), ValidationError> {
    if value.is_unlimited() {
        return Ok(());
    }
    match value.as_amount() {
        Some(cost) if cost >= 0.0 => Ok(()),
        _ => Err(ValidationError::new(
            field,
            "Shipping price must be a non-negative number or 'Unlimited'",
        )),
    }
}

/// Validate a full tier list: bounds, prices, locations and ordering.
///
/// Tiers must be sorted by `minQty` and must not overlap, so at most the last
/// tier can be open ended.
pub fn validate_price_tiers(tiers: &[PriceTier]) -> Result<(), ValidationError> {
    let mut previous_max: Option<QtyBound> = None;

    for (i, tier) in tiers.iter().enumerate() {
        let prefix = format!("priceRanges[{}]", i);

        let min = match validate_quantity_input(
            &scalar_to_input(&tier.min_qty),
            QtyRole::Min { first: i == 0 },
        ) {
            Ok(QtyBound::Limited(min)) => min,
            Ok(QtyBound::Unlimited) => {
                return Err(ValidationError::new(
                    format!("{}.minQty", prefix),
                    "'Unlimited' cannot be used as a minimum quantity",
                ));
            }
            Err(e) => {
                return Err(ValidationError::new(
                    format!("{}.{}", prefix, e.field),
                    e.message,
                ));
            }
        };
        let max = validate_quantity_input(&scalar_to_input(&tier.max_qty), QtyRole::Max)
            .map_err(|e| ValidationError::new(format!("{}.{}", prefix, e.field), e.message))?;

        if let QtyBound::Limited(max) = max
            && max < min
        {
            return Err(ValidationError::new(
                format!("{}.maxQty", prefix),
                "Maximum quantity must not be below the minimum",
            ));
        }

        match previous_max {
            Some(QtyBound::Unlimited) => {
                return Err(ValidationError::new(
                    format!("{}.minQty", prefix),
                    "No tier may follow an 'Unlimited' tier",
                ));
            }
            Some(QtyBound::Limited(prev)) if min <= prev => {
                return Err(ValidationError::new(
                    format!("{}.minQty", prefix),
                    format!("Tier overlaps the previous tier ending at {}", prev),
                ));
            }
            _ => {}
        }
        previous_max = Some(max);

        // a blank price marks the tier as negotiable
        if let Some(price) = &tier.price
            && !matches!(price, Scalar::Text(s) if s.trim().is_empty())
            && !matches!(price.as_amount(), Some(p) if p >= 0.0)
        {
            return Err(ValidationError::new(
                format!("{}.price", prefix),
                "Price must be a non-negative number",
            ));
        }

        for (j, entry) in tier.locations.iter().enumerate() {
            validate_location_name(&entry.location).map_err(|e| {
                ValidationError::new(format!("{}.locations[{}].location", prefix, j), e.message)
            })?;
            validate_location_price(
                &format!("{}.locations[{}].locationPrice", prefix, j),
                &entry.location_price,
            )?;
        }
    }

    Ok(())
}
