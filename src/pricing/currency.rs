//! Currency presentation for the storefront (en / ar)

use serde::{Deserialize, Serialize};

use super::location::ShippingCost;
use super::tiers::{Scalar, UnitPrice};
use super::totals::TotalDisplay;

const MIN_FRACTION_DIGITS: usize = 2;
const MAX_FRACTION_DIGITS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" => Locale::Ar,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
        }
    }

    fn currency_symbol(&self) -> &'static str {
        match self {
            Locale::En => "SAR",
            Locale::Ar => "ر.س",
        }
    }

    fn group_separator(&self) -> char {
        match self {
            Locale::En => ',',
            Locale::Ar => '\u{066C}',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::En => '.',
            Locale::Ar => '\u{066B}',
        }
    }
}

pub fn negotiable_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Pricing Negotiable - Contact Supplier",
        Locale::Ar => "السعر قابل للتفاوض - تواصل مع المورد",
    }
}

pub fn contact_supplier_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Contact Supplier",
        Locale::Ar => "تواصل مع المورد",
    }
}

pub fn not_available_label(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "N/A",
        Locale::Ar => "غير متوفر",
    }
}

fn localize_digits(text: &str, locale: Locale) -> String {
    match locale {
        Locale::En => text.to_string(),
        Locale::Ar => text
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(d) => char::from_u32(0x0660 + d).unwrap_or(c),
                None => c,
            })
            .collect(),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Format a finite amount with grouping, 2 to 5 fraction digits and the
/// currency symbol. Non-finite amounts render the negotiable label.
pub fn format_amount(amount: f64, locale: Locale) -> String {
    if !amount.is_finite() {
        return negotiable_label(locale).to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < MIN_FRACTION_DIGITS {
        fraction.push('0');
    }

    let negative = amount < 0.0 && (int_part.bytes().any(|b| b != b'0') || fraction.bytes().any(|b| b != b'0'));
    let number = format!(
        "{}{}{}",
        group_thousands(int_part, locale.group_separator()),
        locale.decimal_separator(),
        fraction
    );

    format!(
        "{}{} {}",
        if negative { "-" } else { "" },
        locale.currency_symbol(),
        localize_digits(&number, locale)
    )
}

/// Same as [`format_amount`] for raw document values; numeric strings are parsed.
pub fn format_scalar(value: &Scalar, locale: Locale) -> String {
    match value.as_amount() {
        Some(amount) => format_amount(amount, locale),
        None => negotiable_label(locale).to_string(),
    }
}

pub fn format_unit_price(price: UnitPrice, locale: Locale) -> String {
    match price {
        UnitPrice::Fixed(amount) => format_amount(amount, locale),
        UnitPrice::Negotiable => negotiable_label(locale).to_string(),
    }
}

pub fn format_shipping(cost: ShippingCost, locale: Locale) -> String {
    match cost {
        ShippingCost::Fixed(amount) => format_amount(amount, locale),
        ShippingCost::ContactSupplier => negotiable_label(locale).to_string(),
        ShippingCost::NotAvailable => not_available_label(locale).to_string(),
    }
}

pub fn format_total(total: TotalDisplay, locale: Locale) -> String {
    match total {
        TotalDisplay::Amount(amount) => format_amount(amount, locale),
        TotalDisplay::ContactSupplier => contact_supplier_label(locale).to_string(),
    }
}

/// Read back a value produced by [`format_amount`] in either locale.
pub fn parse_amount(text: &str) -> Option<f64> {
    let mut normalized = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '0'..='9' | '.' | '-' => normalized.push(c),
            '\u{0660}'..='\u{0669}' => {
                let digit = c as u32 - 0x0660;
                normalized.push(char::from_digit(digit, 10)?);
            }
            '\u{066B}' => normalized.push('.'),
            '\u{2212}' => normalized.push('-'),
            _ => {}
        }
    }
    // "ر.س" contributes a stray dot ahead of the number
    let normalized = normalized.trim_start_matches('.');
    let value: f64 = if let Some(rest) = normalized.strip_prefix('-') {
        -rest.trim_start_matches('.').parse::<f64>().ok()?
    } else {
        normalized.parse().ok()?
    };
    value.is_finite().then_some(value)
}
