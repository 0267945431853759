use super::{
    MAX_ADDITIONAL_IMAGES, ValidationError, validate_location_name, validate_new_option,
    validate_price_tiers,
};
use crate::models::product::{LocalizedText, ProductInput};

fn require_localized(field: &str, text: &LocalizedText) -> Result<(), ValidationError> {
    if text.en.trim().is_empty() {
        return Err(ValidationError::new(
            format!("{}.en", field),
            "English text is required",
        ));
    }
    if text.ar.trim().is_empty() {
        return Err(ValidationError::new(
            format!("{}.ar", field),
            "Arabic text is required",
        ));
    }
    Ok(())
}

fn require_distinct(field: &str, values: &[String]) -> Result<(), ValidationError> {
    let mut seen: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = validate_new_option(field, &seen, value)?;
        seen.push(value);
    }
    Ok(())
}

/// Checks applied to every product form before it is written.
pub fn validate_product(input: &ProductInput) -> Result<(), ValidationError> {
    require_localized("productName", &input.product_name)?;
    require_localized("description", &input.description)?;

    if input.category.trim().is_empty() {
        return Err(ValidationError::new("category", "Category is required"));
    }
    if input.sub_category.trim().is_empty() {
        return Err(ValidationError::new(
            "subCategory",
            "Sub-category is required",
        ));
    }

    if input.main_image_url.trim().is_empty() {
        return Err(ValidationError::new(
            "mainImageUrl",
            "A main image is required",
        ));
    }
    if input.additional_image_urls.len() > MAX_ADDITIONAL_IMAGES {
        return Err(ValidationError::new(
            "additionalImageUrls",
            format!("At most {} additional images", MAX_ADDITIONAL_IMAGES),
        ));
    }
    if input
        .additional_image_urls
        .iter()
        .any(|url| url.trim().is_empty())
    {
        return Err(ValidationError::new(
            "additionalImageUrls",
            "Image references must not be empty",
        ));
    }

    validate_location_name(&input.main_location)
        .map_err(|e| ValidationError::new("mainLocation", e.message))?;

    require_distinct("sizes", &input.sizes)?;
    require_distinct("colors", &input.colors)?;

    validate_price_tiers(&input.price_ranges)
}
