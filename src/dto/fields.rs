use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::{Field, FieldStatus};

pub const DEFAULT_OPERATING_HOURS: &str = "6:00 AM - 10:00 PM";
const MAX_PRICE: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(ValidationError::new("price")
            .with_message("Price must be greater than 0".into()));
    }
    if price.normalize().scale() > 2 {
        return Err(ValidationError::new("price")
            .with_message("Price must have at most 2 decimal places".into()));
    }
    if *price > MAX_PRICE {
        return Err(ValidationError::new("price")
            .with_message("Price must be reasonable".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FieldImageInput {
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFieldRequest {
    #[validate(length(min = 1, max = 100, message = "Field name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Location is required"))]
    pub location: String,
    #[validate(length(max = 200, message = "Address must be less than 200 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 500, message = "Description must be less than 500 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "50.00")]
    pub price_per_booking: Decimal,
    #[validate(length(max = 50, message = "Operating hours must be less than 50 characters"))]
    pub operating_hours: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub images: Vec<FieldImageInput>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFieldRequest {
    #[validate(length(min = 1, max = 100, message = "Field name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Location is required"))]
    pub location: Option<String>,
    #[validate(length(max = 200, message = "Address must be less than 200 characters"))]
    pub address: Option<String>,
    #[validate(length(max = 500, message = "Description must be less than 500 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "60.00")]
    pub price_per_booking: Option<Decimal>,
    #[validate(length(max = 50, message = "Operating hours must be less than 50 characters"))]
    pub operating_hours: Option<String>,
    pub status: Option<FieldStatus>,
    #[validate(nested)]
    pub images: Option<Vec<FieldImageInput>>,
    pub amenities: Option<Vec<String>>,
}

/// Trim free text and turn blank optionals into `None`.
pub(crate) fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn clean_amenities(amenities: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::new();
    for amenity in amenities {
        let amenity = amenity.trim().to_string();
        if !amenity.is_empty() && !cleaned.contains(&amenity) {
            cleaned.push(amenity);
        }
    }
    cleaned
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct FieldList {
    #[schema(value_type = Vec<Field>)]
    pub items: Vec<Field>,
}
