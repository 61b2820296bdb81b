//! Column limits for request payloads plus the custom rules the `validator`
//! derive cannot express. Every failure is reported at once, keyed by field
//! name.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::AppError;

pub const USERNAME_MAX: u64 = 150;
pub const PASSWORD_MIN: u64 = 8;
pub const NAME_MAX: u64 = 150;
pub const EMAIL_MAX: u64 = 254;
pub const ADMIN_CODE_MAX: u64 = 20;
pub const PHONE_NUMBER_MAX: u64 = 15;
pub const COLOR_NAME_MAX: u64 = 50;
pub const HEX_CODE_MAX: u64 = 7;
pub const PRODUCT_NAME_MAX: u64 = 255;
pub const PRODUCT_IMAGE_MAX: u64 = 100;
pub const SKU_MAX: u64 = 50;
pub const PRICE_MAX_DIGITS: u32 = 10;
pub const PRICE_DECIMAL_PLACES: u32 = 2;

fn rule(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("blank", "this field may not be blank".to_owned()));
    }
    Ok(())
}

/// Fits a `decimal(10, 2)` column and is not negative.
pub fn price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(rule(
            "range",
            "ensure this value is greater than or equal to 0".to_owned(),
        ));
    }
    let normalized = value.normalize();
    if normalized.scale() > PRICE_DECIMAL_PLACES {
        return Err(rule(
            "decimal_places",
            format!("ensure there are no more than {PRICE_DECIMAL_PLACES} decimal places"),
        ));
    }
    let integer_digits = normalized.trunc().abs().to_string().trim_start_matches('0').len();
    if integer_digits as u32 > PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES {
        return Err(rule(
            "max_digits",
            format!("ensure there are no more than {PRICE_MAX_DIGITS} digits in total"),
        ));
    }
    Ok(())
}

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    let min = error.params.get("min");
    let max = error.params.get("max");
    match (&*error.code, min, max) {
        ("length", _, Some(max)) => format!("ensure this field has no more than {max} characters"),
        ("length", Some(min), None) => format!("ensure this field has at least {min} characters"),
        ("range", Some(min), Some(max)) => format!("ensure this value is between {min} and {max}"),
        ("range", Some(min), None) => format!("ensure this value is greater than or equal to {min}"),
        ("range", None, Some(max)) => format!("ensure this value is less than or equal to {max}"),
        (code, _, _) => code.to_owned(),
    }
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let field: &str = field;
        let field = if field == "__all__" { "non_field_errors" } else { field };
        let path = if prefix.is_empty() {
            field.to_owned()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|error| format!("{path}: {}", describe(error))));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect(inner, &path, out);
                }
            }
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect(&errors, "", &mut messages);
        messages.sort();
        messages.dedup();
        AppError::BadRequest(messages.join("; "))
    }
}
