//! Single-field validation.

use crate::ValidationConfig;
use serde_json::Value;
use till_model::{is_missing_value, parse_number, FieldDecl, FieldType, ValidationResult};
use till_types::{parse_timestamp, Millis, DAY_MS, YEAR_MS};

/// Validates one field value against its declaration.
///
/// A missing required value yields exactly one error and skips every other
/// check. A missing optional value (absent, `null`, or `""`) is valid.
/// Timestamps outside the configured window around `now` only warn.
pub fn validate_field(
    name: &str,
    value: Option<&Value>,
    decl: &FieldDecl,
    now: Millis,
    config: &ValidationConfig,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if is_missing_value(value) {
        if decl.required {
            result.push_error(format!("{name} is required"));
        }
        return result;
    }
    let Some(value) = value else {
        return result;
    };

    match decl.field_type {
        FieldType::String => check_string(name, value, decl, &mut result),
        FieldType::Number => check_number(name, value, decl, &mut result),
        FieldType::Boolean => {
            if !value.is_boolean() {
                result.push_error(format!("{name} must be a boolean"));
            }
        }
        FieldType::Array => check_array(name, value, decl, &mut result),
        FieldType::Enum => {
            let member = value
                .as_str()
                .is_some_and(|s| decl.values.iter().any(|v| v == s));
            if !member {
                result.push_error(format!("{name} must be one of: {}", decl.values.join(", ")));
            }
        }
        FieldType::Timestamp => check_timestamp(name, value, now, config, &mut result),
    }

    result
}

fn check_string(name: &str, value: &Value, decl: &FieldDecl, result: &mut ValidationResult) {
    let Some(s) = value.as_str() else {
        result.push_error(format!("{name} must be a string"));
        return;
    };
    let len = s.chars().count();
    if let Some(min) = decl.min_length
        && len < min
    {
        result.push_error(format!("{name} must be at least {min} characters"));
    }
    if let Some(max) = decl.max_length
        && len > max
    {
        result.push_error(format!("{name} must be at most {max} characters"));
    }
}

fn check_number(name: &str, value: &Value, decl: &FieldDecl, result: &mut ValidationResult) {
    let Some(n) = parse_number(value).filter(|n| n.is_finite()) else {
        result.push_error(format!("{name} must be a valid number"));
        return;
    };
    if let Some(min) = decl.min
        && n < min
    {
        result.push_error(format!("{name} must be at least {min}"));
    }
    if let Some(max) = decl.max
        && n > max
    {
        result.push_error(format!("{name} must be at most {max}"));
    }
}

fn check_array(name: &str, value: &Value, decl: &FieldDecl, result: &mut ValidationResult) {
    let Some(items) = value.as_array() else {
        result.push_error(format!("{name} must be an array"));
        return;
    };
    if let Some(min) = decl.min_items
        && items.len() < min
    {
        result.push_error(format!("{name} must contain at least {min} items"));
    }
    if let Some(max) = decl.max_items
        && items.len() > max
    {
        result.push_error(format!("{name} must contain at most {max} items"));
    }
}

fn check_timestamp(
    name: &str,
    value: &Value,
    now: Millis,
    config: &ValidationConfig,
    result: &mut ValidationResult,
) {
    let Some(ts) = parse_timestamp(value).filter(|ts| *ts > 0) else {
        result.push_error(format!("{name} must be a valid timestamp"));
        return;
    };
    let window = config.timestamp_warning_window_ms;
    if now.saturating_sub(ts) > window {
        result.push_warning(format!("{name} is more than {} in the past", describe(window)));
    } else if ts.saturating_sub(now) > window {
        result.push_warning(format!("{name} is more than {} in the future", describe(window)));
    }
}

fn describe(window: Millis) -> String {
    match window {
        YEAR_MS => "a year".to_string(),
        w if w % DAY_MS == 0 => format!("{} days", w / DAY_MS),
        w => format!("{w} ms"),
    }
}
