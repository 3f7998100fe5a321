//! Built-in validator factories.
//!
//! Except for `required`, every built-in treats a missing value (null or a
//! blank string) as valid so that optional fields may be left empty.
//!
//! Numeric parameters may be given bare (`18`) or wrapped (`{"value": 18}`).

use super::{ValidationOutcome, ValidatorFn, ValidatorKind, validator_fn};
use crate::i18n::{MessageCatalog, keys};
use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

type FactoryFn = fn(&Value, &MessageCatalog) -> Result<ValidatorFn, String>;

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Factory function for a built-in kind.
pub fn factory_for(kind: &ValidatorKind) -> Option<FactoryFn> {
    let factory: FactoryFn = match kind {
        ValidatorKind::Required => required,
        ValidatorKind::MinLength => min_length,
        ValidatorKind::MaxLength => max_length,
        ValidatorKind::Gt => gt,
        ValidatorKind::Ge | ValidatorKind::Min => ge,
        ValidatorKind::Lt => lt,
        ValidatorKind::Le | ValidatorKind::Max => le,
        ValidatorKind::Pattern => pattern,
        ValidatorKind::Email => email,
        ValidatorKind::OneOf => one_of,
        ValidatorKind::EqualsField => equals_field,
        ValidatorKind::Date => date,
        ValidatorKind::Custom(_) => return None,
    };
    Some(factory)
}

/// Null, a whitespace-only string, or an empty array.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// The parameter itself, or its `key` member when given as an object.
fn unwrap_param<'a>(params: &'a Value, key: &str) -> &'a Value {
    match params {
        Value::Object(map) => map.get(key).unwrap_or(&Value::Null),
        other => other,
    }
}

fn param_usize(params: &Value) -> Result<usize, String> {
    let raw = unwrap_param(params, "value");
    raw.as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| format!("expected a non-negative integer, got {raw}"))
}

fn param_number(params: &Value) -> Result<(f64, String), String> {
    let raw = unwrap_param(params, "value");
    let number = raw
        .as_f64()
        .ok_or_else(|| format!("expected a number, got {raw}"))?;
    Ok((number, raw.to_string()))
}

fn param_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    let raw = unwrap_param(params, key);
    raw.as_str()
        .ok_or_else(|| format!("expected a string for '{key}', got {raw}"))
}

/// Finite numeric reading of a value. `inf` and `NaN` spellings are not numbers.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Human-readable form of a chrono date format, e.g. `%d/%m/%Y` → `DD/MM/YYYY`.
fn describe_date_format(format: &str) -> String {
    let mut described = String::with_capacity(format.len());
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            described.push(c);
            continue;
        }
        match chars.next() {
            Some('Y') => described.push_str("YYYY"),
            Some('y') => described.push_str("YY"),
            Some('m') => described.push_str("MM"),
            Some('d') | Some('e') => described.push_str("DD"),
            Some('b') | Some('h') => described.push_str("MMM"),
            Some('B') => described.push_str("MMMM"),
            Some('j') => described.push_str("DDD"),
            Some('F') => described.push_str("YYYY-MM-DD"),
            Some('%') => described.push('%'),
            Some(other) => {
                described.push('%');
                described.push(other);
            }
            None => described.push('%'),
        }
    }
    described
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required(_params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    let message = catalog.format(keys::VALUE_REQUIRED, &[]);
    Ok(validator_fn(move |value, _| {
        Ok(if is_blank(value) {
            ValidationOutcome::violation(message.clone())
        } else {
            ValidationOutcome::Valid
        })
    }))
}

fn length_validator(
    params: &Value,
    catalog: &MessageCatalog,
    key: &'static str,
    fails: fn(usize, usize) -> bool,
) -> Result<ValidatorFn, String> {
    let limit = param_usize(params)?;
    let message = catalog.format(key, &[&limit]);
    Ok(validator_fn(move |value, _| {
        let length = match value {
            Value::String(s) if !s.trim().is_empty() => s.chars().count(),
            Value::Array(items) => items.len(),
            _ => return Ok(ValidationOutcome::Valid),
        };
        Ok(if fails(length, limit) {
            ValidationOutcome::violation(message.clone())
        } else {
            ValidationOutcome::Valid
        })
    }))
}

fn min_length(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    length_validator(params, catalog, keys::LENGTH_TOO_SHORT, |len, min| len < min)
}

fn max_length(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    length_validator(params, catalog, keys::LENGTH_TOO_LONG, |len, max| len > max)
}

fn number_validator(
    params: &Value,
    catalog: &MessageCatalog,
    key: &'static str,
    passes: fn(f64, f64) -> bool,
) -> Result<ValidatorFn, String> {
    let (bound, shown) = param_number(params)?;
    let message = catalog.format(key, &[&shown]);
    let invalid = catalog.format(keys::NUMBER_INVALID, &[]);
    Ok(validator_fn(move |value, _| {
        if is_absent(value) {
            return Ok(ValidationOutcome::Valid);
        }
        Ok(match as_number(value) {
            None => ValidationOutcome::violation(invalid.clone()),
            Some(n) if passes(n, bound) => ValidationOutcome::Valid,
            Some(_) => ValidationOutcome::violation(message.clone()),
        })
    }))
}

fn gt(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    number_validator(params, catalog, keys::NUMBER_GT, |n, b| n > b)
}

fn ge(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    number_validator(params, catalog, keys::NUMBER_GE, |n, b| n >= b)
}

fn lt(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    number_validator(params, catalog, keys::NUMBER_LT, |n, b| n < b)
}

fn le(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    number_validator(params, catalog, keys::NUMBER_LE, |n, b| n <= b)
}

fn regex_validator(regex: Regex, message: String) -> ValidatorFn {
    validator_fn(move |value, _| {
        if is_absent(value) {
            return Ok(ValidationOutcome::Valid);
        }
        Ok(match as_text(value) {
            Some(text) if regex.is_match(&text) => ValidationOutcome::Valid,
            _ => ValidationOutcome::violation(message.clone()),
        })
    })
}

/// `params`: the pattern, or `{"pattern": "...", "message": "<catalog key>"}`.
fn pattern(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    let source = param_str(params, "pattern")?;
    let regex = Regex::new(source).map_err(|e| format!("invalid pattern: {e}"))?;
    let key = params
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or(keys::PATTERN_MISMATCH);
    Ok(regex_validator(regex, catalog.format(key, &[&source])))
}

fn email(_params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    let regex = Regex::new(EMAIL_PATTERN).map_err(|e| e.to_string())?;
    Ok(regex_validator(regex, catalog.format(keys::EMAIL_INVALID, &[])))
}

/// `params`: an array of allowed values, or `{"values": [...]}`.
fn one_of(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    let allowed = unwrap_param(params, "values")
        .as_array()
        .cloned()
        .ok_or_else(|| "expected an array of allowed values".to_string())?;
    let listed = allowed
        .iter()
        .map(|v| as_text(v).unwrap_or_else(|| v.to_string()))
        .collect::<Vec<_>>()
        .join(", ");
    let message = catalog.format(keys::ONE_OF, &[&listed]);
    Ok(validator_fn(move |value, _| {
        if is_absent(value) || allowed.contains(value) {
            return Ok(ValidationOutcome::Valid);
        }
        Ok(ValidationOutcome::violation(message.clone()))
    }))
}

/// `params`: a sibling key or absolute path, or `{"field": "..."}`.
fn equals_field(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    let field = param_str(params, "field")?.to_string();
    let label = params
        .get("label")
        .and_then(Value::as_str)
        .map(|key| catalog.format(key, &[]))
        .unwrap_or_else(|| field.clone());
    let message = catalog.format(keys::FIELDS_NOT_EQUAL, &[&label]);
    Ok(validator_fn(move |value, ctx| {
        if is_absent(value) {
            return Ok(ValidationOutcome::Valid);
        }
        let other = ctx.resolve(&field).unwrap_or(&Value::Null);
        Ok(if other == value {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::violation(message.clone())
        })
    }))
}

/// `params`: optional `{"format": "<chrono format>"}`, `%Y-%m-%d` by default.
fn date(params: &Value, catalog: &MessageCatalog) -> Result<ValidatorFn, String> {
    let format = match params {
        Value::Null => DEFAULT_DATE_FORMAT.to_string(),
        other => param_str(other, "format")?.to_string(),
    };
    let message = catalog.format(keys::DATE_INVALID, &[&describe_date_format(&format)]);
    Ok(validator_fn(move |value, _| {
        if is_absent(value) {
            return Ok(ValidationOutcome::Valid);
        }
        Ok(match value.as_str() {
            Some(text) if NaiveDate::parse_from_str(text.trim(), &format).is_ok() => {
                ValidationOutcome::Valid
            }
            _ => ValidationOutcome::violation(message.clone()),
        })
    }))
}
