//! Draft editing with browser-form semantics.
//!
//! Drafts are edited one `field=value` pair at a time. Numeric fields never
//! reject input: anything that does not parse becomes `0`, the same way the
//! portal's number inputs behaved.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("unknown field '{field}' (expected one of: {expected})")]
    UnknownField { field: String, expected: String },
    #[error("expected field=value, got '{0}'")]
    Malformed(String),
    #[error("'{value}' is not a yes/no value for '{field}'")]
    NotAFlag { field: String, value: String },
    #[error("field '{0}' cannot be changed on an existing record")]
    ReadOnly(String),
    #[error("no draft is open")]
    NoDraft,
}

impl FormError {
    pub fn unknown<R: EditableRecord>(field: &str) -> Self {
        FormError::UnknownField {
            field: field.to_string(),
            expected: R::FIELDS.join(", "),
        }
    }
}

/// A record that can be filled in field by field from text input.
pub trait EditableRecord {
    /// Field names in wire (camelCase) spelling.
    const FIELDS: &'static [&'static str];

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError>;
}

/// Canonical spelling of a field name: lowercase with separators removed, so
/// `zipCode`, `zip_code` and `ZIP-CODE` all address the same field.
pub fn field_key(field: &str) -> String {
    field
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Split `key=value` assignments. Only the first `=` separates, so values may
/// contain `=` themselves (image URLs with query strings).
pub fn parse_assignments<S: AsRef<str>>(
    entries: &[S],
) -> Result<Vec<(String, String)>, FormError> {
    entries
        .iter()
        .map(|entry| {
            let entry = entry.as_ref();
            match entry.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    Ok((key.trim().to_string(), value.to_string()))
                }
                _ => Err(FormError::Malformed(entry.to_string())),
            }
        })
        .collect()
}

/// Non-negative whole number; unparseable or negative input is `0`.
pub fn coerce_count(value: &str) -> u32 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Decimal amount; unparseable input is `0.0`.
pub fn coerce_amount(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Optional identifier; blank or unparseable clears it.
pub fn coerce_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

pub fn coerce_flag(field: &str, value: &str) -> Result<bool, FormError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" | "" => Ok(false),
        _ => Err(FormError::NotAFlag {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_key_ignores_case_and_separators() {
        assert_eq!(field_key("zipCode"), "zipcode");
        assert_eq!(field_key("zip_code"), "zipcode");
        assert_eq!(field_key("Area-Sqft"), "areasqft");
    }

    #[test]
    fn test_parse_assignments_splits_on_first_equals() {
        let parsed =
            parse_assignments(&["name=Oak Villa", "image=https://x.test/a.png?w=600"]).unwrap();
        assert_eq!(parsed[0], ("name".to_string(), "Oak Villa".to_string()));
        assert_eq!(
            parsed[1],
            ("image".to_string(), "https://x.test/a.png?w=600".to_string())
        );
    }

    #[test]
    fn test_parse_assignments_rejects_missing_key() {
        assert_eq!(
            parse_assignments(&["=5"]),
            Err(FormError::Malformed("=5".to_string()))
        );
        assert!(parse_assignments(&["price"]).is_err());
    }

    #[test]
    fn test_numeric_coercion_falls_back_to_zero() {
        assert_eq!(coerce_count("3"), 3);
        assert_eq!(coerce_count("2.9"), 2);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("three"), 0);
        assert_eq!(coerce_count("-4"), 0);
        assert_eq!(coerce_amount("4500000.50"), 4_500_000.5);
        assert_eq!(coerce_amount("n/a"), 0.0);
        assert_eq!(coerce_id(""), None);
        assert_eq!(coerce_id("7"), Some(7));
    }

    #[test]
    fn test_coerce_flag() {
        assert_eq!(coerce_flag("featured", "yes"), Ok(true));
        assert_eq!(coerce_flag("featured", "OFF"), Ok(false));
        assert!(coerce_flag("featured", "maybe").is_err());
    }
}
