//! Loose value semantics shared by the CRM mappers.
//!
//! CRM exports are untyped JSON, and the metadata consumers expect PHP conventions:
//! `"0"` is empty, `true` prints as `"1"`, integral floats print without a fraction.

use serde_json::{Map, Number, Value};

/// Characters stripped by PHP's `trim` with no explicit character list.
const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// PHP `empty()` for a decoded JSON value. Objects are never empty.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

pub fn is_truthy(value: Option<&Value>) -> bool {
    value.map(|v| !is_empty(v)).unwrap_or(false)
}

/// Scalar to string coercion. Objects and arrays coerce to an empty string.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "1".to_string(),
        Value::Number(n) => number_to_text(n),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

fn number_to_text(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

pub fn trim(s: &str) -> String {
    s.trim_matches(TRIM_CHARS).to_string()
}

/// `trim($value ?? '')`
pub fn trimmed(value: Option<&Value>) -> String {
    value.map(|v| trim(&to_text(v))).unwrap_or_default()
}

/// Strips formatting from phone, CPF, CNPJ and CEP strings.
///
/// The integer filter keeps ASCII digits plus `+` and `-`, and the signs are dropped
/// afterwards, so only the digits survive. Empty input (including `"0"`) yields `""`.
pub fn sanitize_number(s: &str) -> String {
    if s.is_empty() || s == "0" {
        return String::new();
    }
    s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || *c == '-')
        .filter(|c| *c != '+' && *c != '-')
        .collect()
}

/// `sanitize_number($value ?? '')`
pub fn sanitize_value(value: Option<&Value>) -> String {
    match value {
        Some(v) if !is_empty(v) => sanitize_number(&to_text(v)),
        _ => String::new(),
    }
}

/// Deduplicates while keeping first-occurrence order, dropping empty entries.
pub fn unique_values<I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unique: Vec<String> = Vec::new();
    for value in values {
        if value.is_empty() || value == "0" || unique.contains(&value) {
            continue;
        }
        unique.push(value);
    }
    unique
}

/// JSON encoding where every array, at any depth, becomes an object keyed by index.
pub fn force_object_json(value: &Value) -> String {
    force_object(value).to_string()
}

fn force_object(value: &Value) -> Value {
    match value {
        Value::Array(items) => {
            let map: Map<String, Value> = items
                .iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), force_object(item)))
                .collect();
            Value::Object(map)
        }
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), force_object(v)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_empty_matches_loose_semantics() {
        assert!(is_empty(&json!(null)));
        assert!(is_empty(&json!(false)));
        assert!(is_empty(&json!(0)));
        assert!(is_empty(&json!(0.0)));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&json!("0")));
        assert!(is_empty(&json!([])));
        assert!(!is_empty(&json!({})));
        assert!(!is_empty(&json!(" ")));
        assert!(!is_empty(&json!("00")));
        assert!(!is_empty(&json!(true)));
    }

    #[test]
    fn test_to_text() {
        assert_eq!(to_text(&json!(42)), "42");
        assert_eq!(to_text(&json!(42.0)), "42");
        assert_eq!(to_text(&json!(1.5)), "1.5");
        assert_eq!(to_text(&json!(true)), "1");
        assert_eq!(to_text(&json!(false)), "");
        assert_eq!(to_text(&json!({"Id": "x"})), "");
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(Some(&json!("  Ethos \n"))), "Ethos");
        assert_eq!(trimmed(Some(&json!(120))), "120");
        assert_eq!(trimmed(None), "");
        // non-breaking space is not in the default trim set
        assert_eq!(trimmed(Some(&json!("\u{a0}x"))), "\u{a0}x");
    }

    #[test]
    fn test_sanitize_number() {
        assert_eq!(sanitize_number(""), "");
        assert_eq!(sanitize_number("0"), "");
        assert_eq!(sanitize_number("+55 (11) 99999-8888"), "5511999998888");
        assert_eq!(sanitize_number("01.310-100"), "01310100");
        assert_eq!(sanitize_number("6201-5/01 - Software"), "6201501");
        assert_eq!(sanitize_number("sem número"), "");
    }

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value(None), "");
        assert_eq!(sanitize_value(Some(&json!(null))), "");
        assert_eq!(sanitize_value(Some(&json!(0))), "");
        assert_eq!(sanitize_value(Some(&json!(1130001234))), "1130001234");
        assert_eq!(sanitize_value(Some(&json!("123.456.789-09"))), "12345678909");
    }

    #[test]
    fn test_unique_values_preserves_first_occurrence() {
        let phones = vec![
            "".to_string(),
            "11999998888".to_string(),
            "11999998888".to_string(),
        ];
        assert_eq!(unique_values(phones), vec!["11999998888".to_string()]);

        let phones = vec!["2".to_string(), "1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(unique_values(phones), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_force_object_json() {
        let reference = json!({"Id": "abc", "Name": "Indústria", "Tags": ["a", "b"]});
        assert_eq!(
            force_object_json(&reference),
            r#"{"Id":"abc","Name":"Indústria","Tags":{"0":"a","1":"b"}}"#
        );
        assert_eq!(force_object_json(&json!([])), "{}");
    }
}
