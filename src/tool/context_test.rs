// ABOUTME: Tests for InvocationContext - construction from JSON values and
// ABOUTME: conformance to declared inputs, with and without type conversion.

use serde_json::json;

use super::*;

fn fields() -> Vec<InputField> {
    vec![
        InputField::new("count", FieldKind::Number).required(),
        InputField::new("enabled", FieldKind::Boolean),
        InputField::new("tags", FieldKind::Array),
        InputField::new("label", FieldKind::String),
    ]
}

#[test]
fn test_from_object() {
    let ctx = InvocationContext::from_value(json!({"a": 1, "b": "two"}));
    assert_eq!(ctx.len(), 2);
    assert_eq!(ctx.get("b"), Some(&json!("two")));
}

#[test]
fn test_from_scalar_wraps_query() {
    let ctx = InvocationContext::from_value(json!("find invoices"));
    assert_eq!(ctx.into_value(), json!({"query": "find invoices"}));
}

#[test]
fn test_from_null_is_empty() {
    assert!(InvocationContext::from_value(serde_json::Value::Null).is_empty());
}

#[test]
fn test_builder() {
    let ctx = InvocationContext::new().with("x", 1).with("y", "z");
    assert_eq!(ctx.into_value(), json!({"x": 1, "y": "z"}));
}

#[test]
fn test_conform_accepts_matching_types() {
    let ctx = InvocationContext::from_value(json!({"count": 3, "enabled": true, "other": "kept"}));
    let ctx = ctx.conform(&fields(), false).unwrap();
    assert_eq!(ctx.get("other"), Some(&json!("kept")));
}

#[test]
fn test_conform_missing_required() {
    let err = InvocationContext::from_value(json!({"enabled": true}))
        .conform(&fields(), false)
        .unwrap_err();
    assert!(err.contains("count"));
}

#[test]
fn test_conform_null_optional_allowed() {
    let ctx = InvocationContext::from_value(json!({"count": 1, "label": null}));
    assert!(ctx.conform(&fields(), false).is_ok());
}

#[test]
fn test_conform_strict_type_mismatch() {
    let err = InvocationContext::from_value(json!({"count": "3"}))
        .conform(&fields(), false)
        .unwrap_err();
    assert!(err.contains("should be number"));
    assert!(err.contains("got string"));
}

#[test]
fn test_conform_converts_types() {
    let ctx = InvocationContext::from_value(json!({
        "count": " 2.5 ",
        "enabled": "TRUE",
        "tags": "[\"a\", \"b\"]",
        "label": 12
    }))
    .conform(&fields(), true)
    .unwrap();

    assert_eq!(
        ctx.into_value(),
        json!({"count": 2.5, "enabled": true, "tags": ["a", "b"], "label": "12"})
    );
}

#[test]
fn test_conform_rejects_unconvertible() {
    let err = InvocationContext::from_value(json!({"count": 1, "tags": "{\"not\": \"array\"}"}))
        .conform(&fields(), true)
        .unwrap_err();
    assert!(err.contains("tags"));
}

#[test]
fn test_convert_keeps_large_integers_exact() {
    let fields = [InputField::new("id", FieldKind::Number)];
    let ctx = InvocationContext::from_value(json!({"id": "18446744073709551615"}))
        .conform(&fields, true)
        .unwrap();
    assert_eq!(ctx.get("id").and_then(|v| v.as_u64()), Some(u64::MAX));

    let ctx = InvocationContext::from_value(json!({"id": "-9223372036854775808"}))
        .conform(&fields, true)
        .unwrap();
    assert_eq!(ctx.get("id").and_then(|v| v.as_i64()), Some(i64::MIN));
}

#[test]
fn test_convert_rejects_integers_beyond_u64() {
    let fields = [InputField::new("id", FieldKind::Number)];
    let err = InvocationContext::from_value(json!({"id": "99999999999999999999"}))
        .conform(&fields, true)
        .unwrap_err();
    assert!(err.contains("should be number"));
}

#[test]
fn test_convert_rejects_non_numeric_text() {
    let fields = [InputField::new("n", FieldKind::Number)];
    for text in ["NaN", "inf", "1e400", "12abc"] {
        let result = InvocationContext::from_value(json!({ "n": text })).conform(&fields, true);
        assert!(result.is_err(), "{} should not convert", text);
    }
}
