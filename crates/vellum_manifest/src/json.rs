//! Lenient accessors over raw JSON-LD values.
//!
//! IIIF documents in the wild mix JSON-LD keyword forms (`@id`, `@type`)
//! with plain forms (`id`, `type`), and use a bare value where the schema
//! says "list". These helpers paper over both so the version adapters can
//! ask simple questions.

use serde_json::Value;

/// Returns a short name for the kind of a JSON value, for error messages.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Looks up `key` on an object, falling back to its JSON-LD keyword form
/// (`@key`). Explicit `null` counts as absent.
pub fn get<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    let obj = value.as_object()?;
    obj.get(key)
        .filter(|v| !v.is_null())
        .or_else(|| {
            if key.starts_with('@') {
                None
            } else {
                obj.get(&format!("@{key}")).filter(|v| !v.is_null())
            }
        })
}

/// Views a value as a list: arrays as-is, `null` as empty, anything else
/// as a one-element list.
pub fn as_slice(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        Value::Null => &[],
        other => std::slice::from_ref(other),
    }
}

/// Looks up `key` and views the result as a list.
pub fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    get(value, key).map(as_slice).unwrap_or(&[])
}

/// Returns the identifier of a reference: the string itself, or the
/// `id`/`@id` of an object.
pub fn id_of(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(_) => get(value, "id").and_then(Value::as_str),
        _ => None,
    }
}

/// Returns the `type`/`@type` of an object, taking the first entry when it
/// is a list.
pub fn type_of(value: &Value) -> Option<&str> {
    get(value, "type").and_then(|t| as_slice(t).first()).and_then(Value::as_str)
}

/// Returns `true` if the object's type equals `wanted`, ignoring any JSON-LD
/// prefix such as `sc:` and ASCII case.
pub fn has_type(value: &Value, wanted: &str) -> bool {
    type_of(value).is_some_and(|t| {
        let local = t.rsplit(':').next().unwrap_or(t);
        local.eq_ignore_ascii_case(wanted)
    })
}

/// Returns a string-valued property.
pub fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    get(value, key).and_then(Value::as_str)
}

/// Returns all strings found under `key`, whether given as one string or a
/// list. Non-string list members are skipped.
pub fn strings<'a>(value: &'a Value, key: &str) -> Vec<&'a str> {
    list(value, key).iter().filter_map(Value::as_str).collect()
}

/// Returns a non-negative integer property, accepting integers, floats and
/// numeric strings.
pub fn u32_field(value: &Value, key: &str) -> Option<u32> {
    match get(value, key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
