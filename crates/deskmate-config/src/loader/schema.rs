//! Schema validation helpers for Deskmate JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(
        map,
        &["$schema", "store", "gateway", "assistant"],
        layer,
        "",
    )?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("store") {
        validate_store(value, layer, "store")?;
    }
    if let Some(value) = map.get("gateway") {
        validate_gateway(value, layer, "gateway")?;
    }
    if let Some(value) = map.get("assistant") {
        validate_assistant(value, layer, "assistant")?;
    }
    Ok(())
}

/// Validate the "store" block.
fn validate_store(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["path"], layer, path)?;
    if let Some(value) = map.get("path") {
        expect_string(value, layer, &join_path(path, "path"))?;
    }
    Ok(())
}

/// Validate the "gateway" block.
fn validate_gateway(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["endpoint", "model", "system_prompt", "timeout_secs"],
        layer,
        path,
    )?;
    if let Some(value) = map.get("endpoint") {
        let endpoint_path = join_path(path, "endpoint");
        expect_string(value, layer, &endpoint_path)?;
        let endpoint = value.as_str().unwrap_or_default();
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(invalid_field(
                layer,
                &endpoint_path,
                "expected an http(s) URL",
            ));
        }
    }
    if let Some(value) = map.get("model") {
        expect_string(value, layer, &join_path(path, "model"))?;
    }
    if let Some(value) = map.get("system_prompt") {
        if !value.is_null() {
            expect_string(value, layer, &join_path(path, "system_prompt"))?;
        }
    }
    if let Some(value) = map.get("timeout_secs") {
        if !value.is_null() {
            expect_u64(value, layer, &join_path(path, "timeout_secs"))?;
        }
    }
    Ok(())
}

/// Validate the "assistant" block.
fn validate_assistant(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["local_shortcuts"], layer, path)?;
    if let Some(value) = map.get("local_shortcuts") {
        expect_bool(value, layer, &join_path(path, "local_shortcuts"))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a JSON boolean or return a typed error.
fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if matches!(value, Value::Bool(_)) {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected bool"))
    }
}

/// Expect a non-negative JSON integer or return a typed error.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
