//! Single decode step for the backend's response shapes. The endpoints
//! answer with one of three conventions — a bare array, `{items, stats?}`,
//! or a `{success, data?/error?}` envelope — and every screen used to
//! re-check shapes ad hoc. Decoding once at the boundary means downstream
//! code only ever sees typed payloads.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::AppError;

/// A decoded list response. `stats` rides along for endpoints that
/// precompute aggregates server-side (e.g. treatment-plan stats).
#[derive(Debug, Clone)]
pub struct ListPayload<T> {
    pub items: Vec<T>,
    pub stats: Option<Value>,
}

impl<T> Default for ListPayload<T> {
    fn default() -> Self {
        ListPayload { items: Vec::new(), stats: None }
    }
}

/// Decode a list response in any of the accepted shapes.
pub fn decode_list<T: DeserializeOwned>(body: Value) -> Result<ListPayload<T>, AppError> {
    match body {
        Value::Array(_) => Ok(ListPayload {
            items: serde_json::from_value(body)?,
            stats: None,
        }),
        Value::Object(mut map) => {
            if let Some(Value::Bool(false)) = map.get("success") {
                return Err(AppError::Fetch(error_message(&map)));
            }
            if let Some(items) = map.remove("items") {
                return Ok(ListPayload {
                    items: serde_json::from_value(items)?,
                    stats: map.remove("stats"),
                });
            }
            if let Some(data) = map.remove("data") {
                // data can itself be a bare array or an {items, stats?} object
                return decode_list(data);
            }
            Err(AppError::Parse("list response has neither items nor data".to_string()))
        }
        other => Err(AppError::Parse(format!("unexpected list response: {other}"))),
    }
}

/// Decode a single-entity response: either the entity itself or a
/// `{success, data}` envelope around it.
pub fn decode_entity<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    match body {
        Value::Object(mut map) if map.contains_key("success") => {
            if let Some(Value::Bool(false)) = map.get("success") {
                return Err(AppError::Fetch(error_message(&map)));
            }
            match map.remove("data") {
                Some(data) => Ok(serde_json::from_value(data)?),
                None => Err(AppError::Parse("success envelope without data".to_string())),
            }
        }
        other => Ok(serde_json::from_value(other)?),
    }
}

/// Decode a mutation acknowledgement. Anything that is not an explicit
/// `{success: false}` counts as success — some endpoints return the
/// created entity, some a status envelope, some an empty body.
pub fn decode_ack(body: &Value) -> Result<(), AppError> {
    if let Value::Object(map) = body {
        if let Some(Value::Bool(false)) = map.get("success") {
            return Err(AppError::Fetch(error_message(map)));
        }
    }
    Ok(())
}

fn error_message(map: &serde_json::Map<String, Value>) -> String {
    match map.get("error") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "request failed".to_string(),
    }
}
