//! Helpers for decoding loosely-shaped API payloads.

use serde_json::Value;

use crate::StrainActivity;

/// Extract activity records from an activities response.
///
/// Accepts a bare array, an object wrapping the first array it contains, or a
/// single activity object. Items that are not objects or fail to decode are
/// skipped.
pub fn parse_activity_list(value: Value) -> Vec<StrainActivity> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => {
            if let Some(items) = map.values().find_map(Value::as_array) {
                items.clone()
            } else if ["name", "startTime", "start_date", "distance"]
                .iter()
                .any(|k| map.contains_key(*k))
            {
                vec![Value::Object(map)]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    };
    decode_items(items)
}

fn decode_items(items: Vec<Value>) -> Vec<StrainActivity> {
    items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| match serde_json::from_value::<StrainActivity>(item) {
            Ok(a) => Some(a),
            Err(e) => {
                tracing::warn!(error = %e, "skipping undecodable activity record");
                None
            }
        })
        .collect()
}
