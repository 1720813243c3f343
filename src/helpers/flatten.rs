use serde_json::{Map, Value};

use super::numeric::is_numeric_str;

/// Recursively normalize nested sequences and maps
///
/// Sequences stay sequences and maps stay maps. Inside a map, containers
/// stored under a numeric key are re-keyed positionally (next free integer
/// index), everything else keeps its key. Scalars are returned as-is.
pub fn flatten(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(flatten).collect()),
        Value::Object(map) => Value::Object(flatten_map(map)),
        scalar => scalar.clone(),
    }
}

/// [`flatten`] applied to the entries of a single map
pub fn flatten_map(map: &Map<String, Value>) -> Map<String, Value> {
    let mut result = Map::new();
    let mut next_index: u64 = 0;

    for (key, value) in map {
        let key = match value {
            Value::Array(_) | Value::Object(_) if is_numeric_str(key) => {
                let key = next_index.to_string();
                next_index += 1;
                key
            }
            _ => {
                if let Some(index) = canonical_index(key) {
                    next_index = next_index.max(index.saturating_add(1));
                }
                key.clone()
            }
        };

        result.insert(key, flatten(value));
    }

    result
}

/// `key` as an integer index, only when written canonically (`"0"`, `"12"`, not `"+3"` or `"03"`)
fn canonical_index(key: &str) -> Option<u64> {
    let canonical = match key.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
        [] => false,
    };

    if canonical {
        key.parse().ok()
    } else {
        None
    }
}
