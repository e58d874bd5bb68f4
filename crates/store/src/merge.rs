//! Upsert-merge semantics shared by the bindings.

use serde_json::Value;

/// Merge `incoming` into `existing` the way a hosted store's merge-write
/// does: object fields merge recursively, everything else (arrays included)
/// is replaced wholesale.
pub(crate) fn merge_into(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(current), Value::Object(update)) => {
            for (key, value) in update {
                match current.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        current.insert(key, value);
                    }
                }
            }
        }
        (slot, update) => *slot = update,
    }
}
