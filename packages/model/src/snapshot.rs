//! # Snapshots and ordered containers
//!
//! Snapshots are plain JSON copies of a subtree. They carry no link back to
//! the tree they came from and can be stored, sent elsewhere, and later read
//! back into a fresh node.
//!
//! The container helpers keep object member order intact. Insert and remove
//! positions are explicit so an undo can put an entry back exactly where it
//! was, and a re-serialized document compares equal byte-for-byte.

use serde_json::{Map, Value};

/// Capture a node as a plain value.
pub fn write_node(node: &Value) -> Value {
    node.clone()
}

/// Materialize a fresh subtree from a snapshot.
pub fn read_node(snapshot: &Value) -> Value {
    snapshot.clone()
}

/// Insert `key` at `index` (clamped to the end). An existing entry with the
/// same key is replaced and moved to `index`.
pub fn insert_entry_at(map: &mut Map<String, Value>, index: usize, key: &str, value: Value) {
    let old = std::mem::take(map);
    let mut value = Some(value);
    let mut position = 0;

    for (k, v) in old {
        if k == key {
            continue;
        }
        if position == index {
            if let Some(value) = value.take() {
                map.insert(key.to_string(), value);
            }
        }
        map.insert(k, v);
        position += 1;
    }

    if let Some(value) = value {
        map.insert(key.to_string(), value);
    }
}

/// Remove `key`, returning its former position and value.
pub fn remove_entry(map: &mut Map<String, Value>, key: &str) -> Option<(usize, Value)> {
    let index = map.keys().position(|k| k == key)?;
    let old = std::mem::take(map);
    let mut removed = None;

    for (k, v) in old {
        if k == key {
            removed = Some(v);
        } else {
            map.insert(k, v);
        }
    }

    removed.map(|value| (index, value))
}

/// Overwrite `fields` of `target` from `snapshot`.
///
/// Fields absent from the snapshot are removed. The result follows the
/// snapshot's member order, with members the snapshot never had appended
/// in their current order.
pub fn restore_fields(target: &mut Map<String, Value>, snapshot: &Map<String, Value>, fields: &[&str]) {
    let current = std::mem::take(target);

    for (key, value) in snapshot {
        if fields.contains(&key.as_str()) {
            target.insert(key.clone(), value.clone());
        } else if let Some(value) = current.get(key) {
            target.insert(key.clone(), value.clone());
        }
    }

    for (key, value) in current {
        if !fields.contains(&key.as_str()) && !target.contains_key(&key) {
            target.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_remove_then_insert_restores_order() {
        let mut map = object(json!({ "a": 1, "b": 2, "c": 3 }));

        let (index, value) = remove_entry(&mut map, "b").unwrap();
        assert_eq!(index, 1);
        assert_eq!(keys(&map), ["a", "c"]);

        insert_entry_at(&mut map, index, "b", value);
        assert_eq!(keys(&map), ["a", "b", "c"]);
        assert_eq!(map["b"], 2);
    }

    #[test]
    fn test_insert_clamps_to_end() {
        let mut map = object(json!({ "a": 1 }));
        insert_entry_at(&mut map, 10, "z", json!(0));
        assert_eq!(keys(&map), ["a", "z"]);
    }

    #[test]
    fn test_remove_missing() {
        let mut map = object(json!({ "a": 1 }));
        assert!(remove_entry(&mut map, "nope").is_none());
        assert_eq!(keys(&map), ["a"]);
    }

    #[test]
    fn test_restore_fields_follows_snapshot_order() {
        let snapshot = object(json!({
            "type": "string",
            "description": "old",
            "format": "uuid"
        }));
        let mut target = object(json!({
            "description": "kept",
            "$ref": "#/definitions/Pet",
            "x-extra": true
        }));

        restore_fields(&mut target, &snapshot, &["$ref", "type", "format", "enum", "items"]);

        assert_eq!(keys(&target), ["type", "description", "format", "x-extra"]);
        assert_eq!(target["description"], "kept");
        assert_eq!(target["format"], "uuid");
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut node = json!({ "name": "petId" });
        let snapshot = write_node(&node);
        node["name"] = json!("changed");
        assert_eq!(read_node(&snapshot), json!({ "name": "petId" }));
    }
}
