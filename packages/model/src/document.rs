//! # OpenAPI Document Tree
//!
//! [`OasDocument`] owns a parsed API description as an insertion-ordered JSON
//! tree together with the [`Dialect`] read from its version field.
//! [`Node`] is a live, borrowed handle to one location in that tree. Nodes
//! always know their path from the root, which is how editors turn a node
//! the user picked into a portable [`NodePath`].

use crate::dialect::Dialect;
use crate::error::{ModelError, ModelResult};
use crate::path::NodePath;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct OasDocument {
    dialect: Dialect,
    root: Value,
}

impl OasDocument {
    pub fn from_value(root: Value) -> ModelResult<Self> {
        let dialect = Dialect::detect(&root)?;
        Ok(Self { dialect, root })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            path: NodePath::root(),
            value: &self.root,
        }
    }

    /// Look up a live node by path.
    pub fn node(&self, path: &NodePath) -> Option<Node<'_>> {
        path.resolve(&self.root).map(|value| Node {
            path: path.clone(),
            value,
        })
    }

    /// Convenience for `node(&NodePath::parse(pointer)?)`.
    pub fn node_at(&self, pointer: &str) -> ModelResult<Option<Node<'_>>> {
        let path = NodePath::parse(pointer)?;
        Ok(self.node(&path))
    }

    pub fn resolve(&self, path: &NodePath) -> Option<&Value> {
        path.resolve(&self.root)
    }

    pub fn resolve_mut(&mut self, path: &NodePath) -> Option<&mut Value> {
        path.resolve_mut(&mut self.root)
    }

    pub fn value(&self) -> &Value {
        &self.root
    }

    /// Mutable access to the whole tree.
    ///
    /// Replacing the version field does not re-detect the dialect.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(&self.root)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }
}

impl TryFrom<Value> for OasDocument {
    type Error = ModelError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Parse a JSON API description.
pub fn parse(source: &str) -> ModelResult<OasDocument> {
    let root: Value = serde_json::from_str(source)?;
    OasDocument::from_value(root)
}

/// A live node: a borrowed value plus the path that leads to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    path: NodePath,
    value: &'a Value,
}

impl<'a> Node<'a> {
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// The key or index this node is stored under in its parent.
    pub fn name(&self) -> Option<&str> {
        self.path.last()
    }

    pub fn parent_path(&self) -> Option<NodePath> {
        self.path.parent()
    }

    /// Object member by key.
    pub fn child(&self, key: &str) -> Option<Node<'a>> {
        let value = self.value.as_object()?.get(key)?;
        Some(Node {
            path: self.path.child(key),
            value,
        })
    }

    /// Array element by index.
    pub fn item(&self, index: usize) -> Option<Node<'a>> {
        let value = self.value.as_array()?.get(index)?;
        Some(Node {
            path: self.path.index(index),
            value,
        })
    }

    /// Array elements, or object members in document order.
    pub fn children(&self) -> Vec<Node<'a>> {
        match self.value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, value)| Node {
                    path: self.path.index(i),
                    value,
                })
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, value)| Node {
                    path: self.path.child(key.as_str()),
                    value,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn petstore() -> OasDocument {
        OasDocument::from_value(json!({
            "swagger": "2.0",
            "paths": {
                "/pets": {
                    "get": {
                        "parameters": [
                            { "in": "query", "name": "limit" }
                        ]
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_detects_dialect() {
        let doc = parse(r#"{ "openapi": "3.0.2", "paths": {} }"#).unwrap();
        assert_eq!(doc.dialect(), Dialect::V3_0);
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(matches!(parse("{ nope"), Err(ModelError::InvalidJson(_))));
    }

    #[test]
    fn test_node_navigation_tracks_path() {
        let doc = petstore();
        let param = doc
            .root()
            .child("paths")
            .and_then(|n| n.child("/pets"))
            .and_then(|n| n.child("get"))
            .and_then(|n| n.child("parameters"))
            .and_then(|n| n.item(0))
            .unwrap();

        assert_eq!(param.path().to_pointer(), "/paths/~1pets/get/parameters/0");
        assert_eq!(param.name(), Some("0"));
        assert_eq!(param.value()["name"], "limit");

        let again = doc.node(param.path()).unwrap();
        assert_eq!(again, param);
    }

    #[test]
    fn test_node_at_miss() {
        let doc = petstore();
        assert!(doc.node_at("/paths/~1users").unwrap().is_none());
        assert!(doc.node_at("paths").is_err());
    }

    #[test]
    fn test_children_in_document_order() {
        let doc = OasDocument::from_value(json!({
            "swagger": "2.0",
            "definitions": { "Zebra": {}, "Apple": {}, "Mango": {} }
        }))
        .unwrap();

        let names: Vec<_> = doc
            .node_at("/definitions")
            .unwrap()
            .unwrap()
            .children()
            .iter()
            .map(|n| n.name().unwrap().to_string())
            .collect();
        assert_eq!(names, ["Zebra", "Apple", "Mango"]);
    }
}
