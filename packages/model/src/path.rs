//! # Node Paths
//!
//! A [`NodePath`] is the portable address of one location in a document.
//! It is an ordered list of segments, rendered as an RFC 6901 JSON Pointer
//! (`/paths/~1pets/get/parameters/0`).
//!
//! Paths never hold a reference into a tree. They are re-resolved against
//! whatever document is current, and a path that no longer leads anywhere
//! resolves to `None` rather than an error.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The document root.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a JSON Pointer. The empty string is the root.
    pub fn parse(pointer: &str) -> ModelResult<Self> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(ModelError::invalid_pointer(pointer, "must start with '/'"));
        };

        let mut segments = Vec::new();
        for raw in rest.split('/') {
            segments.push(unescape_segment(pointer, raw)?);
        }
        Ok(Self { segments })
    }

    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            out.push_str(&escape_segment(segment));
        }
        out
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment (property name, map key or array index).
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Walk `root` along this path.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(parse_index(segment)?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    pub fn resolve_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        let mut current = root;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get_mut(segment)?,
                Value::Array(items) => items.get_mut(parse_index(segment)?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

fn parse_index(segment: &str) -> Option<usize> {
    // Leading zeros are not valid array indices in a pointer.
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}

fn escape_segment(segment: &str) -> String {
    if !segment.contains('~') && !segment.contains('/') {
        return segment.to_string();
    }
    segment.replace('~', "~0").replace('/', "~1")
}

fn unescape_segment(pointer: &str, raw: &str) -> ModelResult<String> {
    if !raw.contains('~') {
        return Ok(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(ModelError::invalid_pointer(pointer, "dangling '~' escape")),
        }
    }
    Ok(out)
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pointer())
    }
}

impl FromStr for NodePath {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NodePath {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NodePath> for String {
    fn from(path: NodePath) -> Self {
        path.to_pointer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_format() {
        let path = NodePath::parse("/paths/~1pets~1{petId}/get").unwrap();
        assert_eq!(path.segments(), ["paths", "/pets/{petId}", "get"]);
        assert_eq!(path.to_pointer(), "/paths/~1pets~1{petId}/get");
    }

    #[test]
    fn test_tilde_escaping_order() {
        let path = NodePath::from_segments(["a~/b"]);
        assert_eq!(path.to_pointer(), "/a~0~1b");
        assert_eq!(NodePath::parse("/a~0~1b").unwrap(), path);
    }

    #[test]
    fn test_root() {
        let root = NodePath::parse("").unwrap();
        assert!(root.is_root());
        assert_eq!(root.to_pointer(), "");
        assert_eq!(root.parent(), None);
    }

    #[test]
    fn test_invalid_pointers() {
        assert!(NodePath::parse("paths").is_err());
        assert!(NodePath::parse("/a~2").is_err());
        assert!(NodePath::parse("/a~").is_err());
    }

    #[test]
    fn test_resolve_objects_and_arrays() {
        let doc = json!({
            "responses": { "200": { "description": "ok" } },
            "parameters": [ { "name": "a" }, { "name": "b" } ]
        });

        let response = NodePath::parse("/responses/200/description").unwrap();
        assert_eq!(response.resolve(&doc), Some(&json!("ok")));

        let param = NodePath::root().child("parameters").index(1).child("name");
        assert_eq!(param.resolve(&doc), Some(&json!("b")));
    }

    #[test]
    fn test_resolve_miss_is_none() {
        let doc = json!({ "parameters": [ { "name": "a" } ] });
        assert_eq!(NodePath::parse("/parameters/3").unwrap().resolve(&doc), None);
        assert_eq!(NodePath::parse("/parameters/01").unwrap().resolve(&doc), None);
        assert_eq!(NodePath::parse("/parameters/0/name/x").unwrap().resolve(&doc), None);
        assert_eq!(NodePath::parse("/missing").unwrap().resolve(&doc), None);
    }

    #[test]
    fn test_resolve_mut() {
        let mut doc = json!({ "info": { "title": "Old" } });
        let title = NodePath::parse("/info/title").unwrap();
        *title.resolve_mut(&mut doc).unwrap() = json!("New");
        assert_eq!(doc["info"]["title"], "New");
    }

    #[test]
    fn test_serde_as_pointer_string() {
        let path = NodePath::from_segments(["paths", "/pets"]);
        let encoded = serde_json::to_value(&path).unwrap();
        assert_eq!(encoded, json!("/paths/~1pets"));

        let decoded: NodePath = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, path);

        assert!(serde_json::from_value::<NodePath>(json!("no-slash")).is_err());
    }
}
