//! Dialect capabilities.
//!
//! Swagger 2.0 and OpenAPI 3.x keep reusable schemas in different places and
//! reference them differently. Mutations talk to the tree through
//! [`DialectApi`] for anything that differs; the implementation is picked
//! once from the command's dialect tag and never re-derived from the tree.

use oasedit_model::{Dialect, NodePath};
use serde_json::{Map, Value};

pub trait DialectApi: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Container holding named schema definitions.
    fn definitions_path(&self) -> NodePath;

    /// Definitions container, created (with any missing parents) if absent.
    ///
    /// Returns `None` when an existing parent is not an object.
    fn ensure_definitions<'a>(&self, root: &'a mut Value) -> Option<&'a mut Map<String, Value>>;

    /// `$ref` value pointing at the named definition.
    fn schema_ref(&self, name: &str) -> String {
        format!("#{}", self.definitions_path().child(name).to_pointer())
    }

    fn path_item_path(&self, path: &str) -> NodePath {
        NodePath::root().child("paths").child(path)
    }
}

/// Swagger 2.0: `#/definitions/{name}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oas20Api;

impl DialectApi for Oas20Api {
    fn dialect(&self) -> Dialect {
        Dialect::V2_0
    }

    fn definitions_path(&self) -> NodePath {
        NodePath::from_segments(["definitions"])
    }

    fn ensure_definitions<'a>(&self, root: &'a mut Value) -> Option<&'a mut Map<String, Value>> {
        object_member(root.as_object_mut()?, "definitions")
    }
}

/// OpenAPI 3.x: `#/components/schemas/{name}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oas30Api;

impl DialectApi for Oas30Api {
    fn dialect(&self) -> Dialect {
        Dialect::V3_0
    }

    fn definitions_path(&self) -> NodePath {
        NodePath::from_segments(["components", "schemas"])
    }

    fn ensure_definitions<'a>(&self, root: &'a mut Value) -> Option<&'a mut Map<String, Value>> {
        let components = object_member(root.as_object_mut()?, "components")?;
        object_member(components, "schemas")
    }
}

fn object_member<'a>(map: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if slot.is_null() {
        *slot = Value::Object(Map::new());
    }
    slot.as_object_mut()
}

pub fn api_for(dialect: Dialect) -> &'static dyn DialectApi {
    match dialect {
        Dialect::V2_0 => &Oas20Api,
        Dialect::V3_0 => &Oas30Api,
    }
}
