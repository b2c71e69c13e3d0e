//! # OpenAPI document model
//!
//! The tree that editor commands operate on:
//!
//! - [`OasDocument`]: an insertion-ordered JSON tree plus its [`Dialect`]
//! - [`Node`]: a live handle that knows its path from the root
//! - [`NodePath`]: the portable address of a node, re-resolved on every use
//! - [`write_node`] / [`read_node`]: plain-value snapshots of subtrees
//!
//! ```rust
//! use oasedit_model::{parse, Dialect};
//!
//! let doc = parse(r#"{ "swagger": "2.0", "paths": { "/pets": {} } }"#).unwrap();
//! assert_eq!(doc.dialect(), Dialect::V2_0);
//!
//! let pets = doc.node_at("/paths/~1pets").unwrap().unwrap();
//! assert_eq!(pets.path().to_string(), "/paths/~1pets");
//! ```

pub mod dialect;
pub mod document;
pub mod error;
pub mod path;
pub mod snapshot;

pub use dialect::Dialect;
pub use document::{parse, Node, OasDocument};
pub use error::{ModelError, ModelResult};
pub use path::NodePath;
pub use snapshot::{insert_entry_at, read_node, remove_entry, restore_fields, write_node};
