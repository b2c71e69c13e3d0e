//! # Marshalling
//!
//! Commands cross process boundaries as plain JSON objects:
//!
//! ```json
//! {
//!   "type": "DeleteAllParametersCommand_20",
//!   "state": "executed",
//!   "parentPath": "/paths/~1pets/get",
//!   "paramType": "query",
//!   "oldParams": [{ "index": 0, "param": { "in": "query", "name": "a" } }]
//! }
//! ```
//!
//! `type` is `<Kind>_<dialect suffix>` and selects the concrete command. The
//! remaining fields are the mutation's own serde schema: addresses as JSON
//! Pointer strings, parameters as nested objects, snapshots verbatim.
//! Decoding is strict. Unknown kinds, unknown fields, missing fields and bad
//! pointers all fail at the boundary instead of producing a broken command.

use crate::command::{Command, CommandState, DialectCommand, Mutation};
use crate::commands;
use oasedit_model::Dialect;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

const TYPE_FIELD: &str = "type";
const STATE_FIELD: &str = "state";

#[derive(Error, Debug)]
pub enum MarshallError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Marshalled command must be a JSON object")]
    NotAnObject,

    #[error("Marshalled command is missing its \"type\" discriminator")]
    MissingType,

    #[error("Unknown command type: {0}")]
    UnknownType(String),

    #[error("Expected a {expected} command, found {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("Invalid fields for {type_tag}: {source}")]
    InvalidFields {
        type_tag: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {type_tag}: {source}")]
    Encode {
        type_tag: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn type_tag(kind: &str, dialect: Dialect) -> String {
    format!("{}_{}", kind, dialect.suffix())
}

/// Split `ChangePropertyTypeCommand_20` into kind and dialect.
pub fn parse_type_tag(tag: &str) -> Option<(&str, Dialect)> {
    let (kind, suffix) = tag.rsplit_once('_')?;
    Some((kind, Dialect::from_suffix(suffix)?))
}

pub(crate) fn encode<M: Mutation>(
    dialect: Dialect,
    state: CommandState,
    mutation: &M,
) -> Result<Value, MarshallError> {
    let tag = type_tag(M::KIND, dialect);
    let fields = serde_json::to_value(mutation).map_err(|source| MarshallError::Encode {
        type_tag: tag.clone(),
        source,
    })?;
    let Value::Object(fields) = fields else {
        return Err(MarshallError::NotAnObject);
    };

    let mut plain = Map::new();
    plain.insert(TYPE_FIELD.to_string(), Value::String(tag));
    plain.insert(STATE_FIELD.to_string(), serde_json::to_value(state)?);
    plain.extend(fields);
    Ok(Value::Object(plain))
}

fn decode<M: Mutation>(
    dialect: Dialect,
    mut fields: Map<String, Value>,
) -> Result<DialectCommand<M>, MarshallError> {
    let invalid = |source| MarshallError::InvalidFields {
        type_tag: type_tag(M::KIND, dialect),
        source,
    };

    let state = match fields.remove(STATE_FIELD) {
        Some(state) => serde_json::from_value(state).map_err(invalid)?,
        None => CommandState::Unexecuted,
    };
    let mutation = serde_json::from_value(Value::Object(fields)).map_err(invalid)?;

    Ok(DialectCommand::restore(dialect, state, mutation))
}

/// Take the discriminator off a plain command.
fn split_envelope(value: Value) -> Result<(String, Map<String, Value>), MarshallError> {
    let Value::Object(mut fields) = value else {
        return Err(MarshallError::NotAnObject);
    };
    match fields.remove(TYPE_FIELD) {
        Some(Value::String(tag)) => Ok((tag, fields)),
        _ => Err(MarshallError::MissingType),
    }
}

impl<M: Mutation> DialectCommand<M> {
    /// Decode a command whose kind the caller already knows.
    pub fn unmarshall(value: Value) -> Result<Self, MarshallError> {
        let (tag, fields) = split_envelope(value)?;
        let (kind, dialect) =
            parse_type_tag(&tag).ok_or_else(|| MarshallError::UnknownType(tag.clone()))?;
        if kind != M::KIND {
            return Err(MarshallError::TypeMismatch {
                expected: M::KIND,
                found: tag,
            });
        }
        decode(dialect, fields)
    }
}

type Unmarshaller = fn(Dialect, Map<String, Value>) -> Result<Box<dyn Command>, MarshallError>;

fn unmarshall_boxed<M: Mutation>(
    dialect: Dialect,
    fields: Map<String, Value>,
) -> Result<Box<dyn Command>, MarshallError> {
    Ok(Box::new(decode::<M>(dialect, fields)?))
}

/// Maps command kinds to their decoders.
pub struct CommandRegistry {
    kinds: HashMap<&'static str, Unmarshaller>,
}

impl CommandRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// A registry that knows every command shipped with this crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        commands::register_all(&mut registry);
        registry
    }

    pub fn register<M: Mutation>(&mut self) -> &mut Self {
        self.kinds.insert(M::KIND, unmarshall_boxed::<M> as Unmarshaller);
        self
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.kinds.keys().copied()
    }

    pub fn unmarshall(&self, value: Value) -> Result<Box<dyn Command>, MarshallError> {
        let (tag, fields) = split_envelope(value)?;
        let decoder = parse_type_tag(&tag)
            .and_then(|(kind, dialect)| self.kinds.get(kind).map(|decoder| (decoder, dialect)));

        match decoder {
            Some((decoder, dialect)) => decoder(dialect, fields),
            None => Err(MarshallError::UnknownType(tag)),
        }
    }

    pub fn unmarshall_str(&self, json: &str) -> Result<Box<dyn Command>, MarshallError> {
        self.unmarshall(serde_json::from_str(json)?)
    }

    /// Decode a JSON array of commands, failing on the first bad entry.
    pub fn unmarshall_all(&self, value: Value) -> Result<Vec<Box<dyn Command>>, MarshallError> {
        match value {
            Value::Array(items) => items.into_iter().map(|item| self.unmarshall(item)).collect(),
            other => Ok(vec![self.unmarshall(other)?]),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.kinds.keys().collect();
        kinds.sort();
        f.debug_struct("CommandRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{DeletePath, NewResponse};
    use serde_json::json;

    #[test]
    fn test_type_tags() {
        assert_eq!(type_tag("NewResponseCommand", Dialect::V2_0), "NewResponseCommand_20");
        assert_eq!(
            parse_type_tag("ChangePropertyTypeCommand_30"),
            Some(("ChangePropertyTypeCommand", Dialect::V3_0))
        );
        assert_eq!(parse_type_tag("NewResponseCommand_31"), None);
        assert_eq!(parse_type_tag("NewResponseCommand"), None);
    }

    #[test]
    fn test_defaults_cover_shipped_commands() {
        let registry = CommandRegistry::with_defaults();
        assert_eq!(registry.kinds().count(), 8);
        assert!(registry.contains("DeleteAllParametersCommand"));
        assert!(!registry.contains("DeleteAllParametersCommand_20"));
    }

    #[test]
    fn test_rejects_non_object() {
        let err = CommandRegistry::with_defaults().unmarshall(json!([1])).unwrap_err();
        assert!(matches!(err, MarshallError::NotAnObject));
    }

    #[test]
    fn test_rejects_missing_type() {
        let err = CommandRegistry::with_defaults()
            .unmarshall(json!({ "pathItemPath": "/paths/~1pets" }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::MissingType));

        let err = CommandRegistry::with_defaults()
            .unmarshall(json!({ "type": 20 }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::MissingType));
    }

    #[test]
    fn test_rejects_unknown_type() {
        let registry = CommandRegistry::with_defaults();
        for tag in ["RenameEverythingCommand_20", "DeletePathCommand_99", "DeletePathCommand"] {
            let err = registry.unmarshall(json!({ "type": tag })).unwrap_err();
            assert!(matches!(err, MarshallError::UnknownType(t) if t == tag));
        }
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let registry = CommandRegistry::with_defaults();

        // missing required field
        let err = registry
            .unmarshall(json!({ "type": "DeletePathCommand_20" }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::InvalidFields { .. }));

        // unknown field
        let err = registry
            .unmarshall(json!({
                "type": "DeletePathCommand_20",
                "pathItemPath": "/paths/~1pets",
                "bogus": true
            }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::InvalidFields { .. }));

        // malformed address
        let err = registry
            .unmarshall(json!({ "type": "DeletePathCommand_20", "pathItemPath": "paths" }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::InvalidFields { .. }));

        // bad state
        let err = registry
            .unmarshall(json!({
                "type": "DeletePathCommand_20",
                "state": "halfway",
                "pathItemPath": "/paths/~1pets"
            }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::InvalidFields { .. }));
    }

    #[test]
    fn test_rejects_misspelled_type_descriptor() {
        let registry = CommandRegistry::with_defaults();
        let plain = |new_type: Value| {
            json!({
                "type": "ChangePropertyTypeCommand_20",
                "propPath": "/definitions/Pet/properties/id",
                "propName": "id",
                "newType": new_type
            })
        };

        assert!(registry
            .unmarshall(plain(json!({ "type": "string", "as": "uuid", "required": true })))
            .is_ok());

        let err = registry
            .unmarshall(plain(json!({ "type": "string", "fromat": "uuid", "requierd": true })))
            .unwrap_err();
        assert!(
            matches!(err, MarshallError::InvalidFields { ref type_tag, .. } if type_tag == "ChangePropertyTypeCommand_20")
        );

        let err = registry
            .unmarshall(plain(json!({ "type": "array", "of": { "type": "string", "fromat": "uuid" } })))
            .unwrap_err();
        assert!(matches!(err, MarshallError::InvalidFields { .. }));
    }

    #[test]
    fn test_empty_registry_knows_nothing() {
        let err = CommandRegistry::new()
            .unmarshall(json!({ "type": "DeletePathCommand_20", "pathItemPath": "/paths/~1a" }))
            .unwrap_err();
        assert!(matches!(err, MarshallError::UnknownType(_)));
    }

    #[test]
    fn test_typed_unmarshall_checks_kind() {
        let plain = json!({ "type": "DeletePathCommand_30", "pathItemPath": "/paths/~1pets" });

        let cmd = DialectCommand::<DeletePath>::unmarshall(plain.clone()).unwrap();
        assert_eq!(cmd.dialect(), Dialect::V3_0);
        assert_eq!(cmd.state(), CommandState::Unexecuted);

        let err = DialectCommand::<NewResponse>::unmarshall(plain).unwrap_err();
        assert!(matches!(err, MarshallError::TypeMismatch { .. }));
    }

    #[test]
    fn test_unmarshall_all() {
        let registry = CommandRegistry::with_defaults();
        let list = json!([
            { "type": "DeletePathCommand_20", "pathItemPath": "/paths/~1a" },
            { "type": "DeletePathCommand_20", "pathItemPath": "/paths/~1b" }
        ]);
        assert_eq!(registry.unmarshall_all(list).unwrap().len(), 2);

        let bad = json!([
            { "type": "DeletePathCommand_20", "pathItemPath": "/paths/~1a" },
            { "type": "Nope_20" }
        ]);
        assert!(registry.unmarshall_all(bad).is_err());
    }
}
