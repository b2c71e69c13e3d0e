//! Delete a schema property, dropping its name from `required` as well.

use super::{owning_schema, required_position};
use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use oasedit_model::{insert_entry_at, read_node, remove_entry, Node, NodePath, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type DeletePropertyCommand = DialectCommand<DeleteProperty>;

pub fn create_delete_property_command(doc: &OasDocument, property: &Node<'_>) -> DeletePropertyCommand {
    DialectCommand::new(
        doc.dialect(),
        DeleteProperty {
            prop_path: property.path().clone(),
            prop_name: property.name().unwrap_or_default().to_string(),
            old_index: None,
            old_property: None,
            old_required_index: None,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteProperty {
    prop_path: NodePath,
    prop_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_property: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_required_index: Option<usize>,
}

impl Mutation for DeleteProperty {
    const KIND: &'static str = "DeletePropertyCommand";

    fn execute(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        self.old_index = None;
        self.old_property = None;
        self.old_required_index = None;

        let Some(schema_path) = owning_schema(&self.prop_path) else {
            return Outcome::unresolved(&self.prop_path);
        };
        let Some(Value::Object(schema)) = doc.resolve_mut(&schema_path) else {
            return Outcome::unresolved(&schema_path);
        };
        let Some(Value::Object(properties)) = schema.get_mut("properties") else {
            return Outcome::unresolved(&self.prop_path);
        };
        let Some((index, old)) = remove_entry(properties, &self.prop_name) else {
            return Outcome::unresolved(&self.prop_path);
        };

        self.old_index = Some(index);
        self.old_property = Some(old);

        let required_index = required_position(schema.get("required"), &self.prop_name);
        if let (Some(Value::Array(names)), Some(index)) = (schema.get_mut("required"), required_index) {
            names.remove(index);
            self.old_required_index = Some(index);
        }

        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        let (Some(index), Some(old)) = (self.old_index, &self.old_property) else {
            return Outcome::Unchanged;
        };
        let Some(schema_path) = owning_schema(&self.prop_path) else {
            return Outcome::unresolved(&self.prop_path);
        };
        let Some(Value::Object(schema)) = doc.resolve_mut(&schema_path) else {
            return Outcome::unresolved(&schema_path);
        };

        let properties = schema
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        let Some(properties) = properties.as_object_mut() else {
            return Outcome::Unchanged;
        };
        insert_entry_at(properties, index, &self.prop_name, read_node(old));

        if let Some(required_index) = self.old_required_index {
            let names = schema
                .entry("required")
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Some(names) = names.as_array_mut() {
                let at = required_index.min(names.len());
                names.insert(at, Value::String(self.prop_name.clone()));
            }
        }

        Outcome::Applied
    }
}
