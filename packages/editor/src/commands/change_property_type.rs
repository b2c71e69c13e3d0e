//! Change the type of a schema property.
//!
//! Besides rewriting the property's type members this keeps the owning
//! schema's `required` list in sync with the requested required flag. If the
//! list has to be created for that, undo removes the whole list again rather
//! than leaving an empty one behind. A non-list `required` member (e.g. `null`)
//! is replaced in place and put back verbatim on undo.

use super::{owning_schema, required_position};
use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use crate::simplified_type::{SimplifiedPropertyType, TYPE_FIELDS};
use oasedit_model::{read_node, remove_entry, restore_fields, write_node, Node, NodePath, OasDocument};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub type ChangePropertyTypeCommand = DialectCommand<ChangePropertyType>;

pub fn create_change_property_type_command(
    doc: &OasDocument,
    property: &Node<'_>,
    new_type: SimplifiedPropertyType,
) -> ChangePropertyTypeCommand {
    DialectCommand::new(
        doc.dialect(),
        ChangePropertyType {
            prop_path: property.path().clone(),
            prop_name: property.name().unwrap_or_default().to_string(),
            new_type,
            old_property: None,
            old_required: false,
            old_required_index: None,
            null_required: false,
            old_required_value: None,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangePropertyType {
    prop_path: NodePath,
    prop_name: String,
    new_type: SimplifiedPropertyType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_property: Option<Value>,
    #[serde(default)]
    old_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_required_index: Option<usize>,
    /// The `required` list did not exist before execute.
    #[serde(default)]
    null_required: bool,
    /// Non-list `required` member replaced by execute.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    old_required_value: Option<Value>,
}

/// A present field is `Some`, even when it holds `null`.
fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ChangePropertyType {
    pub fn prop_path(&self) -> &NodePath {
        &self.prop_path
    }

    pub fn new_type(&self) -> &SimplifiedPropertyType {
        &self.new_type
    }

    pub fn null_required(&self) -> bool {
        self.null_required
    }

    fn update_required(&mut self, schema: &mut Map<String, Value>, required: bool) {
        if required && !self.old_required {
            if !matches!(schema.get("required"), Some(Value::Array(_))) {
                let replaced = schema.insert("required".to_string(), Value::Array(Vec::new()));
                self.old_required_value = replaced.as_ref().map(write_node);
                self.null_required = true;
            }
            if let Some(Value::Array(names)) = schema.get_mut("required") {
                names.push(Value::String(self.prop_name.clone()));
            }
        }

        if !required && self.old_required {
            if let (Some(Value::Array(names)), Some(index)) =
                (schema.get_mut("required"), self.old_required_index)
            {
                if index < names.len() {
                    names.remove(index);
                }
            }
        }
    }

    fn restore_required(&self, schema: &mut Map<String, Value>, required: bool) {
        if self.null_required {
            match &self.old_required_value {
                Some(old) => {
                    schema.insert("required".to_string(), read_node(old));
                }
                None => {
                    remove_entry(schema, "required");
                }
            }
            return;
        }

        let current = required_position(schema.get("required"), &self.prop_name);
        let Some(Value::Array(names)) = schema.get_mut("required") else {
            return;
        };

        // Reverse exactly what execute did.
        if required && !self.old_required {
            if let Some(index) = current {
                names.remove(index);
            }
        }
        if !required && self.old_required && current.is_none() {
            let index = self.old_required_index.unwrap_or(names.len()).min(names.len());
            names.insert(index, Value::String(self.prop_name.clone()));
        }
    }
}

impl Mutation for ChangePropertyType {
    const KIND: &'static str = "ChangePropertyTypeCommand";

    fn execute(&mut self, doc: &mut OasDocument, api: &dyn DialectApi) -> Outcome {
        self.old_property = None;
        self.old_required = false;
        self.old_required_index = None;
        self.null_required = false;
        self.old_required_value = None;

        let Some(schema_path) = owning_schema(&self.prop_path) else {
            return Outcome::unresolved(&self.prop_path);
        };
        let Some(Value::Object(schema)) = doc.resolve_mut(&schema_path) else {
            return Outcome::unresolved(&schema_path);
        };
        let required_index = required_position(schema.get("required"), &self.prop_name);
        let Some(Value::Object(prop)) = schema
            .get_mut("properties")
            .and_then(|props| props.get_mut(self.prop_name.as_str()))
        else {
            return Outcome::unresolved(&self.prop_path);
        };

        self.old_property = Some(write_node(&Value::Object(prop.clone())));
        self.old_required = required_index.is_some();
        self.old_required_index = required_index;

        self.new_type.simple.apply_to(prop, api);

        if let Some(required) = self.new_type.required {
            self.update_required(schema, required);
        }

        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        let Some(Value::Object(old_prop)) = self.old_property.as_ref().map(read_node) else {
            return Outcome::Unchanged;
        };
        let Some(schema_path) = owning_schema(&self.prop_path) else {
            return Outcome::unresolved(&self.prop_path);
        };
        let Some(Value::Object(schema)) = doc.resolve_mut(&schema_path) else {
            return Outcome::unresolved(&schema_path);
        };
        let Some(Value::Object(prop)) = schema
            .get_mut("properties")
            .and_then(|props| props.get_mut(self.prop_name.as_str()))
        else {
            return Outcome::unresolved(&self.prop_path);
        };

        restore_fields(prop, &old_prop, &TYPE_FIELDS);

        if let Some(required) = self.new_type.required {
            self.restore_required(schema, required);
        }

        Outcome::Applied
    }
}
