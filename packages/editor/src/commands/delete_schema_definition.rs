//! Delete a named schema definition.
//!
//! Where definitions live is dialect-specific: `#/definitions` for 2.0 and
//! `#/components/schemas` for 3.x.

use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use oasedit_model::{insert_entry_at, read_node, remove_entry, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type DeleteSchemaDefinitionCommand = DialectCommand<DeleteSchemaDefinition>;

pub fn create_delete_schema_definition_command(
    doc: &OasDocument,
    definition_name: impl Into<String>,
) -> DeleteSchemaDefinitionCommand {
    DialectCommand::new(
        doc.dialect(),
        DeleteSchemaDefinition {
            definition_name: definition_name.into(),
            old_index: None,
            old_definition: None,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteSchemaDefinition {
    definition_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_definition: Option<Value>,
}

impl Mutation for DeleteSchemaDefinition {
    const KIND: &'static str = "DeleteSchemaDefinitionCommand";

    fn execute(&mut self, doc: &mut OasDocument, api: &dyn DialectApi) -> Outcome {
        self.old_index = None;
        self.old_definition = None;

        let definitions_path = api.definitions_path();
        let Some(Value::Object(definitions)) = doc.resolve_mut(&definitions_path) else {
            return Outcome::unresolved(&definitions_path);
        };
        let Some((index, old)) = remove_entry(definitions, &self.definition_name) else {
            return Outcome::unresolved(&definitions_path.child(self.definition_name.as_str()));
        };

        self.old_index = Some(index);
        self.old_definition = Some(old);
        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, api: &dyn DialectApi) -> Outcome {
        let (Some(index), Some(old)) = (self.old_index, &self.old_definition) else {
            return Outcome::Unchanged;
        };
        let Some(definitions) = api.ensure_definitions(doc.value_mut()) else {
            return Outcome::unresolved(&api.definitions_path());
        };

        insert_entry_at(definitions, index, &self.definition_name, read_node(old));
        Outcome::Applied
    }
}
