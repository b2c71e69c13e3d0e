//! Add a response to an operation, optionally copied from an existing one.

use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use oasedit_model::{read_node, remove_entry, write_node, Node, NodePath, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type NewResponseCommand = DialectCommand<NewResponse>;

pub fn create_new_response_command(
    doc: &OasDocument,
    operation: &Node<'_>,
    status_code: impl Into<String>,
    source_response: Option<&Node<'_>>,
) -> NewResponseCommand {
    DialectCommand::new(
        doc.dialect(),
        NewResponse {
            operation_path: operation.path().clone(),
            status_code: status_code.into(),
            source_response: source_response.map(|node| write_node(node.value())),
            created: false,
            null_responses: false,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewResponse {
    operation_path: NodePath,
    status_code: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_response: Option<Value>,
    #[serde(default)]
    created: bool,
    /// The operation had no `responses` container before execute.
    #[serde(default)]
    null_responses: bool,
}

impl Mutation for NewResponse {
    const KIND: &'static str = "NewResponseCommand";

    fn execute(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        self.created = false;
        self.null_responses = false;

        let Some(Value::Object(operation)) = doc.resolve_mut(&self.operation_path) else {
            return Outcome::unresolved(&self.operation_path);
        };

        if !matches!(operation.get("responses"), Some(Value::Object(_))) {
            operation.insert("responses".to_string(), Value::Object(Map::new()));
            self.null_responses = true;
        }
        let Some(Value::Object(responses)) = operation.get_mut("responses") else {
            return Outcome::Unchanged;
        };

        if !responses.contains_key(&self.status_code) {
            let response = match &self.source_response {
                Some(source) => read_node(source),
                None => Value::Object(Map::new()),
            };
            responses.insert(self.status_code.clone(), response);
            self.created = true;
        }

        if self.created || self.null_responses {
            Outcome::Applied
        } else {
            Outcome::Unchanged
        }
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        let Some(Value::Object(operation)) = doc.resolve_mut(&self.operation_path) else {
            return Outcome::unresolved(&self.operation_path);
        };

        if self.null_responses {
            remove_entry(operation, "responses");
            return Outcome::Applied;
        }
        if !self.created {
            return Outcome::Unchanged;
        }

        match operation.get_mut("responses") {
            Some(Value::Object(responses)) => {
                remove_entry(responses, &self.status_code);
                Outcome::Applied
            }
            _ => Outcome::Unchanged,
        }
    }
}
