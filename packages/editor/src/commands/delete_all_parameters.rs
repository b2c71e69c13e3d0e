//! Delete every parameter of one location (`query`, `header`, ...) from an
//! operation or path item.

use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use oasedit_model::{read_node, write_node, Node, NodePath, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type DeleteAllParametersCommand = DialectCommand<DeleteAllParameters>;

pub fn create_delete_all_parameters_command(
    doc: &OasDocument,
    parent: &Node<'_>,
    param_type: impl Into<String>,
) -> DeleteAllParametersCommand {
    DialectCommand::new(
        doc.dialect(),
        DeleteAllParameters {
            parent_path: parent.path().clone(),
            param_type: param_type.into(),
            old_params: Vec::new(),
        },
    )
}

/// A parameter removed by execute and where it sat in the list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemovedParameter {
    pub index: usize,
    pub param: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeleteAllParameters {
    parent_path: NodePath,
    param_type: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    old_params: Vec<RemovedParameter>,
}

impl DeleteAllParameters {
    pub fn removed(&self) -> &[RemovedParameter] {
        &self.old_params
    }
}

impl Mutation for DeleteAllParameters {
    const KIND: &'static str = "DeleteAllParametersCommand";

    fn execute(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        self.old_params.clear();

        let Some(Value::Object(parent)) = doc.resolve_mut(&self.parent_path) else {
            return Outcome::unresolved(&self.parent_path);
        };
        let Some(Value::Array(params)) = parent.get_mut("parameters") else {
            return Outcome::Unchanged;
        };

        for (index, param) in params.iter().enumerate() {
            if param.get("in").and_then(Value::as_str) == Some(self.param_type.as_str()) {
                self.old_params.push(RemovedParameter {
                    index,
                    param: write_node(param),
                });
            }
        }

        if self.old_params.is_empty() {
            return Outcome::Unchanged;
        }

        for removed in self.old_params.iter().rev() {
            params.remove(removed.index);
        }

        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        if self.old_params.is_empty() {
            return Outcome::Unchanged;
        }

        let Some(Value::Object(parent)) = doc.resolve_mut(&self.parent_path) else {
            return Outcome::unresolved(&self.parent_path);
        };
        let params = parent
            .entry("parameters")
            .or_insert_with(|| Value::Array(Vec::new()));
        if !params.is_array() {
            *params = Value::Array(Vec::new());
        }
        let Some(params) = params.as_array_mut() else {
            return Outcome::Unchanged;
        };

        // Ascending order puts each parameter back at its original index.
        for removed in &self.old_params {
            let index = removed.index.min(params.len());
            params.insert(index, read_node(&removed.param));
        }

        Outcome::Applied
    }
}
