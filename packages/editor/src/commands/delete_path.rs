//! Delete a path item (`/paths/{path}`).

use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::{api_for, DialectApi};
use crate::observer::Outcome;
use oasedit_model::{insert_entry_at, read_node, remove_entry, NodePath, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type DeletePathCommand = DialectCommand<DeletePath>;

/// `path` is the path template, e.g. `/pets/{petId}`.
pub fn create_delete_path_command(doc: &OasDocument, path: &str) -> DeletePathCommand {
    let api = api_for(doc.dialect());
    DialectCommand::new(
        doc.dialect(),
        DeletePath {
            path_item_path: api.path_item_path(path),
            old_index: None,
            old_path_item: None,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DeletePath {
    path_item_path: NodePath,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_path_item: Option<Value>,
}

impl Mutation for DeletePath {
    const KIND: &'static str = "DeletePathCommand";

    fn execute(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        self.old_index = None;
        self.old_path_item = None;

        let (Some(paths_path), Some(key)) = (self.path_item_path.parent(), self.path_item_path.last())
        else {
            return Outcome::unresolved(&self.path_item_path);
        };
        let Some(Value::Object(paths)) = doc.resolve_mut(&paths_path) else {
            return Outcome::unresolved(&paths_path);
        };
        let Some((index, old)) = remove_entry(paths, key) else {
            return Outcome::unresolved(&self.path_item_path);
        };

        self.old_index = Some(index);
        self.old_path_item = Some(old);
        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        let (Some(index), Some(old)) = (self.old_index, &self.old_path_item) else {
            return Outcome::Unchanged;
        };
        let (Some(paths_path), Some(key)) = (self.path_item_path.parent(), self.path_item_path.last())
        else {
            return Outcome::unresolved(&self.path_item_path);
        };
        let Some(Value::Object(paths)) = doc.resolve_mut(&paths_path) else {
            return Outcome::unresolved(&paths_path);
        };

        insert_entry_at(paths, index, key, read_node(old));
        Outcome::Applied
    }
}
