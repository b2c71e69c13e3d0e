//! Replace a path item with a newer version of itself.

use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use oasedit_model::{read_node, write_node, Node, NodePath, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type ReplacePathItemCommand = DialectCommand<ReplacePathItem>;

/// `replacement` may come from a different document, e.g. one parsed from
/// text the user edited by hand.
pub fn create_replace_path_item_command(
    doc: &OasDocument,
    old: &Node<'_>,
    replacement: &Node<'_>,
) -> ReplacePathItemCommand {
    DialectCommand::new(
        doc.dialect(),
        ReplacePathItem {
            path_item_path: old.path().clone(),
            new_path_item: write_node(replacement.value()),
            old_path_item: None,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ReplacePathItem {
    path_item_path: NodePath,
    new_path_item: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_path_item: Option<Value>,
}

impl Mutation for ReplacePathItem {
    const KIND: &'static str = "ReplacePathItemCommand";

    fn execute(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        self.old_path_item = None;

        let Some(slot) = doc.resolve_mut(&self.path_item_path) else {
            return Outcome::unresolved(&self.path_item_path);
        };

        self.old_path_item = Some(write_node(slot));
        *slot = read_node(&self.new_path_item);
        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        let Some(old) = &self.old_path_item else {
            return Outcome::Unchanged;
        };
        let Some(slot) = doc.resolve_mut(&self.path_item_path) else {
            return Outcome::unresolved(&self.path_item_path);
        };

        *slot = read_node(old);
        Outcome::Applied
    }
}
