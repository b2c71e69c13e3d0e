//! Set the API's contact information (`info.contact`).

use crate::command::{DialectCommand, Mutation};
use crate::dialect_api::DialectApi;
use crate::observer::Outcome;
use oasedit_model::{read_node, remove_entry, write_node, NodePath, OasDocument};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ChangeContactCommand = DialectCommand<ChangeContact>;

pub fn create_change_contact_command(
    doc: &OasDocument,
    name: impl Into<String>,
    email: impl Into<String>,
    url: impl Into<String>,
) -> ChangeContactCommand {
    DialectCommand::new(
        doc.dialect(),
        ChangeContact {
            name: name.into(),
            email: email.into(),
            url: url.into(),
            old_contact: None,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangeContact {
    name: String,
    email: String,
    url: String,

    /// `None` after execute means there was no contact to begin with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    old_contact: Option<Value>,
}

fn info_path() -> NodePath {
    NodePath::from_segments(["info"])
}

impl Mutation for ChangeContact {
    const KIND: &'static str = "ChangeContactCommand";

    fn execute(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        self.old_contact = None;

        let info_path = info_path();
        let Some(Value::Object(info)) = doc.resolve_mut(&info_path) else {
            return Outcome::unresolved(&info_path);
        };

        self.old_contact = info.get("contact").map(write_node);

        let contact = info
            .entry("contact")
            .or_insert_with(|| Value::Object(Map::new()));
        if !contact.is_object() {
            *contact = Value::Object(Map::new());
        }
        if let Some(contact) = contact.as_object_mut() {
            contact.insert("name".to_string(), Value::String(self.name.clone()));
            contact.insert("email".to_string(), Value::String(self.email.clone()));
            contact.insert("url".to_string(), Value::String(self.url.clone()));
        }

        Outcome::Applied
    }

    fn undo(&mut self, doc: &mut OasDocument, _api: &dyn DialectApi) -> Outcome {
        let info_path = info_path();
        let Some(Value::Object(info)) = doc.resolve_mut(&info_path) else {
            return Outcome::unresolved(&info_path);
        };

        match &self.old_contact {
            Some(old) => {
                info.insert("contact".to_string(), read_node(old));
            }
            None => {
                remove_entry(info, "contact");
            }
        }
        Outcome::Applied
    }
}
