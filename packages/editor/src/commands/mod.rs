//! # Document Commands
//!
//! Each module defines one [`Mutation`](crate::Mutation), a type alias for
//! its [`DialectCommand`](crate::DialectCommand), and a `create_*` factory.
//! Factories read the dialect from the document once and capture node
//! addresses eagerly; they are the only way to build a command before it has
//! been executed.

mod change_contact;
mod change_property_type;
mod delete_all_parameters;
mod delete_path;
mod delete_property;
mod delete_schema_definition;
mod new_response;
mod replace_path_item;

pub use change_contact::{create_change_contact_command, ChangeContact, ChangeContactCommand};
pub use change_property_type::{
    create_change_property_type_command, ChangePropertyType, ChangePropertyTypeCommand,
};
pub use delete_all_parameters::{
    create_delete_all_parameters_command, DeleteAllParameters, DeleteAllParametersCommand,
    RemovedParameter,
};
pub use delete_path::{create_delete_path_command, DeletePath, DeletePathCommand};
pub use delete_property::{create_delete_property_command, DeleteProperty, DeletePropertyCommand};
pub use delete_schema_definition::{
    create_delete_schema_definition_command, DeleteSchemaDefinition, DeleteSchemaDefinitionCommand,
};
pub use new_response::{create_new_response_command, NewResponse, NewResponseCommand};
pub use replace_path_item::{
    create_replace_path_item_command, ReplacePathItem, ReplacePathItemCommand,
};

use crate::marshall::CommandRegistry;
use oasedit_model::NodePath;
use serde_json::Value;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    registry
        .register::<ChangeContact>()
        .register::<ChangePropertyType>()
        .register::<DeleteAllParameters>()
        .register::<DeletePath>()
        .register::<DeleteProperty>()
        .register::<DeleteSchemaDefinition>()
        .register::<NewResponse>()
        .register::<ReplacePathItem>();
}

/// Schema owning a property at `.../properties/{name}`.
fn owning_schema(property: &NodePath) -> Option<NodePath> {
    let properties = property.parent()?;
    if properties.last() != Some("properties") {
        return None;
    }
    properties.parent()
}

/// Position of `name` in a `required` name list.
fn required_position(required: Option<&Value>, name: &str) -> Option<usize> {
    required?
        .as_array()?
        .iter()
        .position(|entry| entry.as_str() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owning_schema() {
        let prop = NodePath::parse("/definitions/Pet/properties/petId").unwrap();
        assert_eq!(
            owning_schema(&prop),
            Some(NodePath::parse("/definitions/Pet").unwrap())
        );

        let not_a_prop = NodePath::parse("/definitions/Pet").unwrap();
        assert_eq!(owning_schema(&not_a_prop), None);
    }

    #[test]
    fn test_required_position() {
        let required = json!(["id", "petId"]);
        assert_eq!(required_position(Some(&required), "petId"), Some(1));
        assert_eq!(required_position(Some(&required), "name"), None);
        assert_eq!(required_position(None, "petId"), None);
        assert_eq!(required_position(Some(&json!(null)), "petId"), None);
    }
}
