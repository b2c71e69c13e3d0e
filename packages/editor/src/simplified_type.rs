//! Simplified schema types.
//!
//! Editors describe the type they want ("array of Pet", "string as uuid")
//! with a small descriptor instead of a raw schema. The descriptor is plain
//! data, independent of any document, and marshals as a nested object.

use crate::dialect_api::DialectApi;
use oasedit_model::remove_entry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema members rewritten when a type changes.
pub const TYPE_FIELDS: [&str; 5] = ["$ref", "type", "enum", "format", "items"];

const PRIMITIVE_TYPES: [&str; 4] = ["string", "number", "integer", "boolean"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimplifiedType {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Element type when `type_` is `array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of: Option<Box<SimplifiedType>>,

    /// Format, e.g. `int64` or `uuid`.
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_: Option<Vec<Value>>,
}

impl SimplifiedType {
    pub fn primitive(type_: impl Into<String>, format: Option<&str>) -> Self {
        Self {
            type_: Some(type_.into()),
            as_: format.map(str::to_string),
            ..Self::default()
        }
    }

    /// A reference, either a full `#/...` pointer or a bare definition name.
    pub fn reference(target: impl Into<String>) -> Self {
        Self {
            type_: Some(target.into()),
            ..Self::default()
        }
    }

    pub fn array_of(element: SimplifiedType) -> Self {
        Self {
            type_: Some("array".to_string()),
            of: Some(Box::new(element)),
            ..Self::default()
        }
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_ = Some(values);
        self
    }

    pub fn is_primitive(&self) -> bool {
        self.type_
            .as_deref()
            .is_some_and(|t| PRIMITIVE_TYPES.contains(&t))
    }

    pub fn is_array(&self) -> bool {
        self.type_.as_deref() == Some("array")
    }

    /// Anything that is neither primitive nor array names a schema.
    pub fn is_ref(&self) -> bool {
        match self.type_.as_deref() {
            Some(t) => !t.is_empty() && !self.is_primitive() && !self.is_array(),
            None => false,
        }
    }

    /// Schema members describing this type.
    pub fn to_schema_fields(&self, api: &dyn DialectApi) -> Map<String, Value> {
        let mut fields = Map::new();

        if let Some(values) = &self.enum_ {
            fields.insert("enum".to_string(), Value::Array(values.clone()));
        }

        match self.type_.as_deref() {
            Some(target) if self.is_ref() => {
                let reference = if target.starts_with("#/") {
                    target.to_string()
                } else {
                    api.schema_ref(target)
                };
                fields.insert("$ref".to_string(), Value::String(reference));
            }
            Some(primitive) if self.is_primitive() => {
                fields.insert("type".to_string(), Value::String(primitive.to_string()));
                if let Some(format) = &self.as_ {
                    fields.insert("format".to_string(), Value::String(format.clone()));
                }
            }
            Some(_) if self.is_array() => {
                fields.insert("type".to_string(), Value::String("array".to_string()));
                let items = match &self.of {
                    Some(element) => element.to_schema_fields(api),
                    None => Map::new(),
                };
                fields.insert("items".to_string(), Value::Object(items));
            }
            _ => {}
        }

        fields
    }

    /// Replace the type members of `schema`, leaving everything else alone.
    pub fn apply_to(&self, schema: &mut Map<String, Value>, api: &dyn DialectApi) {
        for field in TYPE_FIELDS {
            remove_entry(schema, field);
        }
        schema.extend(self.to_schema_fields(api));
    }
}

/// Type of a schema property, including whether it is required.
///
/// Marshals as one flat object: the `SimplifiedType` members plus `required`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PropertyTypeFields", into = "PropertyTypeFields")]
pub struct SimplifiedPropertyType {
    pub simple: SimplifiedType,

    /// `None` leaves the parent's `required` list alone.
    pub required: Option<bool>,
}

/// Wire shape of `SimplifiedPropertyType`. Spelled out member by member so
/// unknown fields are rejected at this level too.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyTypeFields {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    of: Option<Box<SimplifiedType>>,

    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    as_: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    enum_: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    required: Option<bool>,
}

impl From<PropertyTypeFields> for SimplifiedPropertyType {
    fn from(fields: PropertyTypeFields) -> Self {
        Self {
            simple: SimplifiedType {
                type_: fields.type_,
                of: fields.of,
                as_: fields.as_,
                enum_: fields.enum_,
            },
            required: fields.required,
        }
    }
}

impl From<SimplifiedPropertyType> for PropertyTypeFields {
    fn from(ty: SimplifiedPropertyType) -> Self {
        let SimplifiedType {
            type_,
            of,
            as_,
            enum_,
        } = ty.simple;
        Self {
            type_,
            of,
            as_,
            enum_,
            required: ty.required,
        }
    }
}

impl SimplifiedPropertyType {
    pub fn new(simple: SimplifiedType) -> Self {
        Self {
            simple,
            required: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect_api::api_for;
    use oasedit_model::Dialect;
    use serde_json::json;

    fn fields(ty: &SimplifiedType, dialect: Dialect) -> Value {
        Value::Object(ty.to_schema_fields(api_for(dialect)))
    }

    #[test]
    fn test_primitive_with_format() {
        let ty = SimplifiedType::primitive("integer", Some("int64"));
        assert_eq!(
            fields(&ty, Dialect::V2_0),
            json!({ "type": "integer", "format": "int64" })
        );
    }

    #[test]
    fn test_named_ref_follows_dialect() {
        let ty = SimplifiedType::reference("Pet");
        assert_eq!(fields(&ty, Dialect::V2_0), json!({ "$ref": "#/definitions/Pet" }));
        assert_eq!(
            fields(&ty, Dialect::V3_0),
            json!({ "$ref": "#/components/schemas/Pet" })
        );
    }

    #[test]
    fn test_explicit_ref_kept_verbatim() {
        let ty = SimplifiedType::reference("#/definitions/Tag");
        assert_eq!(fields(&ty, Dialect::V3_0), json!({ "$ref": "#/definitions/Tag" }));
    }

    #[test]
    fn test_array_of_refs() {
        let ty = SimplifiedType::array_of(SimplifiedType::reference("Tag"));
        assert_eq!(
            fields(&ty, Dialect::V3_0),
            json!({ "type": "array", "items": { "$ref": "#/components/schemas/Tag" } })
        );
    }

    #[test]
    fn test_enum() {
        let ty = SimplifiedType::primitive("string", None).with_enum(vec![json!("a"), json!("b")]);
        assert_eq!(
            fields(&ty, Dialect::V2_0),
            json!({ "enum": ["a", "b"], "type": "string" })
        );
    }

    #[test]
    fn test_apply_keeps_other_members() {
        let mut schema = json!({
            "description": "The id",
            "$ref": "#/definitions/Old",
            "items": {}
        })
        .as_object()
        .cloned()
        .unwrap();

        SimplifiedType::primitive("string", None).apply_to(&mut schema, api_for(Dialect::V2_0));
        assert_eq!(
            Value::Object(schema),
            json!({ "description": "The id", "type": "string" })
        );
    }

    #[test]
    fn test_property_type_wire_form() {
        let ty = SimplifiedPropertyType::new(SimplifiedType::array_of(SimplifiedType::primitive(
            "string", None,
        )))
        .required(true);

        let plain = serde_json::to_value(&ty).unwrap();
        assert_eq!(
            plain,
            json!({ "type": "array", "of": { "type": "string" }, "required": true })
        );
        assert_eq!(serde_json::from_value::<SimplifiedPropertyType>(plain).unwrap(), ty);
    }

    #[test]
    fn test_unknown_members_rejected() {
        let typo = json!({ "type": "string", "fromat": "uuid" });
        assert!(serde_json::from_value::<SimplifiedPropertyType>(typo).is_err());

        let typo = json!({ "type": "string", "requierd": true });
        assert!(serde_json::from_value::<SimplifiedPropertyType>(typo).is_err());

        let nested = json!({ "type": "array", "of": { "type": "string", "format": "uuid" } });
        assert!(serde_json::from_value::<SimplifiedPropertyType>(nested).is_err());
    }
}
