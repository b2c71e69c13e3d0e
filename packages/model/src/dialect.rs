//! Document dialects.
//!
//! An API description is either a Swagger 2.0 document (`"swagger": "2.0"`)
//! or an OpenAPI 3.x document (`"openapi": "3.0.3"` etc). The two share most
//! of their shape but differ in where reusable schemas live and how they are
//! referenced, so edits that touch those areas need a dialect-specific variant.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "2.0")]
    V2_0,
    #[serde(rename = "3.0")]
    V3_0,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::V2_0, Dialect::V3_0];

    /// Read the dialect from a document root.
    pub fn detect(root: &Value) -> ModelResult<Self> {
        let obj = root.as_object().ok_or(ModelError::RootNotObject)?;

        if let Some(version) = obj.get("swagger") {
            return match version.as_str() {
                Some("2.0") => Ok(Dialect::V2_0),
                _ => Err(ModelError::UnknownDialect(format!("swagger {}", version))),
            };
        }

        if let Some(version) = obj.get("openapi") {
            return match version.as_str() {
                Some(v) if v.starts_with("3.") => Ok(Dialect::V3_0),
                _ => Err(ModelError::UnknownDialect(format!("openapi {}", version))),
            };
        }

        Err(ModelError::UnknownDialect(
            "missing \"swagger\" or \"openapi\" version field".to_string(),
        ))
    }

    /// Short suffix used in command type tags (`20` / `30`).
    pub fn suffix(&self) -> &'static str {
        match self {
            Dialect::V2_0 => "20",
            Dialect::V3_0 => "30",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.suffix() == suffix)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::V2_0 => f.write_str("2.0"),
            Dialect::V3_0 => f.write_str("3.0"),
        }
    }
}
