//! # OpenAPI Editor
//!
//! Command engine for editing API description documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: JSON text → OasDocument + NodePath   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: commands + history                  │
//! │  - Factories capture node addresses         │
//! │  - Execute/undo against a DialectApi        │
//! │  - Marshall to plain values and back        │
//! │  - Undo stack, document handle, session     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ wire: {"type": "Kind_20", "state": ...}     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Addresses, not references**: commands re-resolve their targets on every call
//! 2. **Misses are no-ops**: an unresolvable target leaves the tree untouched
//! 3. **Undo from snapshots**: pre-state is captured on execute, never recomputed
//! 4. **Plain-data commands**: every command marshalls to JSON and back losslessly
//!
//! ## Usage
//!
//! ```rust
//! use oasedit_editor::{create_delete_path_command, Command, CommandRegistry};
//! use oasedit_model::parse;
//!
//! let mut doc = parse(r#"{ "swagger": "2.0", "paths": { "/pets": {} } }"#).unwrap();
//!
//! let mut command = create_delete_path_command(&doc, "/pets");
//! command.execute(&mut doc);
//! assert!(doc.value()["paths"].get("/pets").is_none());
//!
//! // Ship it somewhere else and undo it there
//! let wire = command.marshall().unwrap();
//! let mut restored = CommandRegistry::with_defaults().unmarshall(wire).unwrap();
//! restored.undo(&mut doc);
//! assert!(doc.value()["paths"].get("/pets").is_some());
//! ```

mod command;
mod commands;
mod dialect_api;
mod document;
mod errors;
mod marshall;
mod observer;
mod session;
mod simplified_type;
mod undo_stack;

pub use command::{Command, CommandState, DialectCommand, Mutation};
pub use commands::*;
pub use dialect_api::{api_for, DialectApi, Oas20Api, Oas30Api};
pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use marshall::{parse_type_tag, type_tag, CommandRegistry, MarshallError};
pub use observer::{CommandObserver, NoopObserver, Outcome, TracingObserver};
pub use session::{CommandAction, EditSession, PendingCommand};
pub use simplified_type::{SimplifiedPropertyType, SimplifiedType};
pub use undo_stack::{CommandBatch, UndoStack};

// Re-export common types for convenience
pub use oasedit_model::{Dialect, Node, NodePath, OasDocument};
