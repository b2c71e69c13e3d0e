//! # Undo/Redo Stack
//!
//! Tracks command history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Commands capture their own pre-state on execute, so undo is just
//!   `Command::undo` in reverse order
//! - Redo re-executes the same command instances
//! - New commands clear the redo stack
//! - Commands whose target did not resolve are not recorded
//! - Supports batched operations (group multiple commands as one undo step)
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//! let mut doc = oasedit_model::parse(source)?;
//!
//! let command = create_delete_path_command(&doc, "/pets");
//! stack.apply(command.boxed(), &mut doc);
//!
//! stack.undo(&mut doc);
//! stack.redo(&mut doc);
//! ```

use crate::observer::{CommandObserver, Outcome, TracingObserver};
use crate::Command;
use oasedit_model::OasDocument;
use std::fmt;

/// A group of commands that should be undone/redone together
#[derive(Debug)]
pub struct CommandBatch {
    /// The commands in this batch (in application order)
    pub commands: Vec<Box<dyn Command>>,

    /// Optional description of this batch
    pub description: Option<String>,

    /// Outcome of each command on the last undo or redo, in `commands` order
    pub outcomes: Vec<Outcome>,
}

impl CommandBatch {
    /// Create a single-command batch
    pub fn single(command: Box<dyn Command>) -> Self {
        Self {
            commands: vec![command],
            description: None,
            outcomes: Vec::new(),
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Commands whose last undo or redo found its target, in `commands` order
    pub fn resolved_commands(&self) -> impl DoubleEndedIterator<Item = &dyn Command> + '_ {
        self.commands
            .iter()
            .zip(&self.outcomes)
            .filter(|(_, outcome)| outcome.is_resolved())
            .map(|(command, _)| command.as_ref())
    }

    /// Whether the last undo or redo changed anything
    pub fn any_resolved(&self) -> bool {
        self.outcomes.iter().any(Outcome::is_resolved)
    }
}

/// Undo/redo stack for document editing
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<CommandBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<CommandBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<CommandBatch>,

    observer: Box<dyn CommandObserver>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
            observer: Box::new(TracingObserver),
        }
    }

    /// Replace the observer notified on every execute/undo
    pub fn with_observer(mut self, observer: impl CommandObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Execute a command and record it for undo
    pub fn apply(&mut self, mut command: Box<dyn Command>, doc: &mut OasDocument) -> Outcome {
        let outcome = command.execute_with(doc, self.observer.as_ref());
        if outcome.is_resolved() {
            self.record(command);
        }
        outcome
    }

    /// Record an already-executed command
    pub fn record(&mut self, command: Box<dyn Command>) {
        if let Some(batch) = &mut self.current_batch {
            batch.commands.push(command);
        } else {
            self.push_batch(CommandBatch::single(command));
        }
    }

    /// Start a batch of commands (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(CommandBatch {
            commands: Vec::new(),
            description: None,
            outcomes: Vec::new(),
        });
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.commands.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    /// Push a batch to the undo stack
    fn push_batch(&mut self, batch: CommandBatch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent batch, returning it with its outcomes filled in
    pub fn undo(&mut self, doc: &mut OasDocument) -> Option<&CommandBatch> {
        let mut batch = self.undo_stack.pop()?;

        let mut outcomes: Vec<Outcome> = batch
            .commands
            .iter_mut()
            .rev()
            .map(|command| command.undo_with(doc, self.observer.as_ref()))
            .collect();
        outcomes.reverse();
        batch.outcomes = outcomes;

        self.redo_stack.push(batch);
        self.redo_stack.last()
    }

    /// Redo the most recently undone batch, returning it with its outcomes filled in
    pub fn redo(&mut self, doc: &mut OasDocument) -> Option<&CommandBatch> {
        let mut batch = self.redo_stack.pop()?;

        batch.outcomes = batch
            .commands
            .iter_mut()
            .map(|command| command.execute_with(doc, self.observer.as_ref()))
            .collect();

        self.undo_stack.push(batch);
        self.undo_stack.last()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UndoStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UndoStack")
            .field("undo_stack", &self.undo_stack)
            .field("redo_stack", &self.redo_stack)
            .field("max_levels", &self.max_levels)
            .field("current_batch", &self.current_batch)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{create_change_contact_command, create_delete_path_command};
    use crate::observer::NoopObserver;
    use oasedit_model::parse;

    const SOURCE: &str = r#"{
        "swagger": "2.0",
        "info": { "title": "Test", "version": "1" },
        "paths": { "/a": {}, "/b": {}, "/c": {} }
    }"#;

    fn contact(doc: &OasDocument, name: &str) -> Box<dyn Command> {
        create_change_contact_command(doc, name, "x@example.com", "urn:x").boxed()
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_undo_redo() {
        let mut doc = parse(SOURCE).unwrap();
        let before = doc.clone();
        let mut stack = UndoStack::new().with_observer(NoopObserver);

        let command = contact(&doc, "World");
        assert!(stack.apply(command, &mut doc).is_applied());
        assert_eq!(doc.value()["info"]["contact"]["name"], "World");
        assert_eq!(stack.undo_levels(), 1);

        assert!(stack.undo(&mut doc).is_some());
        assert_eq!(doc, before);
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 1);

        assert!(stack.redo(&mut doc).is_some());
        assert_eq!(doc.value()["info"]["contact"]["name"], "World");
        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_unresolved_command_not_recorded() {
        let mut doc = parse(SOURCE).unwrap();
        let mut stack = UndoStack::new().with_observer(NoopObserver);

        let command = create_delete_path_command(&doc, "/missing").boxed();
        let outcome = stack.apply(command, &mut doc);

        assert!(!outcome.is_resolved());
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_batched_commands() {
        let mut doc = parse(SOURCE).unwrap();
        let before = doc.clone();
        let mut stack = UndoStack::new().with_observer(NoopObserver);

        stack.begin_batch();
        stack.set_batch_description("Trim paths");
        for path in ["/a", "/b"] {
            let command = create_delete_path_command(&doc, path).boxed();
            stack.apply(command, &mut doc);
        }
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Trim paths"));
        assert_eq!(doc.value()["paths"].as_object().unwrap().len(), 1);

        let batch = stack.undo(&mut doc).unwrap();
        assert_eq!(batch.commands.len(), 2);
        assert_eq!(doc.to_json().unwrap(), before.to_json().unwrap());
        assert_eq!(stack.redo_description(), Some("Trim paths"));
    }

    #[test]
    fn test_undo_reports_missed_commands() {
        let mut doc = parse(SOURCE).unwrap();
        let mut stack = UndoStack::new().with_observer(NoopObserver);

        stack.begin_batch();
        for path in ["/a", "/b"] {
            let command = create_delete_path_command(&doc, path).boxed();
            stack.apply(command, &mut doc);
        }
        stack.end_batch();

        // someone else drops the whole paths object
        doc.value_mut()
            .as_object_mut()
            .unwrap()
            .remove("paths");

        let batch = stack.undo(&mut doc).unwrap();
        assert_eq!(batch.outcomes.len(), 2);
        assert!(batch.outcomes.iter().all(|outcome| !outcome.is_resolved()));
        assert!(!batch.any_resolved());
        assert_eq!(batch.resolved_commands().count(), 0);
    }

    #[test]
    fn test_undo_outcomes_follow_command_order() {
        let mut doc = parse(SOURCE).unwrap();
        let mut stack = UndoStack::new().with_observer(NoopObserver);

        stack.begin_batch();
        let first = contact(&doc, "World");
        stack.apply(first, &mut doc);
        let second = create_delete_path_command(&doc, "/a").boxed();
        stack.apply(second, &mut doc);
        stack.end_batch();

        // restoring /a now has nowhere to go
        doc.value_mut()
            .as_object_mut()
            .unwrap()
            .remove("paths");

        let batch = stack.undo(&mut doc).unwrap();
        assert!(batch.outcomes[0].is_resolved());
        assert!(!batch.outcomes[1].is_resolved());

        let kinds: Vec<_> = batch.resolved_commands().map(|command| command.kind()).collect();
        assert_eq!(kinds, vec!["ChangeContactCommand"]);
    }

    #[test]
    fn test_empty_batch_not_recorded() {
        let mut stack = UndoStack::new();
        stack.begin_batch();
        stack.end_batch();
        assert!(!stack.can_undo());
    }

    #[test]
    fn test_new_command_clears_redo() {
        let mut doc = parse(SOURCE).unwrap();
        let mut stack = UndoStack::new().with_observer(NoopObserver);

        stack.apply(contact(&doc, "World"), &mut doc);
        stack.undo(&mut doc);
        assert_eq!(stack.redo_levels(), 1);

        stack.apply(contact(&doc, "Everyone"), &mut doc);
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut doc = parse(SOURCE).unwrap();
        let mut stack = UndoStack::with_max_levels(2).with_observer(NoopObserver);

        for i in 0..3 {
            stack.apply(contact(&doc, &format!("Name {}", i)), &mut doc);
        }

        assert_eq!(stack.undo_levels(), 2);
    }
}
