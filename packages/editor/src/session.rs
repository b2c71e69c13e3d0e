//! # Edit Session Management
//!
//! Tracks editing state for one participant.
//!
//! An EditSession owns a document, its local undo history, and an outbox of
//! marshalled commands waiting to be sent to other participants. Commands
//! arriving from elsewhere are unmarshalled through the session's registry
//! and applied without touching the local history.

use crate::{Command, CommandRegistry, Document, EditorError, Outcome, UndoStack};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};

/// Single edit session
#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    /// Document being edited
    pub document: Document,

    history: UndoStack,
    registry: CommandRegistry,

    /// Marshalled commands waiting for acknowledgment
    outbox: Vec<PendingCommand>,
    sequence: u64,
}

/// What a receiver should do with a pending command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    Execute,
    Undo,
}

/// Command waiting for acknowledgment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCommand {
    /// Unique id, `<session>-<sequence>`
    pub id: String,

    pub action: CommandAction,

    /// The command in marshalled form
    pub command: Value,

    /// When it was created (seconds since the epoch)
    pub timestamp: u64,
}

impl EditSession {
    /// Create new edit session
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            history: UndoStack::new(),
            registry: CommandRegistry::with_defaults(),
            outbox: Vec::new(),
            sequence: 0,
        }
    }

    pub fn with_max_undo_levels(mut self, max_levels: usize) -> Self {
        self.history = UndoStack::with_max_levels(max_levels);
        self
    }

    pub fn with_registry(mut self, registry: CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Execute a command locally, record it for undo and queue it for sending
    ///
    /// A command whose target does not resolve is neither recorded nor queued.
    pub fn apply_local(&mut self, mut command: Box<dyn Command>) -> Result<Outcome, EditorError> {
        let outcome = self.document.execute(command.as_mut());
        if !outcome.is_resolved() {
            return Ok(outcome);
        }

        let marshalled = command.marshall()?;
        self.enqueue(CommandAction::Execute, marshalled);
        self.history.record(command);
        Ok(outcome)
    }

    /// Undo the most recent local batch, queueing each reverted command
    ///
    /// Commands whose undo missed are not queued. The document is only marked
    /// changed when at least one command resolved.
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let Some(batch) = self.history.undo(self.document.tree_for_command()) else {
            return Ok(false);
        };

        let changed = batch.any_resolved();
        let reverted = batch
            .resolved_commands()
            .rev()
            .map(|command| command.marshall())
            .collect::<Result<Vec<_>, _>>()?;

        if changed {
            self.document.mark_changed();
        }
        for command in reverted {
            self.enqueue(CommandAction::Undo, command);
        }
        Ok(true)
    }

    /// Redo the most recently undone local batch
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let Some(batch) = self.history.redo(self.document.tree_for_command()) else {
            return Ok(false);
        };

        let changed = batch.any_resolved();
        let replayed = batch
            .resolved_commands()
            .map(|command| command.marshall())
            .collect::<Result<Vec<_>, _>>()?;

        if changed {
            self.document.mark_changed();
        }
        for command in replayed {
            self.enqueue(CommandAction::Execute, command);
        }
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Execute a command received from another participant
    pub fn apply_remote(&mut self, command: Value) -> Result<Outcome, EditorError> {
        let mut command = self.registry.unmarshall(command)?;
        debug!(session = %self.id, type_tag = %command.type_tag(), "Applying remote command");
        Ok(self.document.execute(command.as_mut()))
    }

    /// Revert a command another participant undid
    ///
    /// `command` must carry the pre-state captured when it was executed.
    pub fn revert_remote(&mut self, command: Value) -> Result<Outcome, EditorError> {
        let mut command = self.registry.unmarshall(command)?;
        debug!(session = %self.id, type_tag = %command.type_tag(), "Reverting remote command");
        Ok(self.document.undo(command.as_mut()))
    }

    /// Apply a pending command from another session's outbox
    pub fn receive(&mut self, pending: PendingCommand) -> Result<Outcome, EditorError> {
        match pending.action {
            CommandAction::Execute => self.apply_remote(pending.command),
            CommandAction::Undo => self.revert_remote(pending.command),
        }
    }

    /// Confirm that a command was accepted
    ///
    /// Removes the command from the outbox.
    pub fn confirm(&mut self, command_id: &str) {
        self.outbox.retain(|pending| pending.id != command_id);
    }

    /// Take every queued command, oldest first
    pub fn drain_outbox(&mut self) -> Vec<PendingCommand> {
        std::mem::take(&mut self.outbox)
    }

    pub fn outbox(&self) -> &[PendingCommand] {
        &self.outbox
    }

    /// Get number of pending commands
    pub fn pending_count(&self) -> usize {
        self.outbox.len()
    }

    fn enqueue(&mut self, action: CommandAction, command: Value) {
        let id = format!("{}-{}", self.id, self.sequence);
        self.sequence += 1;

        info!(session = %self.id, id = %id, action = ?action, "Queued command");
        self.outbox.push(PendingCommand {
            id,
            action,
            command,
            timestamp: current_timestamp(),
        });
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
