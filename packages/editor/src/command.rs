//! # Command contract
//!
//! A [`Command`] is a serializable unit of change with an execute/undo
//! lifecycle:
//!
//! ```text
//! Unexecuted --execute--> Executed --undo--> Unexecuted
//! ```
//!
//! Commands hold only addresses, snapshots and plain parameters. The tree is
//! borrowed for the duration of one call and never retained. A target that no
//! longer resolves turns the call into a silent no-op and leaves the state
//! where it was. Calling `undo` twice without an intervening `execute` is
//! undefined and not guarded against.
//!
//! Every concrete edit is a [`Mutation`]: a serde struct that declares its
//! fields once and implements the algorithm against a [`DialectApi`].
//! [`DialectCommand`] wraps any mutation with the dialect tag chosen at
//! construction, and is the single [`Command`] implementation.

use crate::dialect_api::{api_for, DialectApi};
use crate::marshall::{encode, type_tag, MarshallError};
use crate::observer::{CommandObserver, Outcome, TracingObserver};
use oasedit_model::{Dialect, OasDocument};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandState {
    #[default]
    Unexecuted,
    Executed,
}

/// Object-safe command interface used by undo stacks, sessions and callers.
pub trait Command: fmt::Debug + Send + Sync {
    /// Kind name without dialect suffix, e.g. `NewResponseCommand`.
    fn kind(&self) -> &'static str;

    /// Dialect this command was built for.
    fn dialect(&self) -> Dialect;

    fn state(&self) -> CommandState;

    /// Wire discriminator, e.g. `NewResponseCommand_30`.
    fn type_tag(&self) -> String {
        type_tag(self.kind(), self.dialect())
    }

    fn execute_with(&mut self, doc: &mut OasDocument, observer: &dyn CommandObserver) -> Outcome;

    fn undo_with(&mut self, doc: &mut OasDocument, observer: &dyn CommandObserver) -> Outcome;

    fn execute(&mut self, doc: &mut OasDocument) -> Outcome {
        self.execute_with(doc, &TracingObserver)
    }

    fn undo(&mut self, doc: &mut OasDocument) -> Outcome {
        self.undo_with(doc, &TracingObserver)
    }

    /// Encode into the plain wire form.
    fn marshall(&self) -> Result<Value, MarshallError>;
}

/// One kind of edit: its marshalled field schema plus execute/undo logic.
///
/// `execute` must reset any pre-state it records so that replaying after an
/// undo reproduces the original edit. `undo` must restore from the captured
/// pre-state, never from what it finds in the current tree.
pub trait Mutation:
    Serialize + DeserializeOwned + fmt::Debug + Clone + PartialEq + Send + Sync + 'static
{
    const KIND: &'static str;

    fn execute(&mut self, doc: &mut OasDocument, api: &dyn DialectApi) -> Outcome;

    fn undo(&mut self, doc: &mut OasDocument, api: &dyn DialectApi) -> Outcome;
}

/// The generic command: a mutation plus the dialect it talks to.
#[derive(Debug, Clone, PartialEq)]
pub struct DialectCommand<M> {
    dialect: Dialect,
    state: CommandState,
    mutation: M,
}

impl<M: Mutation> DialectCommand<M> {
    pub fn new(dialect: Dialect, mutation: M) -> Self {
        Self {
            dialect,
            state: CommandState::Unexecuted,
            mutation,
        }
    }

    pub(crate) fn restore(dialect: Dialect, state: CommandState, mutation: M) -> Self {
        Self {
            dialect,
            state,
            mutation,
        }
    }

    pub fn mutation(&self) -> &M {
        &self.mutation
    }

    pub fn boxed(self) -> Box<dyn Command> {
        Box::new(self)
    }
}

impl<M: Mutation> Command for DialectCommand<M> {
    fn kind(&self) -> &'static str {
        M::KIND
    }

    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn state(&self) -> CommandState {
        self.state
    }

    fn execute_with(&mut self, doc: &mut OasDocument, observer: &dyn CommandObserver) -> Outcome {
        let outcome = self.mutation.execute(doc, api_for(self.dialect));
        if outcome.is_resolved() {
            self.state = CommandState::Executed;
        }
        observer.on_executed(&self.type_tag(), &outcome);
        outcome
    }

    fn undo_with(&mut self, doc: &mut OasDocument, observer: &dyn CommandObserver) -> Outcome {
        let outcome = self.mutation.undo(doc, api_for(self.dialect));
        if outcome.is_resolved() {
            self.state = CommandState::Unexecuted;
        }
        observer.on_undone(&self.type_tag(), &outcome);
        outcome
    }

    fn marshall(&self) -> Result<Value, MarshallError> {
        encode(self.dialect, self.state, &self.mutation)
    }
}
