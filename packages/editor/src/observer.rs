//! Command outcomes and the observer hook.
//!
//! Commands never log on their own. Every execute/undo reports an
//! [`Outcome`] to a [`CommandObserver`] supplied by the caller; the default
//! [`TracingObserver`] turns those into `tracing` events.

use oasedit_model::NodePath;
use tracing::{debug, info};

/// What a single execute or undo call did to the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The tree was modified.
    Applied,

    /// Targets resolved but there was nothing to change.
    Unchanged,

    /// A target address did not resolve. The tree was left untouched.
    Unresolved { path: NodePath },
}

impl Outcome {
    pub fn unresolved(path: &NodePath) -> Self {
        Outcome::Unresolved { path: path.clone() }
    }

    /// True unless a target was missing.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Outcome::Unresolved { .. })
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Hook notified after every execute and undo.
pub trait CommandObserver: Send + Sync {
    fn on_executed(&self, type_tag: &str, outcome: &Outcome);

    fn on_undone(&self, type_tag: &str, outcome: &Outcome);
}

/// Reports outcomes as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CommandObserver for TracingObserver {
    fn on_executed(&self, type_tag: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Applied => debug!(type_tag = %type_tag, "Command executed"),
            Outcome::Unchanged => debug!(type_tag = %type_tag, "Command executed without changes"),
            Outcome::Unresolved { path } => {
                info!(type_tag = %type_tag, path = %path, "Command target not found, skipped execute")
            }
        }
    }

    fn on_undone(&self, type_tag: &str, outcome: &Outcome) {
        match outcome {
            Outcome::Applied => debug!(type_tag = %type_tag, "Command reverted"),
            Outcome::Unchanged => debug!(type_tag = %type_tag, "Command reverted without changes"),
            Outcome::Unresolved { path } => {
                info!(type_tag = %type_tag, path = %path, "Command target not found, skipped undo")
            }
        }
    }
}

/// Discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CommandObserver for NoopObserver {
    fn on_executed(&self, _type_tag: &str, _outcome: &Outcome) {}

    fn on_undone(&self, _type_tag: &str, _outcome: &Outcome) {}
}
