//! Shared harness for command tests.

use oasedit_editor::{Command, CommandRegistry, CommandState, NoopObserver};
use oasedit_model::OasDocument;
use serde_json::Value;

/// Serialize a tree the way a document would be written back to disk.
pub fn to_text(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap()
}

/// Run the full command lifecycle against a fixture pair.
///
/// 1. build the command from `before` and execute it: the tree must equal `after`
/// 2. marshall to text and unmarshall through the default registry
/// 3. undo with the decoded copy: the tree must equal `before` byte-for-byte
/// 4. execute the decoded copy again: the tree must equal `after` once more
pub fn command_test<F>(before: Value, after: Value, factory: F)
where
    F: FnOnce(&OasDocument) -> Box<dyn Command>,
{
    let mut doc = OasDocument::from_value(before.clone()).unwrap();
    let mut command = factory(&doc);
    assert_eq!(command.state(), CommandState::Unexecuted);

    let outcome = command.execute_with(&mut doc, &NoopObserver);
    assert!(outcome.is_resolved(), "execute did not resolve: {:?}", outcome);
    assert_eq!(command.state(), CommandState::Executed);
    assert_eq!(to_text(doc.value()), to_text(&after), "tree after execute");

    let marshalled = command.marshall().unwrap();
    assert_eq!(marshalled["type"], Value::String(command.type_tag()));
    assert_eq!(marshalled["state"], "executed");

    let text = serde_json::to_string(&marshalled).unwrap();
    let mut decoded = CommandRegistry::with_defaults().unmarshall_str(&text).unwrap();
    assert_eq!(decoded.type_tag(), command.type_tag());
    assert_eq!(decoded.marshall().unwrap(), marshalled, "marshall round-trip");

    let outcome = decoded.undo_with(&mut doc, &NoopObserver);
    assert!(outcome.is_resolved(), "undo did not resolve: {:?}", outcome);
    assert_eq!(decoded.state(), CommandState::Unexecuted);
    assert_eq!(to_text(doc.value()), to_text(&before), "tree after undo");

    decoded.execute_with(&mut doc, &NoopObserver);
    assert_eq!(to_text(doc.value()), to_text(&after), "tree after redo");
}

/// Execute against a tree the target is missing from: nothing may change.
pub fn assert_noop(mut command: Box<dyn Command>, tree: Value) {
    let mut doc = OasDocument::from_value(tree.clone()).unwrap();

    let outcome = command.execute_with(&mut doc, &NoopObserver);
    assert!(!outcome.is_resolved(), "expected a miss, got {:?}", outcome);
    assert_eq!(command.state(), CommandState::Unexecuted);
    assert_eq!(to_text(doc.value()), to_text(&tree));
}
