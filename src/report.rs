//! Change events and the report sink.
//!
//! The diff engine emits discrete [`ChangeEvent`]s into a [`Report`]. An event
//! is an immutable fact: a severity, the scope path of containing
//! declarations, two source-position anchors, a stable message key, and the
//! ordered substitution arguments for that key's template. The engine never
//! formats final text; rendering lives in the output module.

use crate::tree::SourcePos;
use std::fmt;

/// How a change is classified at the level it was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Present only in the newer version.
    Added,
    /// Present only in the older version.
    Removed,
    /// Present in both versions with a meaningful difference.
    Changed,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Added => "added",
            Severity::Removed => "removed",
            Severity::Changed => "changed",
        }
    }
}

/// Stable identifier for a change message, decoupled from its wording so a
/// renderer can localize or reformat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    TypeAdded,
    TypeRemoved,
    InnerTypeAdded,
    InnerTypeRemoved,
    MethodAdded,
    MethodRemoved,
    ConstructorAdded,
    ConstructorRemoved,
    FieldAdded,
    FieldRemoved,
    ModifierAdded,
    ModifierRemoved,
    ReturnTypeChanged,
    FieldTypeChanged,
    ParameterAdded,
    ParameterRemoved,
    ParameterReordered,
    ParameterTypeChanged,
    ParameterNameChanged,
    ParameterReorderedAndRenamed,
}

impl MessageKey {
    /// Stable key string, suitable for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            MessageKey::TypeAdded => "TYPE_DECLARATION_ADDED",
            MessageKey::TypeRemoved => "TYPE_DECLARATION_REMOVED",
            MessageKey::InnerTypeAdded => "INNER_TYPE_ADDED",
            MessageKey::InnerTypeRemoved => "INNER_TYPE_REMOVED",
            MessageKey::MethodAdded => "METHOD_ADDED",
            MessageKey::MethodRemoved => "METHOD_REMOVED",
            MessageKey::ConstructorAdded => "CONSTRUCTOR_ADDED",
            MessageKey::ConstructorRemoved => "CONSTRUCTOR_REMOVED",
            MessageKey::FieldAdded => "FIELD_ADDED",
            MessageKey::FieldRemoved => "FIELD_REMOVED",
            MessageKey::ModifierAdded => "MODIFIER_ADDED",
            MessageKey::ModifierRemoved => "MODIFIER_REMOVED",
            MessageKey::ReturnTypeChanged => "RETURN_TYPE_CHANGED",
            MessageKey::FieldTypeChanged => "FIELD_TYPE_CHANGED",
            MessageKey::ParameterAdded => "PARAMETER_ADDED",
            MessageKey::ParameterRemoved => "PARAMETER_REMOVED",
            MessageKey::ParameterReordered => "PARAMETER_REORDERED",
            MessageKey::ParameterTypeChanged => "PARAMETER_TYPE_CHANGED",
            MessageKey::ParameterNameChanged => "PARAMETER_NAME_CHANGED",
            MessageKey::ParameterReorderedAndRenamed => "PARAMETER_REORDERED_AND_RENAMED",
        }
    }

    /// Message template with `{n}` substitution placeholders.
    pub fn template(&self) -> &'static str {
        match self {
            MessageKey::TypeAdded => "type declaration added: {0}",
            MessageKey::TypeRemoved => "type declaration removed: {0}",
            MessageKey::InnerTypeAdded => "inner type added: {0}",
            MessageKey::InnerTypeRemoved => "inner type removed: {0}",
            MessageKey::MethodAdded => "method added: {0}",
            MessageKey::MethodRemoved => "method removed: {0}",
            MessageKey::ConstructorAdded => "constructor added: {0}",
            MessageKey::ConstructorRemoved => "constructor removed: {0}",
            MessageKey::FieldAdded => "field added: {0}",
            MessageKey::FieldRemoved => "field removed: {0}",
            MessageKey::ModifierAdded => "modifier added: {0}",
            MessageKey::ModifierRemoved => "modifier removed: {0}",
            MessageKey::ReturnTypeChanged => "return type changed from {0} to {1}",
            MessageKey::FieldTypeChanged => "field type changed from {0} to {1}",
            MessageKey::ParameterAdded => "parameter added: {0}",
            MessageKey::ParameterRemoved => "parameter removed: {0}",
            MessageKey::ParameterReordered => {
                "parameter {0} reordered from argument {1} to {2}"
            }
            MessageKey::ParameterTypeChanged => "parameter type changed from {0} to {1}",
            MessageKey::ParameterNameChanged => "parameter name changed from {0} to {1}",
            MessageKey::ParameterReorderedAndRenamed => {
                "parameter {0} reordered from argument {1} to {2} and renamed {3}"
            }
        }
    }

    /// Renders the template with the given arguments substituted.
    pub fn render(&self, args: &[Arg]) -> String {
        let mut text = self.template().to_string();
        for (idx, arg) in args.iter().enumerate() {
            text = text.replace(&format!("{{{}}}", idx), &arg.to_string());
        }
        text
    }
}

/// A message substitution argument: text or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Text(String),
    Index(usize),
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(s) => f.write_str(s),
            Arg::Index(i) => write!(f, "{}", i),
        }
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<usize> for Arg {
    fn from(i: usize) -> Self {
        Arg::Index(i)
    }
}

/// A single reported difference between the two document versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub severity: Severity,
    /// Names of the declarations enclosing the change, outermost first.
    pub path: Vec<String>,
    /// Anchor in the older version.
    pub anchor_from: SourcePos,
    /// Anchor in the newer version.
    pub anchor_to: SourcePos,
    pub key: MessageKey,
    pub args: Vec<Arg>,
}

impl ChangeEvent {
    pub fn message(&self) -> String {
        self.key.render(&self.args)
    }
}

/// Per-severity event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl ReportStats {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Collects change events from one diff run, stamping each with the scope
/// path maintained by the traversal.
#[derive(Debug, Default)]
pub struct Report {
    events: Vec<ChangeEvent>,
    scope: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a named scope; subsequent events carry it in their path.
    pub fn push_scope(&mut self, name: impl Into<String>) {
        self.scope.push(name.into());
    }

    pub fn pop_scope(&mut self) {
        self.scope.pop();
    }

    pub fn added(&mut self, from: SourcePos, to: SourcePos, key: MessageKey, args: Vec<Arg>) {
        self.push(Severity::Added, from, to, key, args);
    }

    pub fn removed(&mut self, from: SourcePos, to: SourcePos, key: MessageKey, args: Vec<Arg>) {
        self.push(Severity::Removed, from, to, key, args);
    }

    pub fn changed(&mut self, from: SourcePos, to: SourcePos, key: MessageKey, args: Vec<Arg>) {
        self.push(Severity::Changed, from, to, key, args);
    }

    fn push(
        &mut self,
        severity: Severity,
        anchor_from: SourcePos,
        anchor_to: SourcePos,
        key: MessageKey,
        args: Vec<Arg>,
    ) {
        self.events.push(ChangeEvent {
            severity,
            path: self.scope.clone(),
            anchor_from,
            anchor_to,
            key,
            args,
        });
    }

    pub fn events(&self) -> &[ChangeEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ChangeEvent> {
        self.events
    }

    /// Rebuilds a report from an already-stamped event list (used by
    /// filtering).
    pub fn from_events(events: Vec<ChangeEvent>) -> Self {
        Self {
            events,
            scope: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn stats(&self) -> ReportStats {
        let mut stats = ReportStats::default();
        for event in &self.events {
            match event.severity {
                Severity::Added => stats.added += 1,
                Severity::Removed => stats.removed += 1,
                Severity::Changed => stats.changed += 1,
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_arg() {
        let msg = MessageKey::MethodAdded.render(&["find(int)".into()]);
        assert_eq!(msg, "method added: find(int)");
    }

    #[test]
    fn test_render_reorder_args() {
        let msg = MessageKey::ParameterReordered.render(&["id".into(), 0.into(), 2.into()]);
        assert_eq!(msg, "parameter id reordered from argument 0 to 2");
    }

    #[test]
    fn test_render_reorder_and_rename() {
        let msg = MessageKey::ParameterReorderedAndRenamed
            .render(&["id".into(), 1.into(), 0.into(), "key".into()]);
        assert_eq!(msg, "parameter id reordered from argument 1 to 0 and renamed key");
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(MessageKey::ParameterReordered.code(), "PARAMETER_REORDERED");
        assert_eq!(MessageKey::TypeRemoved.code(), "TYPE_DECLARATION_REMOVED");
    }

    #[test]
    fn test_scope_stamping() {
        let mut report = Report::new();
        report.push_scope("Outer");
        report.push_scope("find(int)");
        report.changed(
            SourcePos::new(1, 1),
            SourcePos::new(2, 2),
            MessageKey::ParameterNameChanged,
            vec!["a".into(), "b".into()],
        );
        report.pop_scope();
        report.removed(
            SourcePos::new(5, 1),
            SourcePos::new(1, 1),
            MessageKey::FieldRemoved,
            vec!["count".into()],
        );
        report.pop_scope();

        let events = report.events();
        assert_eq!(events[0].path, vec!["Outer", "find(int)"]);
        assert_eq!(events[1].path, vec!["Outer"]);
    }

    #[test]
    fn test_stats_counts() {
        let mut report = Report::new();
        let pos = SourcePos::default();
        report.added(pos, pos, MessageKey::MethodAdded, vec!["a()".into()]);
        report.added(pos, pos, MessageKey::FieldAdded, vec!["f".into()]);
        report.removed(pos, pos, MessageKey::MethodRemoved, vec!["b()".into()]);
        report.changed(
            pos,
            pos,
            MessageKey::FieldTypeChanged,
            vec!["int".into(), "long".into()],
        );

        let stats = report.stats();
        assert_eq!(stats.added, 2);
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.changed, 1);
        assert_eq!(stats.total(), 4);
        assert!(!stats.is_empty());
        assert!(ReportStats::default().is_empty());
    }
}
