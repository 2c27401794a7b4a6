//! Positional diff of ordered parameter lists.
//!
//! Position has meaning in a parameter list, so this matcher distinguishes
//! pure reordering from identity changes. For each `from` position the best
//! name match and the best type match in the `to` list are found
//! independently; classification precedence:
//!
//! 1. name and type both match at the same position: unchanged
//! 2. name matches at this position: type changed
//! 3. type matches at this position: name changed
//! 4. name matches at another position: reordered (renamed if the name at
//!    the destination differs)
//! 5. type matches at another position: reordered
//! 6. neither matches: removed
//!
//! Both searches return the first not-yet-consumed occurrence, so duplicate
//! names or types resolve deterministically left to right. Any `to`
//! parameter never consumed by a match is reported added, in order.

use crate::report::{MessageKey, Report};
use crate::tree::{Param, SourcePos};

/// Diffs two ordered parameter lists, emitting parameter-level events.
///
/// `from_anchor` and `to_anchor` are the positions of the owning
/// declarations, used as context anchors for additions and removals.
pub fn compare_sequences(
    from: &[Param],
    from_anchor: SourcePos,
    to: &[Param],
    to_anchor: SourcePos,
    report: &mut Report,
) {
    if from.is_empty() {
        mark_all_added(from_anchor, to, report);
        return;
    }
    if to.is_empty() {
        mark_all_removed(from, to_anchor, report);
        return;
    }

    let mut consumed = vec![false; to.len()];

    for (idx, from_param) in from.iter().enumerate() {
        let name_match = find_by_name(from_param, to, &consumed);
        let type_match = find_by_type(from_param, to, &consumed);

        match (name_match, type_match) {
            (Some(n), Some(t)) if n == idx && t == idx => {
                consumed[idx] = true;
            }
            (Some(n), _) if n == idx => {
                report.changed(
                    from_param.pos,
                    to[idx].pos,
                    MessageKey::ParameterTypeChanged,
                    vec![
                        from_param.type_name.as_str().into(),
                        to[idx].type_name.as_str().into(),
                    ],
                );
                consumed[idx] = true;
            }
            (_, Some(t)) if t == idx => {
                report.changed(
                    from_param.pos,
                    to[idx].pos,
                    MessageKey::ParameterNameChanged,
                    vec![from_param.name().into(), to[idx].name().into()],
                );
                consumed[idx] = true;
            }
            (Some(n), _) => {
                if to[n].name() == from_param.name() {
                    report.changed(
                        from_param.pos,
                        to[n].pos,
                        MessageKey::ParameterReordered,
                        vec![from_param.name().into(), idx.into(), n.into()],
                    );
                } else {
                    report.changed(
                        from_param.pos,
                        to[n].pos,
                        MessageKey::ParameterReorderedAndRenamed,
                        vec![
                            from_param.name().into(),
                            idx.into(),
                            n.into(),
                            to[n].name().into(),
                        ],
                    );
                }
                consumed[n] = true;
            }
            (None, Some(t)) => {
                report.changed(
                    from_param.pos,
                    to[t].pos,
                    MessageKey::ParameterReordered,
                    vec![from_param.name().into(), idx.into(), t.into()],
                );
                consumed[t] = true;
            }
            (None, None) => {
                report.removed(
                    from_param.pos,
                    to_anchor,
                    MessageKey::ParameterRemoved,
                    vec![from_param.name().into()],
                );
            }
        }
    }

    for (idx, to_param) in to.iter().enumerate() {
        if !consumed[idx] {
            report.added(
                from_anchor,
                to_param.pos,
                MessageKey::ParameterAdded,
                vec![to_param.name().into()],
            );
        }
    }
}

fn mark_all_added(from_anchor: SourcePos, to: &[Param], report: &mut Report) {
    for param in to {
        report.added(
            from_anchor,
            param.pos,
            MessageKey::ParameterAdded,
            vec![param.name().into()],
        );
    }
}

fn mark_all_removed(from: &[Param], to_anchor: SourcePos, report: &mut Report) {
    for param in from {
        report.removed(
            param.pos,
            to_anchor,
            MessageKey::ParameterRemoved,
            vec![param.name().into()],
        );
    }
}

/// First not-yet-consumed `to` index whose name equals `param`'s name.
fn find_by_name(param: &Param, to: &[Param], consumed: &[bool]) -> Option<usize> {
    to.iter()
        .enumerate()
        .find(|(idx, candidate)| !consumed[*idx] && candidate.name() == param.name())
        .map(|(idx, _)| idx)
}

/// First not-yet-consumed `to` index whose declared type equals `param`'s.
fn find_by_type(param: &Param, to: &[Param], consumed: &[bool]) -> Option<usize> {
    to.iter()
        .enumerate()
        .find(|(idx, candidate)| !consumed[*idx] && candidate.type_name == param.type_name)
        .map(|(idx, _)| idx)
}
