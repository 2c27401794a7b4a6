//! Top-down traversal pairing declarations between two document versions.
//!
//! Walks two parsed units in lockstep: top-level types pair by unique name,
//! members of a matched type pair through score-based set matching, and the
//! parameter lists of matched methods and constructors go through the
//! positional sequence matcher. Each level reports its own additions,
//! removals, and changes; matched pairs recurse.

use crate::index::DeclIndex;
use crate::matcher::match_sets;
use crate::report::{MessageKey, Report};
use crate::score;
use crate::sequence::compare_sequences;
use crate::tree::{DeclKind, Declaration, Unit};
use std::collections::BTreeSet;

/// Diffs two compilation units into `report`.
///
/// This is the main library entry point. One call processes the whole pair
/// of trees to completion; the report carries the resulting events.
pub fn compare_units(from: &Unit, to: &Unit, report: &mut Report) {
    let from_index = DeclIndex::build(&from.types);
    let to_index = DeclIndex::build(&to.types);

    DeclIndex::diff(
        &from_index,
        &to_index,
        from.pos,
        to.pos,
        MessageKey::TypeAdded,
        MessageKey::TypeRemoved,
        report,
        compare_types,
    );
}

/// Body-level diff of two same-named types.
fn compare_types(from: &Declaration, to: &Declaration, report: &mut Report) {
    report.push_scope(from.simple_name());

    compare_modifiers(from, to, report);

    match_sets(
        &from.members_of_kind(DeclKind::Field),
        &to.members_of_kind(DeclKind::Field),
        from.pos,
        to.pos,
        MessageKey::FieldAdded,
        MessageKey::FieldRemoved,
        score::field_score,
        compare_fields,
        report,
    );

    match_sets(
        &from.members_of_kind(DeclKind::Constructor),
        &to.members_of_kind(DeclKind::Constructor),
        from.pos,
        to.pos,
        MessageKey::ConstructorAdded,
        MessageKey::ConstructorRemoved,
        score::constructor_score,
        compare_executables,
        report,
    );

    match_sets(
        &from.members_of_kind(DeclKind::Method),
        &to.members_of_kind(DeclKind::Method),
        from.pos,
        to.pos,
        MessageKey::MethodAdded,
        MessageKey::MethodRemoved,
        score::method_score,
        compare_methods,
        report,
    );

    match_sets(
        &from.members_of_kind(DeclKind::Type),
        &to.members_of_kind(DeclKind::Type),
        from.pos,
        to.pos,
        MessageKey::InnerTypeAdded,
        MessageKey::InnerTypeRemoved,
        score::type_score,
        compare_types,
        report,
    );

    report.pop_scope();
}

fn compare_methods(from: &Declaration, to: &Declaration, report: &mut Report) {
    report.push_scope(from.display_name());

    compare_modifiers(from, to, report);

    if let (Some(from_type), Some(to_type)) = (&from.type_name, &to.type_name) {
        if from_type != to_type {
            report.changed(
                from.pos,
                to.pos,
                MessageKey::ReturnTypeChanged,
                vec![from_type.as_str().into(), to_type.as_str().into()],
            );
        }
    }

    compare_sequences(&from.parameters, from.pos, &to.parameters, to.pos, report);

    report.pop_scope();
}

/// Deep comparison for constructors: modifiers and parameters, no return
/// type.
fn compare_executables(from: &Declaration, to: &Declaration, report: &mut Report) {
    report.push_scope(from.display_name());
    compare_modifiers(from, to, report);
    compare_sequences(&from.parameters, from.pos, &to.parameters, to.pos, report);
    report.pop_scope();
}

fn compare_fields(from: &Declaration, to: &Declaration, report: &mut Report) {
    report.push_scope(from.simple_name());

    compare_modifiers(from, to, report);

    if let (Some(from_type), Some(to_type)) = (&from.type_name, &to.type_name) {
        if from_type != to_type {
            report.changed(
                from.pos,
                to.pos,
                MessageKey::FieldTypeChanged,
                vec![from_type.as_str().into(), to_type.as_str().into()],
            );
        }
    }

    report.pop_scope();
}

/// Modifier sets are unordered; each one-sided modifier gets its own event.
fn compare_modifiers(from: &Declaration, to: &Declaration, report: &mut Report) {
    let from_mods: BTreeSet<&str> = from.modifiers.iter().map(String::as_str).collect();
    let to_mods: BTreeSet<&str> = to.modifiers.iter().map(String::as_str).collect();

    for gone in from_mods.difference(&to_mods) {
        report.changed(
            from.pos,
            to.pos,
            MessageKey::ModifierRemoved,
            vec![(*gone).into()],
        );
    }
    for fresh in to_mods.difference(&from_mods) {
        report.changed(
            from.pos,
            to.pos,
            MessageKey::ModifierAdded,
            vec![(*fresh).into()],
        );
    }
}
