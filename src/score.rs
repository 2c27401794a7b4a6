//! Per-kind similarity scoring for the set matcher.
//!
//! Scores are in `[0.0, 1.0]`; `0.0` means "not a candidate pair". Name-keyed
//! kinds (types, fields) match only on equal names, so a rename shows up as a
//! removal plus an addition. Parameter-bearing kinds blend name identity with
//! signature similarity so the closest overload wins.

use crate::tree::{Declaration, Param};

/// Types pair on name equality alone; the body diff handles the rest.
pub fn type_score(a: &Declaration, b: &Declaration) -> f64 {
    if a.simple_name() == b.simple_name() {
        1.0
    } else {
        0.0
    }
}

/// Fields pair on name equality; a retyped field still matches and the deep
/// comparison reports the type change.
pub fn field_score(a: &Declaration, b: &Declaration) -> f64 {
    if a.simple_name() == b.simple_name() {
        1.0
    } else {
        0.0
    }
}

/// Methods must share a name; among same-named overloads the closest
/// signature scores highest.
pub fn method_score(a: &Declaration, b: &Declaration) -> f64 {
    if a.simple_name() != b.simple_name() {
        return 0.0;
    }
    0.5 + 0.5 * signature_similarity(&a.parameters, &b.parameters)
}

/// Constructors carry no name, so they pair purely on signature similarity.
/// The 0.5 floor keeps any two constructors candidates for each other.
pub fn constructor_score(a: &Declaration, b: &Declaration) -> f64 {
    0.5 + 0.5 * signature_similarity(&a.parameters, &b.parameters)
}

/// Similarity of two ordered parameter lists in `[0.0, 1.0]`.
///
/// Each `from` parameter earns full credit for a same-position type match,
/// or half credit when its type appears elsewhere in the `to` list (each
/// `to` slot creditable once); the sum is normalized by the longer length.
pub fn signature_similarity(from: &[Param], to: &[Param]) -> f64 {
    if from.is_empty() && to.is_empty() {
        return 1.0;
    }
    if from.is_empty() || to.is_empty() {
        return 0.0;
    }

    let mut credited = vec![false; to.len()];
    let mut credit = 0.0;

    for (idx, param) in from.iter().enumerate() {
        if idx < to.len() && !credited[idx] && to[idx].type_name == param.type_name {
            credited[idx] = true;
            credit += 1.0;
            continue;
        }
        let elsewhere = to
            .iter()
            .enumerate()
            .find(|(j, candidate)| !credited[*j] && candidate.type_name == param.type_name)
            .map(|(j, _)| j);
        if let Some(j) = elsewhere {
            credited[j] = true;
            credit += 0.5;
        }
    }

    credit / from.len().max(to.len()) as f64
}
