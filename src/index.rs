//! Name-keyed diff of uniquely-named declarations.
//!
//! Top-level types within a compilation unit carry unique names, so they are
//! paired by name lookup instead of score-based matching. The union of names
//! from both sides is walked in lexicographic order: one-sided names are
//! reported added or removed, and names present on both sides are handed to
//! the caller for body-level comparison.

use crate::report::{MessageKey, Report};
use crate::tree::{Declaration, SourcePos};
use std::collections::{BTreeMap, BTreeSet};

/// A name-keyed view over one side's declarations.
///
/// Unnamed declarations must never reach this index; they are the set
/// matcher's business.
pub struct DeclIndex<'a> {
    by_name: BTreeMap<&'a str, &'a Declaration>,
}

impl<'a> DeclIndex<'a> {
    pub fn build(decls: &'a [Declaration]) -> Self {
        let mut by_name = BTreeMap::new();
        for decl in decls {
            let name = match decl.name.as_deref() {
                Some(name) => name,
                None => panic!(
                    "unnamed {} at {} cannot be indexed by name",
                    decl.kind.label(),
                    decl.pos
                ),
            };
            by_name.insert(name, decl);
        }
        Self { by_name }
    }

    pub fn get(&self, name: &str) -> Option<&'a Declaration> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Diffs two indexed collections. `from_scope`/`to_scope` anchor
    /// one-sided names in the opposite version's containing scope;
    /// `on_matched` runs once per name present on both sides.
    #[allow(clippy::too_many_arguments)]
    pub fn diff<F>(
        from: &DeclIndex<'a>,
        to: &DeclIndex<'a>,
        from_scope: SourcePos,
        to_scope: SourcePos,
        added_key: MessageKey,
        removed_key: MessageKey,
        report: &mut Report,
        mut on_matched: F,
    ) where
        F: FnMut(&'a Declaration, &'a Declaration, &mut Report),
    {
        let names: BTreeSet<&str> = from
            .by_name
            .keys()
            .chain(to.by_name.keys())
            .copied()
            .collect();

        for name in names {
            match (from.get(name), to.get(name)) {
                (None, Some(added)) => {
                    report.added(from_scope, added.pos, added_key, vec![name.into()]);
                }
                (Some(removed), None) => {
                    report.removed(removed.pos, to_scope, removed_key, vec![name.into()]);
                }
                (Some(a), Some(b)) => on_matched(a, b, report),
                (None, None) => unreachable!("name came from one of the two indexes"),
            }
        }
    }
}
