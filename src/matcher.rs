//! Greedy best-score matching of unordered declaration collections.
//!
//! Pairs two collections of same-kind declarations (methods, fields, nested
//! types) when membership is unordered and items may be similar without
//! unique names, e.g. overloads. Every candidate pair with a positive score
//! competes in descending score order; the highest-confidence matches are
//! locked in before lower-confidence ones can consume the same items.
//! Unmatched leftovers are reported removed (from side) and added (to side).

use crate::report::{MessageKey, Report};
use crate::tree::{Declaration, SourcePos};

/// A scored candidate pairing of one `from` and one `to` item.
#[derive(Debug, Clone, Copy)]
struct MatchCandidate {
    from: usize,
    to: usize,
    score: f64,
}

/// All positive-score candidate pairs, ordered for consumption: descending
/// score, ties in generation order (first seen wins).
struct ScoreTable {
    candidates: Vec<MatchCandidate>,
}

impl ScoreTable {
    fn build<S>(from: &[&Declaration], to: &[&Declaration], score: S) -> Self
    where
        S: Fn(&Declaration, &Declaration) -> f64,
    {
        let mut candidates = Vec::new();
        for (i, a) in from.iter().enumerate() {
            for (j, b) in to.iter().enumerate() {
                let s = score(a, b);
                assert!(
                    s.is_finite() && s >= 0.0,
                    "score function returned {} for ({}, {}); scores must be finite and >= 0",
                    s,
                    a.display_name(),
                    b.display_name(),
                );
                if s > 0.0 {
                    candidates.push(MatchCandidate {
                        from: i,
                        to: j,
                        score: s,
                    });
                }
            }
        }
        // Stable sort: equal scores keep pairwise generation order.
        candidates.sort_by(|x, y| y.score.total_cmp(&x.score));
        Self { candidates }
    }
}

/// Which items of each side are still unmatched. Scoped to one `match_sets`
/// call.
struct MatchState {
    unmatched_from: Vec<bool>,
    unmatched_to: Vec<bool>,
}

impl MatchState {
    fn new(from_len: usize, to_len: usize) -> Self {
        Self {
            unmatched_from: vec![true; from_len],
            unmatched_to: vec![true; to_len],
        }
    }

    fn both_unmatched(&self, from: usize, to: usize) -> bool {
        self.unmatched_from[from] && self.unmatched_to[to]
    }

    fn take(&mut self, from: usize, to: usize) {
        self.unmatched_from[from] = false;
        self.unmatched_to[to] = false;
    }
}

/// Matches `from` against `to` with the supplied score function, invoking
/// `deep` exactly once per accepted pair, then reporting leftovers.
///
/// `from_scope` and `to_scope` anchor added/removed events in the opposite
/// version's containing declaration. A score of `0.0` means "not a candidate
/// pair"; a negative, infinite, or NaN score is a caller defect and panics.
#[allow(clippy::too_many_arguments)]
pub fn match_sets<'a, S, D>(
    from: &[&'a Declaration],
    to: &[&'a Declaration],
    from_scope: SourcePos,
    to_scope: SourcePos,
    added_key: MessageKey,
    removed_key: MessageKey,
    score: S,
    mut deep: D,
    report: &mut Report,
) where
    S: Fn(&Declaration, &Declaration) -> f64,
    D: FnMut(&'a Declaration, &'a Declaration, &mut Report),
{
    let table = ScoreTable::build(from, to, score);
    let mut state = MatchState::new(from.len(), to.len());

    for candidate in &table.candidates {
        if !state.both_unmatched(candidate.from, candidate.to) {
            continue;
        }
        state.take(candidate.from, candidate.to);
        deep(from[candidate.from], to[candidate.to], report);
    }

    for (i, item) in from.iter().enumerate() {
        if state.unmatched_from[i] {
            report.removed(
                item.pos,
                to_scope,
                removed_key,
                vec![item.display_name().into()],
            );
        }
    }
    for (j, item) in to.iter().enumerate() {
        if state.unmatched_to[j] {
            report.added(
                from_scope,
                item.pos,
                added_key,
                vec![item.display_name().into()],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Severity;
    use crate::tree::DeclKind;

    fn method(name: &str, line: u32) -> Declaration {
        Declaration::new(DeclKind::Method, name)
            .typed("void")
            .at(line, 1)
    }

    fn run_match(
        from: &[&Declaration],
        to: &[&Declaration],
        score: impl Fn(&Declaration, &Declaration) -> f64,
    ) -> (Vec<(String, String)>, Report) {
        let mut pairs = Vec::new();
        let mut report = Report::new();
        match_sets(
            from,
            to,
            SourcePos::new(1, 1),
            SourcePos::new(1, 1),
            MessageKey::MethodAdded,
            MessageKey::MethodRemoved,
            score,
            |a, b, _report| {
                pairs.push((a.simple_name().to_string(), b.simple_name().to_string()));
            },
            &mut report,
        );
        (pairs, report)
    }

    #[test]
    fn test_identical_sets_pair_fully() {
        let a1 = method("a", 1);
        let a2 = method("b", 2);
        let b1 = method("a", 1);
        let b2 = method("b", 2);

        let (pairs, report) = run_match(&[&a1, &a2], &[&b1, &b2], |x, y| {
            if x.simple_name() == y.simple_name() {
                1.0
            } else {
                0.0
            }
        });

        assert_eq!(pairs.len(), 2);
        assert!(report.is_empty());
    }

    #[test]
    fn test_zero_score_pairs_are_not_candidates() {
        let a = method("a", 1);
        let b = method("b", 1);

        let (pairs, report) = run_match(&[&a], &[&b], |_, _| 0.0);

        assert!(pairs.is_empty());
        let stats = report.stats();
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.added, 1);
    }

    #[test]
    fn test_best_score_wins_regardless_of_generation_order() {
        // (a1, b2) scores highest even though (a1, b1) is generated first;
        // the unique best pair must always be matched.
        let a1 = method("a1", 1);
        let a2 = method("a2", 2);
        let b1 = method("b1", 1);
        let b2 = method("b2", 2);

        let (pairs, _report) = run_match(&[&a1, &a2], &[&b1, &b2], |x, y| {
            match (x.simple_name(), y.simple_name()) {
                ("a1", "b2") => 0.9,
                ("a1", "b1") => 0.4,
                ("a2", "b1") => 0.4,
                ("a2", "b2") => 0.3,
                _ => 0.0,
            }
        });

        assert_eq!(
            pairs,
            vec![
                ("a1".to_string(), "b2".to_string()),
                ("a2".to_string(), "b1".to_string()),
            ]
        );
    }

    #[test]
    fn test_tied_top_scores_first_seen_wins() {
        // m1 ties at 0.9 with both to-items; the pair generated first
        // (m1, n1) is accepted. m2's only counterpart is then n2 at 0.5.
        let m1 = method("m1", 1);
        let m2 = method("m2", 2);
        let n1 = method("n1", 1);
        let n2 = method("n2", 2);

        let (pairs, report) = run_match(&[&m1, &m2], &[&n1, &n2], |x, y| {
            match (x.simple_name(), y.simple_name()) {
                ("m1", "n1") => 0.9,
                ("m1", "n2") => 0.9,
                ("m2", "n1") => 0.5,
                _ => 0.0,
            }
        });

        assert_eq!(pairs, vec![("m1".to_string(), "n1".to_string())]);
        let events = report.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].severity, Severity::Removed);
        assert!(events[0].message().contains("m2"));
        assert_eq!(events[1].severity, Severity::Added);
        assert!(events[1].message().contains("n2"));
    }

    #[test]
    fn test_lower_score_accepted_only_if_still_unmatched() {
        // After (m1, n1) is taken at 0.9, the 0.5 pairing (m2, n1) is dead;
        // m2 falls through to removed.
        let m1 = method("m1", 1);
        let m2 = method("m2", 2);
        let n1 = method("n1", 1);

        let (pairs, report) = run_match(&[&m1, &m2], &[&n1], |x, y| {
            match (x.simple_name(), y.simple_name()) {
                ("m1", "n1") => 0.9,
                ("m2", "n1") => 0.5,
                _ => 0.0,
            }
        });

        assert_eq!(pairs, vec![("m1".to_string(), "n1".to_string())]);
        assert_eq!(report.stats().removed, 1);
        assert_eq!(report.stats().added, 0);
    }

    #[test]
    fn test_every_item_consumed_exactly_once() {
        // Totality: each item appears in exactly one deep call or one event.
        let a1 = method("a1", 1);
        let a2 = method("a2", 2);
        let a3 = method("a3", 3);
        let b1 = method("b1", 1);
        let b2 = method("b2", 2);

        let (pairs, report) = run_match(&[&a1, &a2, &a3], &[&b1, &b2], |x, y| {
            // Every pairing is a candidate at the same score.
            let _ = (x, y);
            0.5
        });

        let stats = report.stats();
        assert_eq!(pairs.len() * 2 + stats.total(), 5);
        assert_eq!(stats.added, 0);
        assert_eq!(stats.removed, 1);
    }

    #[test]
    fn test_empty_from_reports_all_added() {
        let b1 = method("b1", 4);
        let b2 = method("b2", 2);

        let (pairs, report) = run_match(&[], &[&b1, &b2], |_, _| 1.0);

        assert!(pairs.is_empty());
        assert_eq!(report.stats().added, 2);
        // Added events come out in collection order, not position order.
        assert!(report.events()[0].message().contains("b1"));
        assert!(report.events()[1].message().contains("b2"));
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn test_nan_score_panics() {
        let a = method("a", 1);
        let b = method("b", 1);
        run_match(&[&a], &[&b], |_, _| f64::NAN);
    }

    #[test]
    #[should_panic(expected = "must be finite")]
    fn test_negative_score_panics() {
        let a = method("a", 1);
        let b = method("b", 1);
        run_match(&[&a], &[&b], |_, _| -0.5);
    }
}
