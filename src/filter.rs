//! Scope-path filtering for diff reports.
//!
//! Glob-style patterns over an event's scope path let users ignore specific
//! declarations or focus on particular ones.
//!
//! # Pattern Syntax
//!
//! - `Widget` - matches the literal scope segment "Widget"
//! - `*` - matches any single scope segment
//! - `**` - matches any number of scope segments (including zero)
//! - `Outer.Inner` - matches the nested scope "Outer.Inner"
//! - `**.find(int)` - matches a `find(int)` scope at any depth
//!
//! An event matches a pattern when the pattern covers a prefix of its scope
//! path, so ignoring `Widget` also ignores everything inside `Widget`.

use crate::report::Report;

/// A single segment in a scope pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches an exact scope name
    Literal(String),
    /// Matches any single scope segment (*)
    SingleWildcard,
    /// Matches any number of scope segments (**)
    DoubleWildcard,
}

/// A compiled scope pattern for matching against event paths.
#[derive(Debug, Clone)]
pub struct ScopePattern {
    pub segments: Vec<PatternSegment>,
}

impl ScopePattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// True when the pattern matches the path or an ancestor of it.
    pub fn matches(&self, path: &[String]) -> bool {
        Self::matches_recursive(&self.segments, path)
    }

    fn matches_recursive(pattern: &[PatternSegment], path: &[String]) -> bool {
        match (pattern.first(), path.first()) {
            // Pattern exhausted: it covered a prefix of the path.
            (None, _) => true,
            (Some(_), None) => pattern
                .iter()
                .all(|s| matches!(s, PatternSegment::DoubleWildcard)),
            (Some(seg), Some(path_seg)) => match seg {
                PatternSegment::Literal(lit) => {
                    lit == path_seg && Self::matches_recursive(&pattern[1..], &path[1..])
                }
                PatternSegment::SingleWildcard => {
                    Self::matches_recursive(&pattern[1..], &path[1..])
                }
                PatternSegment::DoubleWildcard => {
                    Self::matches_recursive(&pattern[1..], path)
                        || Self::matches_recursive(pattern, &path[1..])
                }
            },
        }
    }
}

/// Configuration for filtering diff reports.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Patterns for scopes to ignore (exclude from output)
    pub ignore_patterns: Vec<ScopePattern>,
    /// Patterns for scopes to include (if non-empty, only these are shown)
    pub only_patterns: Vec<ScopePattern>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(ScopePattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(ScopePattern::parse(pattern));
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty() || !self.only_patterns.is_empty()
    }

    pub fn should_include(&self, path: &[String]) -> bool {
        for pattern in &self.ignore_patterns {
            if pattern.matches(path) {
                return false;
            }
        }
        if self.only_patterns.is_empty() {
            return true;
        }
        self.only_patterns.iter().any(|p| p.matches(path))
    }
}

/// Applies the filter config to a report, keeping matching events.
pub fn apply_filters(report: Report, config: &FilterConfig) -> Report {
    if !config.has_filters() {
        return report;
    }
    let events = report
        .into_events()
        .into_iter()
        .filter(|e| config.should_include(&e.path))
        .collect();
    Report::from_events(events)
}
