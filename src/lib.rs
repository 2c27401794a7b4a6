//! DECLDIFF - Semantic structural diff for declaration trees.
//!
//! This library compares two versions of a parsed source document (types
//! containing members containing parameter lists) and reports meaningful
//! structural changes - additions, removals, renames, retyping, and
//! reordering - at each nesting level, instead of a line-based textual diff.
//!
//! Top-level types pair by unique name, members of a matched type pair by
//! greedy best-score matching, and the parameter lists of matched methods
//! and constructors are diffed positionally so a reorder is distinguished
//! from a rename or a retype.
//!
//! # Example
//!
//! ```no_run
//! use decldiff::{compare_units, format_report, parse_file, OutputFormat, OutputOptions, Report};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Parse two versions of a declaration tree
//! let old = parse_file(Path::new("old.json"))?;
//! let new = parse_file(Path::new("new.json"))?;
//!
//! // Compute the structural diff
//! let mut report = Report::new();
//! compare_units(&old, &new, &mut report);
//!
//! // Format the output
//! let output = format_report(&report, &OutputFormat::Terminal, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod differ;
pub mod error;
pub mod filter;
pub mod index;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod report;
pub mod score;
pub mod sequence;
pub mod tree;

// Re-export commonly used types for convenience
pub use differ::compare_units;
pub use error::{DeclDiffError, OutputError, ParseError};
pub use filter::{apply_filters, FilterConfig, ScopePattern};
pub use index::DeclIndex;
pub use matcher::match_sets;
pub use output::{format_report, OutputFormat, OutputOptions};
pub use parser::{parse_file, parse_json, parse_toml, parse_yaml};
pub use report::{Arg, ChangeEvent, MessageKey, Report, ReportStats, Severity};
pub use sequence::compare_sequences;
pub use tree::{DeclKind, Declaration, Param, SourcePos, Unit};
