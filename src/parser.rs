//! Loading declaration trees from JSON, YAML, and TOML files.
//!
//! The diff engine consumes parsed [`Unit`] trees; this module is the input
//! boundary that deserializes them from structured data files. The format is
//! detected by file extension (.json, .yaml, .yml, .toml); an unknown
//! extension falls back to attempting each format in turn.
//!
//! Parsing also validates the tree so the engine never sees declarations
//! with missing identity: top-level declarations must be uniquely-named
//! types, methods and fields must carry a name and a type, and parameters
//! must carry a type and a name.

use crate::error::ParseError;
use crate::tree::{DeclKind, Declaration, Unit};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Parses a declaration-tree file into a validated [`Unit`].
///
/// # Errors
///
/// Returns a [`ParseError`] when the file is missing or unreadable, when its
/// content does not deserialize in any supported format, or when the tree
/// fails validation.
pub fn parse_file(path: &Path) -> Result<Unit, ParseError> {
    if !path.exists() {
        return Err(ParseError::file_not_found(
            path.to_string_lossy().to_string(),
        ));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ParseError::read_error(path.to_string_lossy().to_string(), e))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase());

    let unit = match extension.as_deref() {
        Some("json") => parse_json(&content)
            .map_err(|e| ParseError::json_error(path.to_string_lossy().to_string(), e))?,
        Some("yaml") | Some("yml") => parse_yaml(&content)
            .map_err(|e| ParseError::yaml_error(path.to_string_lossy().to_string(), e))?,
        Some("toml") => parse_toml(&content)
            .map_err(|e| ParseError::toml_error(path.to_string_lossy().to_string(), e))?,
        _ => parse_json(&content)
            .map_err(|_| ())
            .or_else(|_| parse_yaml(&content).map_err(|_| ()))
            .or_else(|_| parse_toml(&content).map_err(|_| ()))
            .map_err(|_| ParseError::unknown_format(path.to_string_lossy().to_string()))?,
    };

    validate(&unit, &path.to_string_lossy())?;
    Ok(unit)
}

/// Parses a JSON string into an unvalidated [`Unit`].
pub fn parse_json(content: &str) -> Result<Unit, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parses a YAML string into an unvalidated [`Unit`].
pub fn parse_yaml(content: &str) -> Result<Unit, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

/// Parses a TOML string into an unvalidated [`Unit`].
pub fn parse_toml(content: &str) -> Result<Unit, toml::de::Error> {
    toml::from_str(content)
}

/// Checks the structural contracts the diff engine relies on.
pub fn validate(unit: &Unit, path: &str) -> Result<(), ParseError> {
    let mut seen = BTreeSet::new();
    for decl in &unit.types {
        if decl.kind != DeclKind::Type {
            return Err(ParseError::invalid_tree(
                path,
                format!(
                    "top-level declaration at {} is a {}, expected a type",
                    decl.pos,
                    decl.kind.label()
                ),
            ));
        }
        let name = decl.name.as_deref().ok_or_else(|| {
            ParseError::invalid_tree(path, format!("type at {} has no name", decl.pos))
        })?;
        if !seen.insert(name) {
            return Err(ParseError::invalid_tree(
                path,
                format!("duplicate top-level type name: {}", name),
            ));
        }
        validate_decl(decl, path)?;
    }
    Ok(())
}

fn validate_decl(decl: &Declaration, path: &str) -> Result<(), ParseError> {
    match decl.kind {
        DeclKind::Type => {
            if decl.name.is_none() {
                return Err(ParseError::invalid_tree(
                    path,
                    format!("type at {} has no name", decl.pos),
                ));
            }
        }
        DeclKind::Method => {
            if decl.name.is_none() {
                return Err(ParseError::invalid_tree(
                    path,
                    format!("method at {} has no name", decl.pos),
                ));
            }
            if decl.type_name.is_none() {
                return Err(ParseError::invalid_tree(
                    path,
                    format!(
                        "method {} at {} has no return type",
                        decl.simple_name(),
                        decl.pos
                    ),
                ));
            }
        }
        DeclKind::Field => {
            if decl.name.is_none() {
                return Err(ParseError::invalid_tree(
                    path,
                    format!("field at {} has no name", decl.pos),
                ));
            }
            if decl.type_name.is_none() {
                return Err(ParseError::invalid_tree(
                    path,
                    format!(
                        "field {} at {} has no declared type",
                        decl.simple_name(),
                        decl.pos
                    ),
                ));
            }
        }
        DeclKind::Constructor => {}
    }

    for param in &decl.parameters {
        if param.type_name.is_empty() {
            return Err(ParseError::invalid_tree(
                path,
                format!("parameter at {} has an empty type", param.pos),
            ));
        }
        if param.name.as_deref().map_or(true, str::is_empty) {
            return Err(ParseError::invalid_tree(
                path,
                format!("parameter at {} has no name", param.pos),
            ));
        }
    }

    for member in &decl.members {
        validate_decl(member, path)?;
    }

    Ok(())
}
