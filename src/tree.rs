//! Declaration tree model for parsed source documents.
//!
//! A compilation unit is a tree of [`Declaration`] nodes: types containing
//! members (fields, constructors, methods, nested types), where methods and
//! constructors carry an ordered [`Param`] list. The diff engine treats these
//! as immutable views and never mutates them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A line/column source position, used only as a reporting anchor.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SourcePos {
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The kind of a declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclKind {
    /// A class/interface-like container with a member body.
    Type,
    Method,
    Constructor,
    Field,
}

impl DeclKind {
    pub fn label(&self) -> &'static str {
        match self {
            DeclKind::Type => "type",
            DeclKind::Method => "method",
            DeclKind::Constructor => "constructor",
            DeclKind::Field => "field",
        }
    }
}

/// One entry of a parameter list: a declared type with an optional name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    /// Declared type, compared as a plain string (no semantic resolution).
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pos: SourcePos,
}

impl Param {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: Some(name.into()),
            pos: SourcePos::default(),
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.pos = SourcePos::new(line, column);
        self
    }

    /// Parameter name, required whenever a parameter list is classified.
    /// Absence past parse-time validation is a caller defect.
    pub fn name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None => panic!("parameter at {} has no name", self.pos),
        }
    }
}

/// A node in the parsed declaration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub kind: DeclKind,
    #[serde(default)]
    pub name: Option<String>,
    /// Return type for methods, declared type for fields. Unused on types
    /// and constructors.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<Param>,
    #[serde(default)]
    pub pos: SourcePos,
    #[serde(default)]
    pub members: Vec<Declaration>,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
            type_name: None,
            modifiers: Vec::new(),
            parameters: Vec::new(),
            pos: SourcePos::default(),
            members: Vec::new(),
        }
    }

    /// A constructor declaration, which carries no name of its own.
    pub fn constructor() -> Self {
        Self {
            kind: DeclKind::Constructor,
            name: None,
            type_name: None,
            modifiers: Vec::new(),
            parameters: Vec::new(),
            pos: SourcePos::default(),
            members: Vec::new(),
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.pos = SourcePos::new(line, column);
        self
    }

    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Declared name, or the conventional placeholder for constructors.
    pub fn simple_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<init>")
    }

    /// Display name used in reports. Parameter-bearing declarations include
    /// their parameter types so overloads are distinguishable.
    pub fn display_name(&self) -> String {
        match self.kind {
            DeclKind::Method | DeclKind::Constructor => {
                let types: Vec<&str> = self
                    .parameters
                    .iter()
                    .map(|p| p.type_name.as_str())
                    .collect();
                format!("{}({})", self.simple_name(), types.join(", "))
            }
            _ => self.simple_name().to_string(),
        }
    }

    /// Members of the given kind, in declaration order.
    pub fn members_of_kind(&self, kind: DeclKind) -> Vec<&Declaration> {
        self.members.iter().filter(|m| m.kind == kind).collect()
    }
}

/// One parsed compilation unit: the top-level type declarations of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default)]
    pub types: Vec<Declaration>,
    #[serde(default)]
    pub pos: SourcePos,
}

impl Unit {
    pub fn new(types: Vec<Declaration>) -> Self {
        Self {
            types,
            pos: SourcePos::default(),
        }
    }
}
