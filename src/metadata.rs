//! Reflected-metadata snapshot.
//!
//! The reflection layer is an external tool; it exports the compiled
//! library's public surface as a JSON document which this module
//! deserializes. Descriptors are owned by the snapshot and never mutated
//! during a run.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// The whole metadata snapshot for one assembly.
#[derive(Debug, Deserialize)]
pub struct Assembly {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDesc>,
}

/// A reflected type descriptor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDesc {
    /// Bare type name, e.g. `Widget`.
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Namespace-qualified name, e.g. `Acme.Widget`. This is the name the
    /// comment keys are built from.
    pub full_name: String,
    /// class / interface / struct / enum / delegate.
    #[serde(default = "default_type_kind")]
    pub kind: String,
    #[serde(default)]
    pub base_type: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    /// Custom attribute type names. Used only for the compiler-generated
    /// exclusion check.
    #[serde(default)]
    pub attributes: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberDesc>,
}

fn default_type_kind() -> String {
    "class".to_string()
}

/// Kind of a reflected member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberTarget {
    Constructor,
    Field,
    Property,
    Method,
    Event,
}

/// A reflected member descriptor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDesc {
    pub name: String,
    pub kind: MemberTarget,
    /// Reflected display form, return type first, e.g.
    /// `System.Int32 Add(System.Int32, System.Int32)`. Optional; when absent
    /// a canonical form is synthesized from the fields below.
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParamDesc>,
    #[serde(default)]
    pub return_type: Option<String>,
    #[serde(default)]
    pub generic_parameters: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ParamDesc {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Assembly {
    /// Loads and deserializes a metadata snapshot.
    pub fn load(path: &Path) -> Result<Assembly> {
        let text =
            fs::read_to_string(path).map_err(|_| Error::AssemblyNotFound(path.to_path_buf()))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Documentable types: compiler-synthesized types excluded, sorted by
    /// name ascending (ordinal). Every traversal point uses this list so the
    /// TOC, detail sections and cross-reference resolution agree.
    pub fn documented_types(&self) -> Vec<&TypeDesc> {
        let mut types: Vec<&TypeDesc> = self
            .types
            .iter()
            .filter(|t| !t.is_compiler_generated())
            .collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    /// Known subclasses of `full_name` among the documented types, sorted.
    pub fn subclasses_of(&self, full_name: &str) -> Vec<&TypeDesc> {
        self.documented_types()
            .into_iter()
            .filter(|t| t.base_type.as_deref() == Some(full_name))
            .collect()
    }

    /// Finds a documented type by its full name.
    pub fn find_type(&self, full_name: &str) -> Option<&TypeDesc> {
        self.documented_types()
            .into_iter()
            .find(|t| t.full_name == full_name)
    }
}

impl TypeDesc {
    /// Attribute-name check, not a type check: the reflection layer records
    /// attribute type names and the generator looks for the marker by name.
    pub fn is_compiler_generated(&self) -> bool {
        self.attributes.iter().any(|a| a.contains("CompilerGenerated"))
    }

    /// Members of one kind, sorted by name ascending.
    pub fn members_of(&self, kind: MemberTarget) -> Vec<&MemberDesc> {
        let mut members: Vec<&MemberDesc> = self
            .members
            .iter()
            .filter(|m| m.kind == kind && !m.is_compiler_generated())
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name));
        members
    }
}

impl MemberDesc {
    pub fn is_compiler_generated(&self) -> bool {
        self.attributes.iter().any(|a| a.contains("CompilerGenerated"))
    }
}
