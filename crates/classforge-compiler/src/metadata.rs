//! Type table stored in compiled modules

use crate::syntax::TypeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
    EnumValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEntry {
    pub name: String,
    pub kind: MemberKind,

    /// Fully qualified member type; `None` for constructors and void methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    /// Key taken from a `JsonProperty`/`JsonPropertyName` annotation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serialized_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub namespace: String,

    /// Simple name; nested types are dotted (`Outer.Inner`)
    pub name: String,

    pub kind: TypeKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub base_types: Vec<String>,

    #[serde(default)]
    pub members: Vec<MemberEntry>,
}

impl TypeEntry {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn member(&self, name: &str) -> Option<&MemberEntry> {
        self.members.iter().find(|m| m.name == name)
    }
}

/// Every type declared by a compilation, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeTable {
    pub types: Vec<TypeEntry>,
}

impl TypeTable {
    pub fn find(&self, full_name: &str) -> Option<&TypeEntry> {
        self.types.iter().find(|t| t.full_name() == full_name)
    }

    /// Distinct namespaces, first occurrence order.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = Vec::new();
        for entry in &self.types {
            if !namespaces.contains(&entry.namespace.as_str()) {
                namespaces.push(&entry.namespace);
            }
        }
        namespaces
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}
