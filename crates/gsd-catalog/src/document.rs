//! # Catalog Document Model
//!
//! Typed view of the catalog file:
//!
//! ```text
//! { "catalog": {
//!     "metadata": { "title", "version", "last-modified" },   (optional)
//!     "groups": [
//!       { "id", "title",
//!         "controls": [ { "id", "class", "title",
//!                         "props":  [ { "name", "value" } ],
//!                         "parts":  [ { "name", "prose" } ],
//!                         "params": [ { "id", "label" } ] } ],
//!         "groups": [ ...subgroups, same shape... ] } ] } }
//! ```
//!
//! Every optional key is defaulted to an empty value at deserialization
//! time, so traversal code never distinguishes "absent" from "empty".
//! Unknown keys are ignored.

use serde::{Deserialize, Serialize};

/// Root of a catalog file. Only the `catalog` key is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub catalog: Catalog,
}

/// The catalog body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub metadata: Option<CatalogMetadata>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Descriptive header of a catalog release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, rename = "last-modified")]
    pub last_modified: String,
}

/// A group of controls. Top-level groups may contain subgroups of the
/// same shape under the `groups` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default, rename = "groups")]
    pub subgroups: Vec<Group>,
}

/// A single security requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub props: Vec<Property>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub params: Vec<Parameter>,
}

impl Control {
    /// Value of the first property with the given name.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Prose of the first part with the given name.
    pub fn part_prose(&self, name: &str) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.prose.as_str())
    }
}

/// A `{name, value}` property attached to a control.
///
/// Numeric and boolean values are kept in their textual form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub value: String,
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
        Flag(bool),
        Null(()),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Integer(n) => n.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Flag(b) => b.to_string(),
        Scalar::Null(()) => String::new(),
    })
}

/// A named prose block (`statement`, `guidance`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub prose: String,
}

/// A declared substitution parameter. Declarations lacking an id or a
/// label are carried but never used for resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}
