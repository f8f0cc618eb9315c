//! # Catalog Flattening
//!
//! Turns the nested group → subgroup → control document into one flat,
//! display-ready record per control.
//!
//! ## Ordering
//!
//! For each top-level group in document order: the group's direct controls
//! first, then each subgroup's controls in document order. Direct controls
//! are tagged [`ControlKind::GroupControl`], subgroup controls
//! [`ControlKind::SubgroupControl`].
//!
//! ## Determinism
//!
//! Flattening is a pure function of the document: the same document always
//! yields the same records in the same order with the same resolved text.
//! Only [`FlatCatalog::generated_at`] varies between runs.

use serde::{Deserialize, Serialize};

use gsd_core::Timestamp;

use crate::document::{CatalogDocument, CatalogMetadata, Control, Group};
use crate::error::CatalogError;
use crate::params::ParameterResolver;

/// Property name carrying the implementation effort of a control.
pub const EFFORT_LEVEL_PROP: &str = "effort_level";

/// Effort level reported when a control has no effort property.
pub const EFFORT_NOT_AVAILABLE: &str = "N/A";

/// Part name of the requirement text.
pub const STATEMENT_PART: &str = "statement";

/// Part name of the implementation guidance text.
pub const GUIDANCE_PART: &str = "guidance";

/// Where in the hierarchy a control sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// Direct child of a top-level group.
    GroupControl,
    /// Child of a subgroup.
    SubgroupControl,
}

/// A control with its group context attached and its prose resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatControlRecord {
    pub id: String,
    pub class: String,
    pub title: String,
    pub effort_level: String,
    pub statement: String,
    pub guidance: String,
    pub group_id: String,
    pub group_title: String,
    pub subgroup_id: Option<String>,
    pub subgroup_title: Option<String>,
    #[serde(rename = "type")]
    pub kind: ControlKind,
}

/// Result of flattening one catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatCatalog {
    pub records: Vec<FlatControlRecord>,
    pub total_controls: usize,
    pub total_groups: usize,
    pub metadata: Option<CatalogMetadata>,
    /// When this flat list was built. Informational only.
    pub generated_at: Timestamp,
}

impl FlatCatalog {
    /// Look up a record by control id.
    pub fn get(&self, control_id: &str) -> Option<&FlatControlRecord> {
        self.records.iter().find(|r| r.id == control_id)
    }
}

/// Flatten a parsed catalog document.
///
/// # Errors
///
/// Controls without an id are skipped with a warning; they could never
/// carry a status. Returns [`CatalogError::Processing`] when the catalog
/// has controls but none of them has an id.
pub fn flatten(document: &CatalogDocument) -> Result<FlatCatalog, CatalogError> {
    let catalog = &document.catalog;
    let resolver = ParameterResolver::collect(catalog);

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for group in &catalog.groups {
        for control in &group.controls {
            match flatten_control(control, &resolver, group, None) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }
        for subgroup in &group.subgroups {
            if !subgroup.subgroups.is_empty() {
                tracing::warn!(
                    group = %group.id,
                    subgroup = %subgroup.id,
                    nested = subgroup.subgroups.len(),
                    "groups nested below subgroup level are not listed"
                );
            }
            for control in &subgroup.controls {
                match flatten_control(control, &resolver, group, Some(subgroup)) {
                    Some(record) => records.push(record),
                    None => skipped += 1,
                }
            }
        }
    }

    if records.is_empty() && skipped > 0 {
        return Err(CatalogError::Processing(format!(
            "none of the {skipped} controls has an id"
        )));
    }

    let flat = FlatCatalog {
        total_controls: records.len(),
        total_groups: catalog.groups.len(),
        records,
        metadata: catalog.metadata.clone(),
        generated_at: Timestamp::now(),
    };
    tracing::info!(
        controls = flat.total_controls,
        groups = flat.total_groups,
        parameters = resolver.len(),
        "catalog flattened"
    );
    Ok(flat)
}

fn flatten_control(
    control: &Control,
    resolver: &ParameterResolver,
    group: &Group,
    subgroup: Option<&Group>,
) -> Option<FlatControlRecord> {
    if control.id.trim().is_empty() {
        tracing::warn!(
            group = %group.id,
            subgroup = subgroup.map_or("", |s| s.id.as_str()),
            title = %control.title,
            "skipping control without id"
        );
        return None;
    }

    let statement = control.part_prose(STATEMENT_PART).unwrap_or("");
    let guidance = control.part_prose(GUIDANCE_PART).unwrap_or("");

    Some(FlatControlRecord {
        id: control.id.clone(),
        class: control.class.clone(),
        title: control.title.clone(),
        effort_level: control
            .property(EFFORT_LEVEL_PROP)
            .unwrap_or(EFFORT_NOT_AVAILABLE)
            .to_string(),
        statement: resolver.resolve(statement).into_owned(),
        guidance: resolver.resolve(guidance).into_owned(),
        group_id: group.id.clone(),
        group_title: group.title.clone(),
        subgroup_id: subgroup.map(|s| s.id.clone()),
        subgroup_title: subgroup.map(|s| s.title.clone()),
        kind: if subgroup.is_some() {
            ControlKind::SubgroupControl
        } else {
            ControlKind::GroupControl
        },
    })
}
