//! # Parameter Resolution
//!
//! Controls declare parameters (`{id, label}`) and reference them from
//! prose with placeholders of the form `{{insert: param, <id>}}`. The
//! resolver collects every declaration in the catalog into one global
//! table and substitutes placeholders with the declared label.
//!
//! ## Rules
//!
//! - Declarations are collected from every control at every nesting depth,
//!   in document order. A repeated id overwrites the earlier label (last
//!   declaration wins, no conflict is raised).
//! - Declarations without an id or without a label are skipped.
//! - A placeholder whose id is not declared becomes `[<id>]`.
//! - Whitespace around `insert`, `param` and the id is ignored.
//! - Text without both `{{` and `}}` is returned unchanged without running
//!   the pattern.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::document::{Catalog, Group};

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*insert\s*:\s*param\s*,\s*([^}]+?)\s*\}\}")
            .expect("placeholder pattern is a valid regex literal")
    })
}

/// Parameter id → label table for one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterResolver {
    labels: BTreeMap<String, String>,
}

impl ParameterResolver {
    /// Collect all parameter declarations of a catalog.
    pub fn collect(catalog: &Catalog) -> Self {
        let mut resolver = Self::default();
        for group in &catalog.groups {
            resolver.collect_group(group);
        }
        tracing::debug!(parameters = resolver.labels.len(), "parameter labels collected");
        resolver
    }

    fn collect_group(&mut self, group: &Group) {
        for control in &group.controls {
            for param in &control.params {
                if let (Some(id), Some(label)) = (param.id.as_deref(), param.label.as_deref()) {
                    if id.is_empty() {
                        continue;
                    }
                    self.declare(id, label);
                }
            }
        }
        for subgroup in &group.subgroups {
            self.collect_group(subgroup);
        }
    }

    /// Record a label for an id, replacing any earlier one.
    pub fn declare(&mut self, id: impl Into<String>, label: impl Into<String>) {
        let id = id.into();
        let label = label.into();
        if let Some(previous) = self.labels.get(&id) {
            if *previous != label {
                tracing::debug!(%id, %previous, %label, "parameter redeclared; last label wins");
            }
        }
        self.labels.insert(id, label);
    }

    /// The label declared for an id.
    pub fn label(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    /// Number of distinct parameter ids.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no parameters were declared.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Replace every placeholder in `text`.
    pub fn resolve<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !(text.contains("{{") && text.contains("}}")) {
            return Cow::Borrowed(text);
        }
        placeholder_pattern().replace_all(text, |caps: &Captures<'_>| {
            let id = caps.get(1).map_or("", |m| m.as_str()).trim();
            match self.labels.get(id) {
                Some(label) => label.clone(),
                None => {
                    tracing::debug!(%id, "unresolved parameter placeholder");
                    format!("[{id}]")
                }
            }
        })
    }
}
