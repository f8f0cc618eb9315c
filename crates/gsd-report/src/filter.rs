//! # Control Filtering
//!
//! A [`FilterSpec`] combines up to five criteria. Every active criterion
//! must hold (intersection); inactive ones pass everything. The output
//! keeps the input order.
//!
//! | Criterion | Inactive when | Match rule |
//! |-----------|---------------|------------|
//! | group | `None` | exact group title |
//! | classes | empty | class is any of the set |
//! | status | `StatusFilter::All` | current status per [`StatusLookup`] |
//! | effort levels | empty | effort level is any of the set |
//! | search | `None` or blank | case-insensitive substring of id, title, statement or guidance |

use std::collections::BTreeSet;

use gsd_catalog::FlatControlRecord;
use gsd_core::{StatusFilter, StatusLookup};

/// Compound filter over flat control records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub group: Option<String>,
    pub classes: BTreeSet<String>,
    pub status: StatusFilter,
    pub effort_levels: BTreeSet<String>,
    pub search: Option<String>,
}

impl FilterSpec {
    /// A filter with no active criteria.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, title: impl Into<String>) -> Self {
        self.group = Some(title.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_effort_level(mut self, level: impl Into<String>) -> Self {
        self.effort_levels.insert(level.into());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Whether no criterion is active.
    pub fn is_unfiltered(&self) -> bool {
        self.group.is_none()
            && self.classes.is_empty()
            && self.status == StatusFilter::All
            && self.effort_levels.is_empty()
            && self.search_term().is_none()
    }

    /// Records passing every active criterion, in input order.
    pub fn apply<'a, L>(
        &self,
        records: &'a [FlatControlRecord],
        statuses: &L,
    ) -> Vec<&'a FlatControlRecord>
    where
        L: StatusLookup + ?Sized,
    {
        let needle = self.search_term().map(str::to_lowercase);
        let selected: Vec<_> = records
            .iter()
            .filter(|r| self.matches_static(r))
            .filter(|r| needle.as_deref().map_or(true, |n| search_matches(r, n)))
            .filter(|r| self.status.matches(statuses.status_of(&r.id)))
            .collect();
        tracing::debug!(total = records.len(), selected = selected.len(), "filter applied");
        selected
    }

    fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|t| !t.trim().is_empty())
    }

    fn matches_static(&self, record: &FlatControlRecord) -> bool {
        self.group.as_deref().map_or(true, |g| record.group_title == g)
            && (self.classes.is_empty() || self.classes.contains(&record.class))
            && (self.effort_levels.is_empty() || self.effort_levels.contains(&record.effort_level))
    }
}

fn search_matches(record: &FlatControlRecord, needle: &str) -> bool {
    [&record.id, &record.title, &record.statement, &record.guidance]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Distinct, sorted values available for each filter criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub groups: Vec<String>,
    pub classes: Vec<String>,
    pub effort_levels: Vec<String>,
}

impl FilterOptions {
    /// Collect options from the flat list. Empty values are omitted.
    pub fn from_records(records: &[FlatControlRecord]) -> Self {
        fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
            values
                .filter(|v| !v.is_empty())
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        }
        Self {
            groups: distinct(records.iter().map(|r| &r.group_title)),
            classes: distinct(records.iter().map(|r| &r.class)),
            effort_levels: distinct(records.iter().map(|r| &r.effort_level)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gsd_catalog::ControlKind;
    use gsd_core::{ControlStatus, StatusRecord};
    use std::collections::HashMap;

    fn rec(id: &str, group: &str, class: &str, effort: &str, title: &str) -> FlatControlRecord {
        FlatControlRecord {
            id: id.into(),
            class: class.into(),
            title: title.into(),
            effort_level: effort.into(),
            statement: String::new(),
            guidance: String::new(),
            group_id: group.to_lowercase(),
            group_title: group.into(),
            subgroup_id: None,
            subgroup_title: None,
            kind: ControlKind::GroupControl,
        }
    }

    fn records() -> Vec<FlatControlRecord> {
        let mut with_text = rec("ORP.1.A1", "Organisation", "Basis", "1", "Verantwortlichkeiten");
        with_text.statement = "Die LEITUNG muss festlegen.".into();
        vec![
            with_text,
            rec("ORP.1.A2", "Organisation", "Standard", "2", "Zuständigkeiten"),
            rec("CON.3.A1", "Konzepte", "Basis", "N/A", "Datensicherung"),
            rec("CON.3.A2", "Konzepte", "Erhöht", "3", "Leitlinie"),
        ]
    }

    fn statuses() -> HashMap<String, StatusRecord> {
        let mut map = HashMap::new();
        map.insert(
            "ORP.1.A2".to_string(),
            StatusRecord {
                control_id: "ORP.1.A2".into(),
                status: Some(ControlStatus::Fulfilled),
                notes: "ok".into(),
                changed_by: "A".into(),
                updated_at: None,
            },
        );
        map
    }

    fn ids(selected: &[&FlatControlRecord]) -> Vec<String> {
        selected.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_no_criteria_passes_all_in_order() {
        let recs = records();
        let spec = FilterSpec::all();
        assert!(spec.is_unfiltered());
        assert_eq!(spec.apply(&recs, &statuses()).len(), 4);
    }

    #[test]
    fn test_group_exact_match() {
        let recs = records();
        let out = FilterSpec::all().with_group("Konzepte").apply(&recs, &statuses());
        assert_eq!(ids(&out), ["CON.3.A1", "CON.3.A2"]);
        assert!(FilterSpec::all().with_group("Konz").apply(&recs, &statuses()).is_empty());
    }

    #[test]
    fn test_classes_any_of() {
        let recs = records();
        let out = FilterSpec::all()
            .with_class("Standard")
            .with_class("Erhöht")
            .apply(&recs, &statuses());
        assert_eq!(ids(&out), ["ORP.1.A2", "CON.3.A2"]);
    }

    #[test]
    fn test_status_unset_and_exact() {
        let recs = records();
        let unset = FilterSpec::all().with_status(StatusFilter::Unset).apply(&recs, &statuses());
        assert_eq!(unset.len(), 3);
        let done = FilterSpec::all()
            .with_status(StatusFilter::Is(ControlStatus::Fulfilled))
            .apply(&recs, &statuses());
        assert_eq!(ids(&done), ["ORP.1.A2"]);
    }

    #[test]
    fn test_effort_levels_any_of() {
        let recs = records();
        let out = FilterSpec::all().with_effort_level("N/A").apply(&recs, &statuses());
        assert_eq!(ids(&out), ["CON.3.A1"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let recs = records();
        let by_statement = FilterSpec::all().with_search("leitung").apply(&recs, &statuses());
        assert_eq!(ids(&by_statement), ["ORP.1.A1"]);
        let by_id = FilterSpec::all().with_search("con.3").apply(&recs, &statuses());
        assert_eq!(ids(&by_id), ["CON.3.A1", "CON.3.A2"]);
        let by_umlaut = FilterSpec::all().with_search("ZUSTÄNDIG").apply(&recs, &statuses());
        assert_eq!(ids(&by_umlaut), ["ORP.1.A2"]);
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let recs = records();
        let spec = FilterSpec::all().with_search("   ");
        assert!(spec.is_unfiltered());
        assert_eq!(spec.apply(&recs, &statuses()).len(), 4);
    }

    #[test]
    fn test_group_and_search_intersect() {
        let recs = records();
        let out = FilterSpec::all()
            .with_group("Organisation")
            .with_search("leitlinie")
            .apply(&recs, &statuses());
        assert!(out.is_empty(), "union would have returned CON.3.A2");
    }

    #[test]
    fn test_options_sorted_distinct_non_empty() {
        let mut recs = records();
        recs.push(rec("X.1", "Konzepte", "", "", "leer"));
        let options = FilterOptions::from_records(&recs);
        assert_eq!(options.groups, ["Konzepte", "Organisation"]);
        assert_eq!(options.classes, ["Basis", "Erhöht", "Standard"]);
        assert_eq!(options.effort_levels, ["1", "2", "3", "N/A"]);
    }
}
