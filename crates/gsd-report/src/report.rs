//! # Progress Report
//!
//! Aggregate counts over the flat control list joined with the current
//! statuses. Pure and recomputed on demand.
//!
//! Percentages are in the range `0.0..=100.0`; the completion ratio is in
//! `0.0..=1.0`. An empty catalog yields zeros everywhere.

use serde::Serialize;

use gsd_catalog::FlatControlRecord;
use gsd_core::{ControlStatus, StatusLookup, UNSET_LABEL};

/// Count and share of one status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusShare {
    /// `None` for controls without a status.
    pub status: Option<ControlStatus>,
    pub count: usize,
    pub percentage: f64,
}

impl StatusShare {
    /// Display label (`Erfüllt`, ..., `Ohne Status`).
    pub fn label(&self) -> &'static str {
        self.status.map_or(UNSET_LABEL, |s| s.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    pub total: usize,
    /// One entry per status in display order, then the unset share.
    pub shares: Vec<StatusShare>,
    /// Fulfilled plus dispensable.
    pub completed: usize,
    pub completion_ratio: f64,
}

impl ProgressReport {
    pub fn compute<L>(records: &[FlatControlRecord], statuses: &L) -> Self
    where
        L: StatusLookup + ?Sized,
    {
        let total = records.len();
        let mut counts = [0usize; 3];
        let mut unset = 0usize;
        for record in records {
            match statuses.status_of(&record.id) {
                Some(status) => counts[index_of(status)] += 1,
                None => unset += 1,
            }
        }

        let mut shares: Vec<StatusShare> = ControlStatus::all()
            .iter()
            .map(|&status| StatusShare {
                status: Some(status),
                count: counts[index_of(status)],
                percentage: percentage(counts[index_of(status)], total),
            })
            .collect();
        shares.push(StatusShare {
            status: None,
            count: unset,
            percentage: percentage(unset, total),
        });

        let completed = ControlStatus::all()
            .iter()
            .filter(|s| s.is_complete())
            .map(|&s| counts[index_of(s)])
            .sum();

        Self {
            total,
            shares,
            completed,
            completion_ratio: ratio(completed, total),
        }
    }

    /// The share of one status (`None` = unset).
    pub fn share(&self, status: Option<ControlStatus>) -> StatusShare {
        self.shares
            .iter()
            .copied()
            .find(|s| s.status == status)
            .unwrap_or(StatusShare {
                status,
                count: 0,
                percentage: 0.0,
            })
    }

    pub fn count(&self, status: ControlStatus) -> usize {
        self.share(Some(status)).count
    }

    pub fn percentage(&self, status: ControlStatus) -> f64 {
        self.share(Some(status)).percentage
    }
}

fn index_of(status: ControlStatus) -> usize {
    match status {
        ControlStatus::Fulfilled => 0,
        ControlStatus::NotFulfilled => 1,
        ControlStatus::Dispensable => 2,
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}

/// `part` as a percentage of `total`; `0.0` when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    ratio(part, total) * 100.0
}
