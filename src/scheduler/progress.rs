//! Graduation progress metrics.
//!
//! Summarizes a completed [`Timetable`] against the configured quotas.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total credits | Placed + carried credits |
//! | Remaining | max(0, graduation target − total) |
//! | GE shortfall | max(0, GE target − GE credits) |
//! | Elective shortfall | max(0, elective target − elective credits) |
//! | Load rate | Placed credits / sum of open semester caps |
//! | Under-filled semesters | Open semesters below their cap |

use serde::Serialize;

use super::Quotas;
use crate::models::Timetable;

/// Progress indicators of a timetable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport {
    /// Placed plus carried credits.
    pub total_credits: u32,
    /// Credits still missing for graduation.
    pub remaining_credits: u32,
    /// General-education credits still missing.
    pub ge_shortfall: u32,
    /// Departmental elective credits still missing.
    pub elective_shortfall: u32,
    /// Fraction of open-semester capacity used (0.0..1.0).
    pub load_rate: f64,
    /// Open semesters that ended below their cap.
    pub underfilled_semesters: Vec<usize>,
    /// Number of unmet requirements.
    pub unmet_count: usize,
}

impl ProgressReport {
    /// Computes the report for `timetable` under `quotas`.
    pub fn calculate(timetable: &Timetable, quotas: &Quotas) -> Self {
        let open = timetable
            .semesters
            .iter()
            .filter(|s| s.index >= timetable.first_open_semester);

        let mut capacity: u32 = 0;
        let mut placed: u32 = 0;
        let mut underfilled_semesters = Vec::new();
        for semester in open {
            capacity += semester.cap;
            placed += semester.credits;
            if semester.credits < semester.cap {
                underfilled_semesters.push(semester.index);
            }
        }

        // No open capacity counts as fully loaded
        let load_rate = if capacity == 0 {
            1.0
        } else {
            f64::from(placed) / f64::from(capacity)
        };

        Self {
            total_credits: timetable.total_credits,
            remaining_credits: quotas.graduation_credits.saturating_sub(timetable.total_credits),
            ge_shortfall: quotas.ge_credit_target.saturating_sub(timetable.ge_credits),
            elective_shortfall: quotas
                .elective_credit_target
                .saturating_sub(timetable.elective_credits),
            load_rate,
            underfilled_semesters,
            unmet_count: timetable.unmet_requirements.len(),
        }
    }

    /// Whether the plan reaches `min_total` credits with no unmet requirement.
    pub fn meets_thresholds(&self, min_total: u32) -> bool {
        self.total_credits >= min_total && self.unmet_count == 0
    }

    /// Whether every quota and the graduation target are met.
    pub fn is_complete(&self) -> bool {
        self.remaining_credits == 0
            && self.ge_shortfall == 0
            && self.elective_shortfall == 0
            && self.unmet_count == 0
    }
}
