//! Placement primitive.
//!
//! Attempts to put one course offering into one semester.
//!
//! # Checks (in order)
//!
//! 1. The semester is open (not historical, within range).
//! 2. The schedule code decodes.
//! 3. Semester credits + course credits ≤ cap (saturating).
//! 4. No decoded slot is already occupied in that semester.
//! 5. Year alignment: a non-GE code's intended year equals the
//!    semester's academic year.
//!
//! A failed check leaves the state untouched, so callers may retry the
//! same course in other semesters.

use thiserror::Error;
use tracing::{trace, warn};

use super::ScheduleState;
use crate::models::{academic_year, decode_schedule_code, Course, SlotCodeError, TimeSlot};

/// Why a course cannot go into a semester.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("semester is closed to placement")]
    SemesterClosed,
    #[error("malformed schedule code: {0}")]
    MalformedSlots(#[from] SlotCodeError),
    #[error("credit cap exceeded ({needed} > {cap})")]
    CreditCap { needed: u32, cap: u32 },
    #[error("time conflict with '{with}'")]
    TimeConflict { with: String },
    #[error("intended for year {intended}, semester is year {year}")]
    YearMismatch { intended: u32, year: u32 },
}

impl ScheduleState {
    /// Runs every placement check without mutating anything.
    ///
    /// Returns the decoded slots on success.
    pub fn check_placement(&self, course: &Course, semester: usize) -> Result<Vec<TimeSlot>, Rejection> {
        if !self.open_semesters().contains(&semester) {
            return Err(Rejection::SemesterClosed);
        }
        let slots = decode_schedule_code(&course.schedule)?;
        let sem = &self.semesters[semester];

        let needed = sem.credits.saturating_add(course.credits);
        if needed > sem.cap {
            return Err(Rejection::CreditCap { needed, cap: sem.cap });
        }
        if let Some(with) = sem.grid.first_conflict(&slots) {
            return Err(Rejection::TimeConflict { with: with.to_string() });
        }
        if let Some(intended) = course.intended_year() {
            let year = academic_year(semester);
            if !course.is_general_education_code() && intended != year {
                return Err(Rejection::YearMismatch { intended, year });
            }
        }

        Ok(slots)
    }

    /// Places `course` into `semester` if every check passes.
    ///
    /// On success the grid, the credit total, the semester course list
    /// and the placed sets are updated.
    pub fn try_place(&mut self, course: &Course, semester: usize) -> bool {
        match self.check_placement(course, semester) {
            Ok(slots) => {
                let sem = &mut self.semesters[semester];
                sem.grid.occupy(&slots, &course.name);
                sem.credits += course.credits;
                sem.courses.push(course.clone());
                self.placed_codes.insert(course.code.clone());
                self.placed_names.insert(course.name.clone());
                self.fulfil_group(&course.name);
                true
            }
            Err(Rejection::MalformedSlots(err)) => {
                warn!(
                    code = %course.code,
                    name = %course.name,
                    schedule = %course.schedule,
                    "skipping course with unusable schedule code: {err}"
                );
                false
            }
            Err(reason) => {
                trace!(code = %course.code, semester, %reason, "placement rejected");
                false
            }
        }
    }
}
