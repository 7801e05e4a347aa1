//! Timetable (solution) model.
//!
//! A timetable is the per-semester assignment of courses produced by the
//! planner, together with the requirement and quota counters needed for
//! progress reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Course;

/// Number of semester slots (four years × two terms).
pub const SEMESTER_COUNT: usize = 8;

/// Display labels for the eight semesters.
pub const SEMESTER_LABELS: [&str; SEMESTER_COUNT] =
    ["大一上", "大一下", "大二上", "大二下", "大三上", "大三下", "大四上", "大四下"];

/// Academic year (1-based) of a semester index.
#[inline]
pub fn academic_year(semester: usize) -> u32 {
    (semester / 2) as u32 + 1
}

/// Courses placed in one semester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterPlan {
    /// Semester index (0..8).
    pub index: usize,
    /// Credit cap that applied.
    pub cap: u32,
    /// Accumulated credits.
    pub credits: u32,
    /// Placed courses in placement order.
    pub courses: Vec<Course>,
}

impl SemesterPlan {
    /// Display label (e.g. `大二上`).
    pub fn label(&self) -> &'static str {
        SEMESTER_LABELS[self.index]
    }

    /// Names of placed courses in placement order.
    pub fn course_names(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.name.as_str()).collect()
    }

    /// Credits still available under the cap.
    pub fn remaining_capacity(&self) -> u32 {
        self.cap.saturating_sub(self.credits)
    }
}

/// A complete eight-semester plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Per-semester placements.
    pub semesters: Vec<SemesterPlan>,
    /// Credits carried over from completed courses.
    pub carried_credits: u32,
    /// Placed plus carried credits.
    pub total_credits: u32,
    /// Requirement names considered met.
    pub fulfilled: BTreeSet<String>,
    /// Requirements the planner attempted but could not meet.
    pub unmet_requirements: Vec<String>,
    /// Accumulated general-education credits.
    pub ge_credits: u32,
    /// Accumulated departmental elective credits.
    pub elective_credits: u32,
    /// First semester that was open to placement.
    pub first_open_semester: usize,
}

impl Timetable {
    /// Credits placed by the planner (excluding carried credits).
    pub fn placed_credits(&self) -> u32 {
        self.semesters.iter().map(|s| s.credits).sum()
    }

    /// Semester holding a course named `name`, if placed.
    pub fn semester_of(&self, name: &str) -> Option<usize> {
        self.semesters
            .iter()
            .find(|s| s.courses.iter().any(|c| c.name == name))
            .map(|s| s.index)
    }

    /// Whether a course named `name` was placed.
    pub fn contains(&self, name: &str) -> bool {
        self.semester_of(name).is_some()
    }

    /// All placed courses in semester order.
    pub fn all_courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    /// Number of placed courses.
    pub fn course_count(&self) -> usize {
        self.semesters.iter().map(|s| s.courses.len()).sum()
    }
}
