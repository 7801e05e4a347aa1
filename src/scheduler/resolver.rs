//! Ranked placement and requirement resolution.
//!
//! # Algorithm
//!
//! `place_ranked` is the one scan-and-place loop shared by every phase:
//! walk candidates best first, skip anything already placed, try each
//! semester of the range in increasing order, and report each success to
//! a callback that decides whether to keep going.
//!
//! `schedule_best_available` resolves a single named requirement (and
//! its substitutes) with that loop, stopping at the first success.
//!
//! # Complexity
//! O(c · s) placement attempts where c = candidates, s = semesters.

use std::ops::{ControlFlow, Range};

use tracing::{debug, warn};

use super::ScheduleState;
use crate::dispatching::rank_by_rating;
use crate::models::Course;

/// Outcome of resolving a requirement.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A candidate name was already placed or completed; nothing changed.
    AlreadySatisfied,
    /// `course` was placed into `semester`.
    Placed { course: Course, semester: usize },
    /// No candidate fits any open semester.
    Unplaceable,
}

impl Resolution {
    /// Whether the requirement is now met.
    pub fn is_satisfied(&self) -> bool {
        !matches!(self, Self::Unplaceable)
    }

    /// The placed course, if this call placed one.
    pub fn placed(&self) -> Option<&Course> {
        match self {
            Self::Placed { course, .. } => Some(course),
            _ => None,
        }
    }
}

/// Places `ranked` courses in order, each into the first semester of
/// `semesters` that accepts it.
///
/// Courses already placed (by code or by name) are skipped. After each
/// placement `on_placed` is called with the course and its semester;
/// returning `ControlFlow::Break` ends the scan.
///
/// Returns the number of courses placed.
pub fn place_ranked<'c, F>(
    state: &mut ScheduleState,
    ranked: &[&'c Course],
    semesters: Range<usize>,
    mut on_placed: F,
) -> usize
where
    F: FnMut(&mut ScheduleState, &'c Course, usize) -> ControlFlow<()>,
{
    let mut placed = 0;
    for &course in ranked {
        if state.is_placed(course) {
            continue;
        }
        let Some(semester) = semesters.clone().find(|&s| state.try_place(course, s)) else {
            continue;
        };
        debug!(code = %course.code, name = %course.name, semester, "placed");
        placed += 1;
        if on_placed(state, course, semester).is_break() {
            break;
        }
    }
    placed
}

/// Places the best available course among those named `names`.
///
/// Short-circuits when any name is already placed. Otherwise ranks every
/// catalog entry carrying one of the names by rating (catalog order on
/// ties) and places the first one that fits an open semester. On failure
/// a warning naming `names[0]` is emitted and the state is unchanged.
pub fn schedule_best_available(
    state: &mut ScheduleState,
    catalog: &[Course],
    names: &[&str],
) -> Resolution {
    if state.any_placed(names) {
        return Resolution::AlreadySatisfied;
    }

    let ranked = rank_by_rating(catalog.iter().filter(|c| names.contains(&c.name.as_str())));
    let semesters = state.open_semesters();
    let mut result = None;
    place_ranked(state, &ranked, semesters, |_, course, semester| {
        result = Some((course.clone(), semester));
        ControlFlow::Break(())
    });

    match result {
        Some((course, semester)) => Resolution::Placed { course, semester },
        None => {
            let primary = names.first().copied().unwrap_or_default();
            warn!(
                course = primary,
                candidates = ranked.len(),
                "course (and its substitutes) cannot be placed: conflicts or credit limits"
            );
            Resolution::Unplaceable
        }
    }
}
