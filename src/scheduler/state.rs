//! Mutable planning state.
//!
//! `ScheduleState` is created once per planning run, threaded through
//! every phase in order, and finally converted into a [`Timetable`].

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

use super::projector::InitialProjection;
use crate::models::{Course, SemesterPlan, SubstituteMap, Timetable, WeekGrid, SEMESTER_COUNT};

/// Occupancy and credit totals of one semester.
#[derive(Debug, Clone, PartialEq)]
pub struct SemesterState {
    /// Credit cap.
    pub cap: u32,
    /// Accumulated credits.
    pub credits: u32,
    /// Weekly occupancy.
    pub grid: WeekGrid,
    /// Placed courses in placement order.
    pub courses: Vec<Course>,
}

impl SemesterState {
    fn new(cap: u32) -> Self {
        Self {
            cap,
            credits: 0,
            grid: WeekGrid::new(),
            courses: Vec::new(),
        }
    }

    /// Whether the semester reached its cap.
    pub fn is_full(&self) -> bool {
        self.credits >= self.cap
    }

    /// Names of placed courses in placement order.
    pub fn course_names(&self) -> Vec<&str> {
        self.courses.iter().map(|c| c.name.as_str()).collect()
    }
}

/// The accumulator threaded through every planning phase.
#[derive(Debug, Clone)]
pub struct ScheduleState {
    /// Per-semester occupancy.
    pub semesters: Vec<SemesterState>,
    /// Semesters below this index are historical and closed.
    pub first_open: usize,
    /// Codes of placed offerings.
    pub placed_codes: HashSet<String>,
    /// Names of placed or previously completed courses.
    pub placed_names: HashSet<String>,
    /// Requirement names considered met.
    pub fulfilled: BTreeSet<String>,
    /// General-education credit counter.
    pub ge_credits: u32,
    /// Departmental elective credit counter.
    pub elective_credits: u32,
    /// Credits of completed courses.
    pub carried_credits: u32,
    /// Completed elective-language courses.
    pub completed_language_electives: usize,
    /// Equivalence groups; placing any member fulfils the whole group.
    pub substitutes: SubstituteMap,
}

impl ScheduleState {
    /// Creates an empty state with the given caps.
    pub fn new(caps: [u32; SEMESTER_COUNT]) -> Self {
        Self {
            semesters: caps.iter().map(|&cap| SemesterState::new(cap)).collect(),
            first_open: 0,
            placed_codes: HashSet::new(),
            placed_names: HashSet::new(),
            fulfilled: BTreeSet::new(),
            ge_credits: 0,
            elective_credits: 0,
            carried_credits: 0,
            completed_language_electives: 0,
            substitutes: SubstituteMap::new(),
        }
    }

    /// Sets the substitute groups consulted on placement.
    pub fn with_substitutes(mut self, substitutes: SubstituteMap) -> Self {
        self.substitutes = substitutes;
        self
    }

    /// Creates a state seeded from a completed-course projection.
    ///
    /// Nothing is written to any grid; only counters, the fulfilled set
    /// and the completed names are carried over.
    pub fn seeded(caps: [u32; SEMESTER_COUNT], projection: &InitialProjection) -> Self {
        let mut state = Self::new(caps);
        state.first_open = projection.first_open_semester.min(SEMESTER_COUNT);
        state.placed_names.extend(projection.completed.iter().cloned());
        state.fulfilled.extend(projection.fulfilled.iter().cloned());
        state.ge_credits = projection.ge_credits;
        state.elective_credits = projection.elective_credits;
        state.carried_credits = projection.carried_credits;
        state.completed_language_electives = projection.language_electives_done;
        state
    }

    /// Semester indices open to new placement.
    pub fn open_semesters(&self) -> Range<usize> {
        self.first_open..SEMESTER_COUNT
    }

    /// Whether this offering, or a course of the same name, is already
    /// placed or completed, or its name belongs to a fulfilled group.
    pub fn is_placed(&self, course: &Course) -> bool {
        self.placed_codes.contains(&course.code)
            || self.placed_names.contains(&course.name)
            || self.fulfilled.contains(&course.name)
    }

    /// Whether any of `names` is already placed (or completed).
    pub fn any_placed(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.placed_names.contains(*n))
    }

    /// Whether the requirement `name` is met.
    pub fn is_fulfilled(&self, name: &str) -> bool {
        self.fulfilled.contains(name)
    }

    /// Marks `name`'s substitute group fulfilled if it has one.
    pub(crate) fn fulfil_group(&mut self, name: &str) {
        let group = self.substitutes.group_of(name);
        if group.len() > 1 {
            self.fulfilled.extend(group);
        }
    }

    /// Marks every name as fulfilled.
    pub fn mark_fulfilled<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fulfilled.extend(names.into_iter().map(Into::into));
    }

    /// Placed courses across all semesters.
    pub fn placed_courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter())
    }

    /// Credits placed in this run.
    pub fn placed_credits(&self) -> u32 {
        self.semesters.iter().map(|s| s.credits).sum()
    }

    /// Converts the state into the final timetable.
    pub fn into_timetable(self, unmet_requirements: Vec<String>) -> Timetable {
        let placed = self.placed_credits();
        let semesters = self
            .semesters
            .into_iter()
            .enumerate()
            .map(|(index, s)| SemesterPlan {
                index,
                cap: s.cap,
                credits: s.credits,
                courses: s.courses,
            })
            .collect();

        Timetable {
            semesters,
            carried_credits: self.carried_credits,
            total_credits: placed + self.carried_credits,
            fulfilled: self.fulfilled,
            unmet_requirements,
            ge_credits: self.ge_credits,
            elective_credits: self.elective_credits,
            first_open_semester: self.first_open,
        }
    }
}
