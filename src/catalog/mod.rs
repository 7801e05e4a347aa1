//! Catalog loading and filtering.
//!
//! Raw course and requirement tables are read once from CSV
//! ([`loader`]), then narrowed by pure functions ([`filter`]) into the
//! [`PreparedCatalog`] the planner consumes. No step mutates a shared
//! table; every narrowing returns a new view.

pub mod filter;
pub mod loader;

pub use filter::{prepare_catalog, CourseRecord};
pub use loader::{load_course_table, load_requirement_table, read_course_table, read_requirement_table};

use serde::{Deserialize, Serialize};

use crate::models::{is_english_elective, Course, GE_CODE_MARKER};

/// The filtered catalog handed to the planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreparedCatalog {
    /// Every course usable by this student, in catalog order.
    pub courses: Vec<Course>,
    /// General-education candidates.
    pub general_education: Vec<Course>,
    /// Courses counting toward the elective-language quota.
    pub language_electives: Vec<Course>,
    /// Pre-selected breadth elective names, best first.
    pub breadth_picks: Vec<String>,
}

impl PreparedCatalog {
    /// Builds a catalog from plain courses.
    ///
    /// GE candidates are the courses with a GE code or GE tag; language
    /// electives are the English electives. No breadth picks.
    pub fn from_courses(courses: Vec<Course>) -> Self {
        let general_education = courses
            .iter()
            .filter(|c| c.code.contains(GE_CODE_MARKER) || c.ge_category.is_some())
            .cloned()
            .collect();
        let language_electives = courses
            .iter()
            .filter(|c| is_english_elective(&c.name))
            .cloned()
            .collect();
        Self {
            courses,
            general_education,
            language_electives,
            breadth_picks: Vec::new(),
        }
    }

    /// Replaces the GE candidates.
    pub fn with_general_education(mut self, courses: Vec<Course>) -> Self {
        self.general_education = courses;
        self
    }

    /// Replaces the elective-language candidates.
    pub fn with_language_electives(mut self, courses: Vec<Course>) -> Self {
        self.language_electives = courses;
        self
    }

    /// Sets the breadth picks.
    pub fn with_breadth_picks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.breadth_picks = names.into_iter().map(Into::into).collect();
        self
    }

    /// First course named `name`, searching the main catalog then GE.
    pub fn find(&self, name: &str) -> Option<&Course> {
        self.courses
            .iter()
            .chain(self.general_education.iter())
            .find(|c| c.name == name)
    }

    /// Whether a GE candidate is named `name`.
    pub fn is_general_education(&self, name: &str) -> bool {
        self.general_education.iter().any(|c| c.name == name)
    }

    /// Whether an elective-language candidate is named `name`.
    pub fn is_language_elective(&self, name: &str) -> bool {
        self.language_electives.iter().any(|c| c.name == name)
    }
}
