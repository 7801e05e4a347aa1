//! Course (catalog entry) model.
//!
//! A course is one offered section from the filtered catalog. Several
//! sections may share a name; names carry semantic identity for
//! requirements, codes identify a single offering.
//!
//! # Code Layout
//!
//! Course codes end in a six-character course number whose first digit
//! is the intended academic year, e.g. `11210CS 235100` → year 2.
//! General-education codes carry the `GEC` marker and are exempt from
//! year alignment.

use serde::{Deserialize, Serialize};

/// Marker substring identifying general-education course codes.
pub const GE_CODE_MARKER: &str = "GEC";

/// Category prefix shared by all thematic core-GE tags.
pub const CORE_GE_PREFIX: &str = "核心通識";

/// Offset (from the end of the code) of the intended-year digit.
const YEAR_DIGIT_FROM_END: usize = 6;

/// A catalog course offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique offering code.
    pub code: String,
    /// Course name (shared by equivalent sections).
    pub name: String,
    /// Owning department.
    pub department: String,
    /// Credit value.
    pub credits: u32,
    /// Instructor name (may be empty).
    pub instructor: String,
    /// Tie-break priority; higher is placed first.
    pub rating: f64,
    /// Weekly meeting slots as weekday/period letter pairs (e.g. `M1T2`).
    pub schedule: String,
    /// General-education category tag, if any.
    pub ge_category: Option<String>,
}

impl Course {
    /// Creates a course with the given code, name and credit value.
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            department: String::new(),
            credits,
            instructor: String::new(),
            rating: 0.0,
            schedule: String::new(),
            ge_category: None,
        }
    }

    /// Sets the owning department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the schedule code.
    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    /// Sets the general-education category tag.
    pub fn with_ge_category(mut self, category: impl Into<String>) -> Self {
        self.ge_category = Some(category.into());
        self
    }

    /// Whether the code carries the general-education marker.
    pub fn is_general_education_code(&self) -> bool {
        self.code.contains(GE_CODE_MARKER)
    }

    /// Intended academic year encoded in the code, if any.
    ///
    /// Codes too short to reach the digit, or with a non-digit at that
    /// position, carry no year constraint. A zero digit also means none.
    pub fn intended_year(&self) -> Option<u32> {
        let digit = self.code.chars().rev().nth(YEAR_DIGIT_FROM_END - 1)?;
        digit.to_digit(10).filter(|&year| year > 0)
    }

    /// Whether the GE tag names thematic core category `theme` (1-based).
    pub fn is_core_ge_theme(&self, theme: usize) -> bool {
        let tag = format!("{CORE_GE_PREFIX}CoreGEcourses{theme}");
        // Substring match: the category cell may list several tags, and
        // theme 1 also matches a `...CoreGEcourses10` tag.
        self.ge_category
            .as_deref()
            .is_some_and(|category| category.contains(&tag))
    }

    /// Whether the GE tag names any thematic core category.
    pub fn is_core_ge(&self) -> bool {
        self.ge_category
            .as_deref()
            .is_some_and(|category| category.contains(CORE_GE_PREFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("11210CS 235100", "資料結構", 3)
            .with_department("資訊工程學系")
            .with_instructor("王")
            .with_rating(4.5)
            .with_schedule("M3M4R3");

        assert_eq!(c.code, "11210CS 235100");
        assert_eq!(c.credits, 3);
        assert_eq!(c.department, "資訊工程學系");
        assert!((c.rating - 4.5).abs() < 1e-10);
        assert!(c.ge_category.is_none());
    }

    #[test]
    fn test_intended_year() {
        assert_eq!(Course::new("11210CS 235100", "X", 3).intended_year(), Some(2));
        assert_eq!(Course::new("11210EE 100100", "X", 3).intended_year(), Some(1));
    }

    #[test]
    fn test_intended_year_absent() {
        // Too short to reach the digit
        assert_eq!(Course::new("CS101", "X", 3).intended_year(), None);
        // Non-digit at the offset
        assert_eq!(Course::new("11210CS  35100", "X", 3).intended_year(), None);
        // Zero means unconstrained
        assert_eq!(Course::new("11210CS 035100", "X", 3).intended_year(), None);
    }

    #[test]
    fn test_ge_marker() {
        assert!(Course::new("11210GEC 120100", "X", 2).is_general_education_code());
        assert!(!Course::new("11210CS 120100", "X", 2).is_general_education_code());
    }

    #[test]
    fn test_core_ge_theme() {
        let c = Course::new("G1", "X", 2).with_ge_category("核心通識CoreGEcourses3 思維方式");
        assert!(c.is_core_ge());
        assert!(c.is_core_ge_theme(3));
        assert!(!c.is_core_ge_theme(1));

        let wide = Course::new("G4", "W", 2).with_ge_category("核心通識CoreGEcourses10");
        assert!(wide.is_core_ge_theme(1));

        let plain = Course::new("G2", "Y", 2).with_ge_category("自然科學");
        assert!(!plain.is_core_ge());
        assert!(!Course::new("G3", "Z", 2).is_core_ge());
    }
}
