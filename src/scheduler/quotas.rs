//! Credit and count quotas for the best-effort phases.

use serde::{Deserialize, Serialize};

use crate::models::Course;

/// Quota configuration.
///
/// Defaults reproduce the degree rules the planner was built for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotas {
    /// General-education credits to reach.
    pub ge_credit_target: u32,
    /// Departmental elective credits to reach.
    pub elective_credit_target: u32,
    /// Elective-language courses required in total.
    pub language_elective_count: usize,
    /// Number of thematic core-GE categories (each gets at most one course).
    pub core_ge_themes: usize,
    /// Code substrings that mark a departmental elective.
    pub elective_prefixes: Vec<String>,
    /// Name fragments that exclude a course from the elective quota.
    pub excluded_elective_fragments: Vec<String>,
    /// Total credits needed to graduate.
    pub graduation_credits: u32,
}

impl Default for Quotas {
    fn default() -> Self {
        Self {
            ge_credit_target: 20,
            elective_credit_target: 12,
            language_elective_count: 2,
            core_ge_themes: 4,
            elective_prefixes: ["EE", "CS", "ISA", "COM"].map(String::from).to_vec(),
            excluded_elective_fragments: ["專題", "書報討論"].map(String::from).to_vec(),
            graduation_credits: 128,
        }
    }
}

impl Quotas {
    /// Whether `course` counts toward the departmental elective quota.
    pub fn is_departmental_elective(&self, course: &Course) -> bool {
        self.elective_prefixes.iter().any(|p| course.code.contains(p.as_str()))
            && !self
                .excluded_elective_fragments
                .iter()
                .any(|f| course.name.contains(f.as_str()))
    }
}
