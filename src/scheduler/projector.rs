//! Initial-state projection from a completed-course history.
//!
//! Completed courses are never drawn onto a grid. They only seed the
//! fulfilled set, the quota counters and the first semester open to new
//! placement.

use std::collections::BTreeSet;

use tracing::debug;

use super::Quotas;
use crate::catalog::PreparedCatalog;
use crate::models::{RequirementCatalog, SEMESTER_COUNT};

/// Counters and sets derived from completed courses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialProjection {
    /// Semesters below this index are historical.
    pub first_open_semester: usize,
    /// Completed course names, deduplicated, in input order.
    pub completed: Vec<String>,
    /// Requirement names already met.
    pub fulfilled: BTreeSet<String>,
    /// Credits of completed courses found in the catalog.
    pub carried_credits: u32,
    /// General-education credits already earned.
    pub ge_credits: u32,
    /// Departmental elective credits already earned.
    pub elective_credits: u32,
    /// Required language courses already completed.
    pub required_language_done: usize,
    /// Elective-language courses already completed.
    pub language_electives_done: usize,
}

/// Projects a completed-course history onto the planner's counters.
#[derive(Debug, Clone)]
pub struct InitialStateProjector<'a> {
    catalog: &'a PreparedCatalog,
    requirements: &'a RequirementCatalog,
    quotas: &'a Quotas,
    language_requirements: Vec<String>,
}

impl<'a> InitialStateProjector<'a> {
    /// Creates a projector over the given tables.
    pub fn new(
        catalog: &'a PreparedCatalog,
        requirements: &'a RequirementCatalog,
        quotas: &'a Quotas,
    ) -> Self {
        Self {
            catalog,
            requirements,
            quotas,
            language_requirements: Vec::new(),
        }
    }

    /// Sets the required language course names.
    pub fn with_language_requirements(mut self, names: Vec<String>) -> Self {
        self.language_requirements = names;
        self
    }

    /// Projects `completed` course names.
    ///
    /// Credits come from the first catalog course of each name; names
    /// absent from the catalog still mark requirements fulfilled but
    /// carry no credit.
    pub fn project(&self, completed: &[String], completed_semesters: usize) -> InitialProjection {
        let mut projection = InitialProjection {
            first_open_semester: completed_semesters.min(SEMESTER_COUNT),
            ..InitialProjection::default()
        };

        for name in completed {
            if projection.completed.contains(name) {
                continue;
            }
            projection.completed.push(name.clone());

            let substitutes = &self.requirements.substitutes;
            if self.requirements.names(name)
                || substitutes.base_of(name).is_some()
                || !substitutes.substitutes_of(name).is_empty()
                || self.catalog.breadth_picks.contains(name)
            {
                projection.fulfilled.extend(substitutes.group_of(name));
            }
            if self.language_requirements.contains(name) {
                projection.fulfilled.insert(name.clone());
                projection.required_language_done += 1;
            }
            if self.catalog.is_language_elective(name) {
                projection.language_electives_done += 1;
            }

            let Some(course) = self.catalog.find(name) else {
                debug!(course = %name, "completed course not in catalog, no credit carried");
                continue;
            };
            projection.carried_credits += course.credits;
            if self.catalog.is_general_education(name) {
                projection.ge_credits += course.credits;
            }
            if self.quotas.is_departmental_elective(course) && !self.requirements.is_core(name) {
                projection.elective_credits += course.credits;
            }
        }

        debug!(
            completed = projection.completed.len(),
            fulfilled = projection.fulfilled.len(),
            carried = projection.carried_credits,
            first_open = projection.first_open_semester,
            "initial state projected"
        );
        projection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Course, Requirement, SubstituteMap};

    fn fixture() -> (PreparedCatalog, RequirementCatalog) {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("11210CS 135500", "計算機程式設計一", 3),
            Course::new("11210CS 340400", "作業系統", 3),
            Course::new("11210CS 542100", "機器學習", 3),
            Course::new("11210MATH101000", "微積分Ａ一", 4),
            Course::new("11210GEC 120100", "哲學概論", 2),
            Course::new("11210LANG200100", "小說選讀", 2),
        ]);
        let requirements = RequirementCatalog::new()
            .with_requirement(Requirement::core("計算機程式設計一"))
            .with_requirement(Requirement::core("作業系統"))
            .with_requirement(Requirement::core("微積分Ｂ一"))
            .with_substitutes(SubstituteMap::standard());
        (catalog, requirements)
    }

    #[test]
    fn test_projection_counters() {
        let (catalog, requirements) = fixture();
        let quotas = Quotas::default();
        let projection = InitialStateProjector::new(&catalog, &requirements, &quotas)
            .with_language_requirements(vec!["大學中文".into()])
            .project(
                &[
                    "計算機程式設計一".into(),
                    "機器學習".into(),
                    "哲學概論".into(),
                    "小說選讀".into(),
                    "大學中文".into(),
                ],
                2,
            );

        assert_eq!(projection.first_open_semester, 2);
        assert!(projection.fulfilled.contains("計算機程式設計一"));
        assert!(projection.fulfilled.contains("大學中文"));
        assert_eq!(projection.required_language_done, 1);
        assert_eq!(projection.language_electives_done, 1);
        assert_eq!(projection.ge_credits, 2);
        // Core courses do not count toward the elective quota
        assert_eq!(projection.elective_credits, 3);
        // 大學中文 is not in the catalog: no credit
        assert_eq!(projection.carried_credits, 3 + 3 + 2 + 2);
    }

    #[test]
    fn test_substitute_fulfills_group() {
        let (catalog, requirements) = fixture();
        let quotas = Quotas::default();
        let projection = InitialStateProjector::new(&catalog, &requirements, &quotas)
            .project(&["微積分Ａ一".into()], 0);

        assert!(projection.fulfilled.contains("微積分Ｂ一"));
        assert!(projection.fulfilled.contains("微積分一(數學系)"));
        assert!(projection.fulfilled.contains("微積分Ａ一"));
        assert_eq!(projection.carried_credits, 4);
    }

    #[test]
    fn test_completed_base_outside_table_fulfills_group() {
        let (catalog, requirements) = fixture();
        let quotas = Quotas::default();
        let projection = InitialStateProjector::new(&catalog, &requirements, &quotas)
            .project(&["普通物理Ｂ一".into()], 0);

        assert!(projection.fulfilled.contains("普通物理Ａ一"));
        assert!(projection.fulfilled.contains("普通物理一(物理系)"));
    }

    #[test]
    fn test_duplicates_and_semester_clamp() {
        let (catalog, requirements) = fixture();
        let quotas = Quotas::default();
        let projection = InitialStateProjector::new(&catalog, &requirements, &quotas)
            .project(&["作業系統".into(), "作業系統".into()], 11);

        assert_eq!(projection.completed, vec!["作業系統"]);
        assert_eq!(projection.carried_credits, 3);
        assert_eq!(projection.elective_credits, 0);
        assert_eq!(projection.first_open_semester, SEMESTER_COUNT);
    }
}
