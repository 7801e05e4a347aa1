//! Phased course planner.
//!
//! # Algorithm
//!
//! A strict linear pipeline over one [`ScheduleState`]:
//!
//! 1. Preferred courses, each resolved by its own name.
//! 2. Required language courses for the declared proficiency.
//! 3. Elective-language quota, by rating.
//! 4. Core requirements, the selected science track and breadth picks,
//!    each with its substitutes.
//! 5. General education: one course per core theme, then any GE course
//!    until the credit target is reached.
//! 6. Departmental electives until the credit target is reached.
//! 7. Filler: each open semester is topped up to its cap.
//!
//! No phase aborts the pipeline. Requirements that cannot be placed are
//! reported in [`Timetable::unmet_requirements`].
//!
//! # Complexity
//! O(p · c · s) placement attempts, p = phases, c = catalog size,
//! s = semesters; the filler adds O(k · c) per semester for k placements.

use std::ops::ControlFlow;

use tracing::{info, instrument, warn};

use super::{
    place_ranked, schedule_best_available, InitialStateProjector, Quotas, Resolution,
    ScheduleState,
};
use crate::catalog::PreparedCatalog;
use crate::dispatching::rank_by_rating;
use crate::models::{
    Course, Requirement, RequirementCatalog, RequirementCategory, Settings, Timetable,
};

/// Input container for planning.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    /// Filtered course catalog.
    pub catalog: PreparedCatalog,
    /// Requirement table with substitutes attached.
    pub requirements: RequirementCatalog,
    /// Student settings.
    pub settings: Settings,
}

impl ScheduleRequest {
    /// Creates a new request.
    pub fn new(catalog: PreparedCatalog, requirements: RequirementCatalog, settings: Settings) -> Self {
        Self {
            catalog,
            requirements,
            settings,
        }
    }
}

/// Greedy multi-year course planner.
///
/// # Example
///
/// ```
/// use u_curriculum::catalog::PreparedCatalog;
/// use u_curriculum::models::{Course, Requirement, RequirementCatalog, Settings, SubstituteMap};
/// use u_curriculum::scheduler::{CourseScheduler, ScheduleRequest};
///
/// let catalog = PreparedCatalog::from_courses(vec![
///     Course::new("11210MATH101000", "微積分Ａ一", 4).with_schedule("M1M2"),
/// ]);
/// let requirements = RequirementCatalog::new()
///     .with_requirement(Requirement::core("微積分Ｂ一"))
///     .with_substitutes(SubstituteMap::standard());
///
/// let request = ScheduleRequest::new(catalog, requirements, Settings::default());
/// let timetable = CourseScheduler::new().schedule(&request);
///
/// assert!(timetable.contains("微積分Ａ一"));
/// assert!(timetable.fulfilled.contains("微積分Ｂ一"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CourseScheduler {
    quotas: Quotas,
}

impl CourseScheduler {
    /// Creates a planner with default quotas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quotas.
    pub fn with_quotas(mut self, quotas: Quotas) -> Self {
        self.quotas = quotas;
        self
    }

    /// The configured quotas.
    pub fn quotas(&self) -> &Quotas {
        &self.quotas
    }

    /// Plans all eight semesters.
    ///
    /// Always returns a timetable; unsatisfied requirements are listed in
    /// it rather than reported as errors.
    #[instrument(
        skip(self, request),
        fields(
            courses = request.catalog.courses.len(),
            requirements = request.requirements.len(),
            completed = request.settings.completed_courses.len()
        )
    )]
    pub fn schedule(&self, request: &ScheduleRequest) -> Timetable {
        let settings = &request.settings;
        let projection =
            InitialStateProjector::new(&request.catalog, &request.requirements, &self.quotas)
                .with_language_requirements(settings.language_requirements())
                .project(&settings.completed_courses, settings.completed_semesters);

        let mut run = PlanningRun {
            request,
            quotas: &self.quotas,
            state: ScheduleState::seeded(settings.credit_caps, &projection)
                .with_substitutes(request.requirements.substitutes.clone()),
            attempted: Vec::new(),
        };
        run.preferred();
        run.language();
        run.language_quota();
        run.requirements();
        run.general_education();
        run.electives();
        run.filler();
        run.finish()
    }
}

/// One planning run: the request, the state and the requirement log.
struct PlanningRun<'r> {
    request: &'r ScheduleRequest,
    quotas: &'r Quotas,
    state: ScheduleState,
    /// Requirement names attempted by phases 2 and 4, in order.
    attempted: Vec<String>,
}

impl<'r> PlanningRun<'r> {
    fn catalog(&self) -> &'r PreparedCatalog {
        &self.request.catalog
    }

    fn attempt(&mut self, name: &str) {
        if !self.attempted.iter().any(|n| n == name) {
            self.attempted.push(name.to_string());
        }
    }

    /// Phase 1: student-nominated courses.
    fn preferred(&mut self) {
        let catalog = self.catalog();
        let substitutes = &self.request.requirements.substitutes;
        let mut placed = 0;

        for name in &self.request.settings.wanted_courses {
            if self.state.is_fulfilled(name) || self.state.any_placed(&[name.as_str()]) {
                continue;
            }
            let Resolution::Placed { course, .. } =
                schedule_best_available(&mut self.state, &catalog.courses, &[name.as_str()])
            else {
                continue;
            };
            placed += 1;
            if catalog.is_general_education(name) {
                self.state.ge_credits += course.credits;
            }
            if let Some(base) = substitutes.base_of(name) {
                info!(course = %name, base, "substitute placed for base requirement");
            }
        }
        info!(phase = "preferred", placed, "phase complete");
    }

    /// Phase 2: required language courses.
    fn language(&mut self) {
        let catalog = self.catalog();
        let mut placed = 0;

        for name in self.request.settings.language_requirements() {
            self.attempt(&name);
            if self.state.is_fulfilled(&name) {
                continue;
            }
            let resolution = schedule_best_available(&mut self.state, &catalog.courses, &[name.as_str()]);
            if resolution.is_satisfied() {
                placed += usize::from(resolution.placed().is_some());
                self.state.mark_fulfilled([name]);
            }
        }
        info!(phase = "language", placed, "phase complete");
    }

    /// Phase 3: elective-language quota.
    fn language_quota(&mut self) {
        let catalog = self.catalog();
        let already = self
            .state
            .placed_courses()
            .filter(|c| catalog.is_language_elective(&c.name))
            .count();
        let needed = self
            .quotas
            .language_elective_count
            .saturating_sub(self.state.completed_language_electives + already);
        if needed == 0 {
            info!(phase = "language_quota", placed = 0, "quota already met");
            return;
        }

        let ranked = rank_by_rating(catalog.language_electives.iter());
        let range = self.state.open_semesters();
        let mut remaining = needed;
        let placed = place_ranked(&mut self.state, &ranked, range, |_, _, _| {
            remaining -= 1;
            if remaining == 0 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        if placed < needed {
            warn!(needed, placed, "elective-language quota not reached");
        }
        info!(phase = "language_quota", placed, "phase complete");
    }

    /// Phase 4: core, track and breadth requirements.
    fn requirements(&mut self) {
        let request = self.request;
        let catalog = &request.catalog;
        let table = &request.requirements;
        let queue: Vec<Requirement> = table
            .core()
            .chain(table.track(self.request.settings.track))
            .cloned()
            .chain(
                catalog
                    .breadth_picks
                    .iter()
                    .map(|name| table.requirement_for(name, RequirementCategory::Breadth)),
            )
            .collect();

        let mut placed = 0;
        for req in &queue {
            self.attempt(&req.name);
            if self.state.is_fulfilled(&req.name) {
                continue;
            }
            let names = req.candidate_names();
            let resolution = schedule_best_available(&mut self.state, &catalog.courses, &names);
            if resolution.is_satisfied() {
                placed += usize::from(resolution.placed().is_some());
                self.state.mark_fulfilled(names);
            }
        }
        info!(phase = "requirements", queued = queue.len(), placed, "phase complete");
    }

    /// Phase 5: general education.
    fn general_education(&mut self) {
        let catalog = self.catalog();
        let ranked = rank_by_rating(catalog.general_education.iter());
        let mut placed = 0;

        for theme in 1..=self.quotas.core_ge_themes {
            let themed: Vec<&Course> = ranked
                .iter()
                .copied()
                .filter(|c| c.is_core_ge_theme(theme))
                .collect();
            let range = self.state.open_semesters();
            placed += place_ranked(&mut self.state, &themed, range, |state, course, _| {
                state.ge_credits += course.credits;
                ControlFlow::Break(())
            });
        }

        let target = self.quotas.ge_credit_target;
        if self.state.ge_credits < target {
            let rest: Vec<&Course> = ranked.iter().copied().filter(|c| !c.is_core_ge()).collect();
            let range = self.state.open_semesters();
            placed += place_ranked(&mut self.state, &rest, range, |state, course, _| {
                state.ge_credits += course.credits;
                if state.ge_credits >= target {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
        }
        if self.state.ge_credits < target {
            warn!(credits = self.state.ge_credits, target, "general-education target not reached");
        }
        info!(phase = "general_education", placed, credits = self.state.ge_credits, "phase complete");
    }

    /// Phase 6: departmental electives.
    fn electives(&mut self) {
        let target = self.quotas.elective_credit_target;
        if self.state.elective_credits >= target {
            info!(phase = "electives", placed = 0, "quota already met");
            return;
        }

        let catalog = self.catalog();
        let quotas = self.quotas;
        let ranked = rank_by_rating(
            catalog
                .courses
                .iter()
                .filter(|c| quotas.is_departmental_elective(c)),
        );
        let range = self.state.open_semesters();
        let placed = place_ranked(&mut self.state, &ranked, range, |state, course, _| {
            state.elective_credits += course.credits;
            if state.elective_credits >= target {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        info!(phase = "electives", placed, credits = self.state.elective_credits, "phase complete");
    }

    /// Phase 7: top up each open semester to its cap.
    fn filler(&mut self) {
        let ranked = rank_by_rating(self.catalog().courses.iter());
        let mut placed = 0;

        for semester in self.state.open_semesters() {
            // A pass that places nothing ends the semester
            while !self.state.semesters[semester].is_full() {
                let n = place_ranked(&mut self.state, &ranked, semester..semester + 1, |_, _, _| {
                    ControlFlow::Break(())
                });
                if n == 0 {
                    break;
                }
                placed += n;
            }
        }
        info!(phase = "filler", placed, "phase complete");
    }

    fn finish(self) -> Timetable {
        let unmet: Vec<String> = self
            .attempted
            .iter()
            .filter(|name| !self.state.is_fulfilled(name))
            .cloned()
            .collect();
        for name in &unmet {
            warn!(requirement = %name, "requirement left unmet");
        }

        let timetable = self.state.into_timetable(unmet);
        info!(
            total_credits = timetable.total_credits,
            courses = timetable.course_count(),
            unmet = timetable.unmet_requirements.len(),
            "planning complete"
        );
        timetable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnglishLevel, SubstituteMap, SEMESTER_COUNT};

    fn quiet_settings(caps: [u32; SEMESTER_COUNT]) -> Settings {
        Settings {
            credit_caps: caps,
            english_level: EnglishLevel::Exempt,
            ..Settings::default()
        }
    }

    fn no_quotas() -> Quotas {
        Quotas {
            ge_credit_target: 0,
            elective_credit_target: 0,
            language_elective_count: 0,
            ..Quotas::default()
        }
    }

    #[test]
    fn test_conflict_moves_to_next_semester() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("CS101", "A", 4).with_schedule("M1T2").with_rating(9.0),
            Course::new("CS102", "B", 4).with_schedule("M1").with_rating(5.0),
        ]);
        let request = ScheduleRequest::new(
            catalog,
            RequirementCatalog::new(),
            quiet_settings([8, 8, 0, 0, 0, 0, 0, 0]),
        );
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert_eq!(t.semesters[0].course_names(), vec!["A"]);
        assert_eq!(t.semesters[0].credits, 4);
        assert_eq!(t.semesters[1].course_names(), vec!["B"]);
        assert_eq!(t.total_credits, 8);
    }

    #[test]
    fn test_substitute_fulfills_base() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("M1", "X-alt", 3).with_schedule("W2"),
        ]);
        let requirements = RequirementCatalog::new()
            .with_requirement(Requirement::core("X"))
            .with_substitutes(SubstituteMap::new().with_group("X", ["X-alt"]));
        let request = ScheduleRequest::new(catalog, requirements, quiet_settings([20; SEMESTER_COUNT]));
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert!(t.contains("X-alt"));
        assert!(t.fulfilled.contains("X"));
        assert!(t.fulfilled.contains("X-alt"));
        assert!(t.unmet_requirements.is_empty());
    }

    #[test]
    fn test_preferred_substitute_skips_base() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("P1", "微積分Ｂ一", 4).with_schedule("M1").with_rating(9.0),
            Course::new("P2", "微積分Ａ一", 4).with_schedule("T1").with_rating(1.0),
        ]);
        let requirements = RequirementCatalog::new()
            .with_requirement(Requirement::core("微積分Ｂ一"))
            .with_substitutes(SubstituteMap::standard());
        let mut settings = quiet_settings([20; SEMESTER_COUNT]);
        settings.wanted_courses = vec!["微積分Ａ一".into()];

        let request = ScheduleRequest::new(catalog, requirements, settings);
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert!(t.contains("微積分Ａ一"));
        assert!(!t.contains("微積分Ｂ一"));
    }

    #[test]
    fn test_preferred_base_skips_substitute() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("P1", "微積分Ｂ一", 4).with_schedule("M1").with_rating(1.0),
            Course::new("P2", "微積分Ａ一", 4).with_schedule("T1").with_rating(9.0),
        ]);
        let mut settings = quiet_settings([20; SEMESTER_COUNT]);
        settings.wanted_courses = vec!["微積分Ｂ一".into()];
        let requirements = RequirementCatalog::new().with_substitutes(SubstituteMap::standard());

        let request = ScheduleRequest::new(catalog, requirements, settings);
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert!(t.contains("微積分Ｂ一"));
        assert!(!t.contains("微積分Ａ一"));
        assert!(t.fulfilled.contains("微積分Ａ一"));
    }

    #[test]
    fn test_filler_keeps_unrequired_group_exclusive() {
        // No requirement row names the physics series
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("P1", "普通物理Ｂ一", 3).with_schedule("M1").with_rating(5.0),
            Course::new("P2", "普通物理Ａ一", 3).with_schedule("T1").with_rating(4.0),
        ]);
        let requirements = RequirementCatalog::new().with_substitutes(SubstituteMap::standard());
        let mut settings = quiet_settings([20; SEMESTER_COUNT]);
        settings.track = crate::models::ScienceTrack::Chemistry;

        let request = ScheduleRequest::new(catalog, requirements, settings);
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert!(t.contains("普通物理Ｂ一"));
        assert!(!t.contains("普通物理Ａ一"));
    }

    #[test]
    fn test_unmet_requirement_reported() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("C1", "Huge", 30).with_schedule("M1"),
        ]);
        let requirements = RequirementCatalog::new().with_requirement(Requirement::core("Huge"));
        let request = ScheduleRequest::new(catalog, requirements, quiet_settings([20; SEMESTER_COUNT]));
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert_eq!(t.unmet_requirements, vec!["Huge"]);
        assert_eq!(t.course_count(), 0);
    }

    #[test]
    fn test_core_ge_one_per_theme() {
        let ge = |code: &str, name: &str, theme: usize, rating: f64, slot: &str| {
            Course::new(code, name, 2)
                .with_schedule(slot)
                .with_rating(rating)
                .with_ge_category(format!("核心通識CoreGEcourses{theme}"))
        };
        let catalog = PreparedCatalog::from_courses(vec![
            ge("11210GEC 100100", "T1a", 1, 5.0, "M1"),
            ge("11210GEC 100200", "T1b", 1, 9.0, "M2"),
            ge("11210GEC 100300", "T2a", 2, 1.0, "M3"),
        ]);
        let request = ScheduleRequest::new(
            catalog,
            RequirementCatalog::new(),
            quiet_settings([20, 0, 0, 0, 0, 0, 0, 0]),
        );
        let quotas = Quotas {
            ge_credit_target: 0,
            ..no_quotas()
        };
        let t = CourseScheduler::new().with_quotas(quotas).schedule(&request);

        assert!(t.contains("T1b"));
        assert!(t.contains("T2a"));
        assert_eq!(t.ge_credits, 4);
        // T1a only arrives through the filler, which does not count GE credit
        assert!(t.contains("T1a"));
        assert_eq!(t.semesters[0].credits, 6);
    }

    #[test]
    fn test_elective_quota_stops_at_target() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("11210CS 400100", "E1", 3).with_schedule("M1").with_rating(9.0),
            Course::new("11210CS 400200", "E2", 3).with_schedule("M2").with_rating(8.0),
            Course::new("11210CS 400300", "E3", 3).with_schedule("M3").with_rating(7.0),
        ]);
        let quotas = Quotas {
            elective_credit_target: 6,
            ..no_quotas()
        };
        let request = ScheduleRequest::new(
            catalog,
            RequirementCatalog::new(),
            quiet_settings([0, 0, 0, 0, 0, 0, 0, 0]),
        );
        let t = CourseScheduler::new().with_quotas(quotas.clone()).schedule(&request);
        // No capacity anywhere
        assert_eq!(t.elective_credits, 0);

        let request = ScheduleRequest::new(
            request.catalog.clone(),
            RequirementCatalog::new(),
            quiet_settings([0, 0, 0, 0, 0, 0, 6, 0]),
        );
        let t = CourseScheduler::new().with_quotas(quotas).schedule(&request);
        assert_eq!(t.elective_credits, 6);
        assert_eq!(t.semesters[6].course_names(), vec!["E1", "E2"]);
    }

    #[test]
    fn test_language_quota_counts_completed() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("11210LANG100100", "小說選讀", 2).with_schedule("M1").with_rating(3.0),
            Course::new("11210LANG100200", "中英口譯", 2).with_schedule("T1").with_rating(4.0),
        ]);
        let mut settings = quiet_settings([4, 0, 0, 0, 0, 0, 0, 0]);
        settings.completed_courses = vec!["演說與簡報".into()];
        let quotas = Quotas {
            language_elective_count: 2,
            ..no_quotas()
        };
        let catalog = catalog.clone().with_language_electives(
            catalog
                .language_electives
                .iter()
                .cloned()
                .chain(std::iter::once(Course::new("X", "演說與簡報", 2)))
                .collect(),
        );
        let request = ScheduleRequest::new(catalog, RequirementCatalog::new(), settings);
        let t = CourseScheduler::new().with_quotas(quotas).schedule(&request);

        // One completed, one placed by rating; the filler adds the other
        assert_eq!(t.semesters[0].course_names(), vec!["中英口譯", "小說選讀"]);
    }

    #[test]
    fn test_completed_semesters_closed() {
        let catalog = PreparedCatalog::from_courses(vec![
            Course::new("C1", "A", 3).with_schedule("M1"),
            Course::new("C2", "B", 3).with_schedule("M2"),
        ]);
        let mut settings = quiet_settings([20; SEMESTER_COUNT]);
        settings.completed_semesters = 3;
        settings.completed_courses = vec!["B".into()];
        let request = ScheduleRequest::new(catalog, RequirementCatalog::new(), settings);
        let t = CourseScheduler::new().with_quotas(no_quotas()).schedule(&request);

        assert_eq!(t.first_open_semester, 3);
        assert!(t.semesters[..3].iter().all(|s| s.courses.is_empty()));
        assert_eq!(t.semester_of("A"), Some(3));
        assert!(!t.contains("B"));
        assert_eq!(t.carried_credits, 3);
        assert_eq!(t.total_credits, 6);
    }
}
