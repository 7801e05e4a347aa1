//! Course timetable planner.
//!
//! Builds a four-year (eight-semester) course plan for a student by
//! greedily placing catalog entries into semester slots under credit,
//! time-conflict, requirement, and preference constraints.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `WeekGrid`, `Requirement`,
//!   `SubstituteMap`, `Settings`, `Timetable`
//! - **`dispatching`**: Candidate ranking (rating descending, catalog order on ties)
//! - **`scheduler`**: Placement primitive, requirement resolver,
//!   initial-state projector and the phased `CourseScheduler`
//! - **`catalog`**: CSV loading and the pure catalog filter
//! - **`validation`**: Settings and catalog integrity checks
//!
//! # Architecture
//!
//! The engine (`scheduler`) is synchronous and deterministic: identical
//! catalog, requirements and settings always produce the same timetable.
//! Loading and filtering run once beforehand; the engine never touches I/O.
//!
//! # Example
//!
//! ```
//! use u_curriculum::catalog::PreparedCatalog;
//! use u_curriculum::models::{Course, RequirementCatalog, Settings};
//! use u_curriculum::scheduler::{CourseScheduler, ScheduleRequest};
//!
//! let catalog = PreparedCatalog::from_courses(vec![
//!     Course::new("CS101", "A", 4).with_schedule("M1T2").with_rating(9.0),
//!     Course::new("CS102", "B", 4).with_schedule("M1").with_rating(5.0),
//! ]);
//! let mut settings = Settings::default();
//! settings.credit_caps = [8, 8, 0, 0, 0, 0, 0, 0];
//! settings.english_level = u_curriculum::models::EnglishLevel::Exempt;
//!
//! let request = ScheduleRequest::new(catalog, RequirementCatalog::new(), settings);
//! let timetable = CourseScheduler::new().schedule(&request);
//! assert_eq!(timetable.semesters[0].course_names(), vec!["A"]);
//! assert_eq!(timetable.semesters[1].course_names(), vec!["B"]);
//! ```

pub mod catalog;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::PlannerError;
