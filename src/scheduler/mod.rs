//! Greedy course planner and progress evaluation.
//!
//! Provides the placement primitive, the ranked requirement resolver, the
//! initial-state projector and the phased planner built on them.
//!
//! # Algorithm
//!
//! `CourseScheduler` runs seven ordered phases over one `ScheduleState`.
//! Each phase ranks its candidates by rating and places each course into
//! the earliest open semester whose credit cap, weekly grid and year
//! alignment accept it. It is not optimal, but it is deterministic and
//! always terminates.
//!
//! # Progress
//!
//! `ProgressReport` computes credit totals and quota shortfalls of the
//! resulting timetable.

mod placement;
mod planner;
mod progress;
mod projector;
mod quotas;
mod resolver;
mod state;

pub use placement::Rejection;
pub use planner::{CourseScheduler, ScheduleRequest};
pub use progress::ProgressReport;
pub use projector::{InitialProjection, InitialStateProjector};
pub use quotas::Quotas;
pub use resolver::{place_ranked, schedule_best_available, Resolution};
pub use state::{ScheduleState, SemesterState};
