//! Candidate ranking rules and rule engine.
//!
//! Every placement phase scans candidates "best first". The order is
//! produced here: rules score courses, the engine sorts stably so that
//! ties keep catalog order. This stability is what makes planning
//! deterministic.
//!
//! # Usage
//!
//! ```
//! use u_curriculum::dispatching::{rules, RankingEngine};
//! use u_curriculum::models::Course;
//!
//! let courses = vec![
//!     Course::new("C1", "low", 3).with_rating(1.0),
//!     Course::new("C2", "high", 3).with_rating(9.0),
//! ];
//! let engine = RankingEngine::new().with_rule(rules::HighestRating);
//! let ranked = engine.rank(&courses);
//! assert_eq!(ranked[0].name, "high");
//! ```

mod engine;
pub mod rules;

pub use engine::{rank_by_rating, RankingEngine};

use crate::models::Course;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = ranked earlier.
pub type RuleScore = f64;

/// A rule that scores a candidate course.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "RATING").
    fn name(&self) -> &'static str;

    /// Scores a course; lower = ranked earlier.
    fn evaluate(&self, course: &Course) -> RuleScore;
}
