//! Rule engine for candidate ranking.
//!
//! Applies rules in sequence, consulting the next rule only on ties.
//! When every rule ties, the original (catalog) order is kept.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, RankingRule};
use crate::models::Course;

/// A composable, stable ranking engine.
///
/// # Example
/// ```
/// use u_curriculum::dispatching::{rules, RankingEngine};
/// use u_curriculum::models::Course;
///
/// let courses = vec![
///     Course::new("C1", "A", 3).with_rating(2.0),
///     Course::new("C2", "B", 3).with_rating(7.0),
/// ];
/// let engine = RankingEngine::new().with_rule(rules::HighestRating);
/// let ranked = engine.rank(&courses);
/// assert_eq!(ranked[0].code, "C2");
/// ```
#[derive(Clone)]
pub struct RankingEngine {
    rules: Vec<Arc<dyn RankingRule>>,
}

impl RankingEngine {
    /// Creates an empty engine (keeps input order).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule; later rules only break ties of earlier ones.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Returns references to `courses`, best first (stable).
    pub fn rank<'c, I>(&self, courses: I) -> Vec<&'c Course>
    where
        I: IntoIterator<Item = &'c Course>,
    {
        let mut ranked: Vec<&Course> = courses.into_iter().collect();
        ranked.sort_by(|a, b| self.compare(a, b));
        ranked
    }

    fn compare(&self, a: &Course, b: &Course) -> Ordering {
        for rule in &self.rules {
            // Rules never return NaN, so this is a total order.
            match rule.evaluate(a).partial_cmp(&rule.evaluate(b)) {
                Some(Ordering::Equal) | None => continue,
                Some(ordering) => return ordering,
            }
        }
        Ordering::Equal
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Ranks courses by rating descending, keeping catalog order on ties.
pub fn rank_by_rating<'c, I>(courses: I) -> Vec<&'c Course>
where
    I: IntoIterator<Item = &'c Course>,
{
    RankingEngine::new()
        .with_rule(rules::HighestRating)
        .rank(courses)
}
