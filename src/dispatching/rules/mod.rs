//! Built-in ranking rules.
//!
//! All rules return lower scores for courses that should be tried first.

use super::{RankingRule, RuleScore};
use crate::models::Course;

/// Highest rating first.
///
/// A missing rating is stored as 0 and ranks with the zeros. NaN
/// ratings rank last.
#[derive(Debug, Clone, Copy)]
pub struct HighestRating;

impl RankingRule for HighestRating {
    fn name(&self) -> &'static str {
        "RATING"
    }

    fn evaluate(&self, course: &Course) -> RuleScore {
        if course.rating.is_nan() {
            f64::INFINITY
        } else {
            -course.rating
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_rating_scores() {
        let high = Course::new("C1", "A", 3).with_rating(9.0);
        let low = Course::new("C2", "B", 3).with_rating(2.0);
        assert!(HighestRating.evaluate(&high) < HighestRating.evaluate(&low));
    }

    #[test]
    fn test_nan_rating_ranks_last() {
        let nan = Course::new("C1", "A", 3).with_rating(f64::NAN);
        let zero = Course::new("C2", "B", 3);
        assert!(HighestRating.evaluate(&zero) < HighestRating.evaluate(&nan));
    }
}
