//! Input validation for planning requests.
//!
//! Checks student settings and catalog integrity before planning.
//! Detects:
//! - Credit caps that cannot reach the graduation target
//! - English elective selections of the wrong size or unknown names
//! - Completed-semester counts beyond the plan
//! - Courses both wanted and unwanted
//! - Duplicate offerings, zero-credit courses, malformed schedule codes

use std::collections::HashSet;
use std::fmt;

use crate::models::{
    decode_schedule_code, is_english_elective, Course, Settings, SEMESTER_COUNT,
};
use crate::scheduler::Quotas;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Sum of semester caps is below the graduation target.
    CreditCapTooLow,
    /// Not exactly the required number of English electives.
    EnglishElectiveCount,
    /// A chosen English elective is not in the elective table.
    UnknownEnglishElective,
    /// More completed semesters than the plan has.
    CompletedSemestersOutOfRange,
    /// A course is both wanted and unwanted.
    ConflictingPreference,
    /// Two offerings share code and schedule code.
    DuplicateOffering,
    /// A course carries no credit.
    ZeroCredit,
    /// A schedule code cannot be decoded.
    MalformedSchedule,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Number of English electives a student selects.
pub const ENGLISH_ELECTIVE_SELECTION: usize = 2;

/// Validates student settings.
///
/// Checks:
/// 1. Semester caps sum to at least the graduation target
/// 2. Exactly two English electives are chosen
/// 3. Each chosen elective is a known English elective
/// 4. Completed semesters do not exceed eight
/// 5. No course is both wanted and unwanted
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_settings(settings: &Settings, quotas: &Quotas) -> ValidationResult {
    let mut errors = Vec::new();

    let total = settings.total_cap();
    if total < quotas.graduation_credits {
        errors.push(ValidationError::new(
            ValidationErrorKind::CreditCapTooLow,
            format!(
                "Semester caps sum to {total}, below the graduation target of {}",
                quotas.graduation_credits
            ),
        ));
    }

    if settings.english_electives.len() != ENGLISH_ELECTIVE_SELECTION {
        errors.push(ValidationError::new(
            ValidationErrorKind::EnglishElectiveCount,
            format!(
                "Expected {ENGLISH_ELECTIVE_SELECTION} English electives, got {}",
                settings.english_electives.len()
            ),
        ));
    }
    for name in &settings.english_electives {
        if !is_english_elective(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownEnglishElective,
                format!("Unknown English elective: {name}"),
            ));
        }
    }

    if settings.completed_semesters > SEMESTER_COUNT {
        errors.push(ValidationError::new(
            ValidationErrorKind::CompletedSemestersOutOfRange,
            format!(
                "Completed semesters {} exceed {SEMESTER_COUNT}",
                settings.completed_semesters
            ),
        ));
    }

    let unwanted: HashSet<&str> = settings.unwanted_courses.iter().map(String::as_str).collect();
    for name in &settings.wanted_courses {
        if unwanted.contains(name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingPreference,
                format!("Course is both wanted and unwanted: {name}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates catalog integrity.
///
/// These issues are not fatal: duplicates are dropped by the filter and
/// malformed courses are skipped by placement.
pub fn validate_catalog(courses: &[Course]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut offerings = HashSet::new();

    for course in courses {
        if !offerings.insert((course.code.as_str(), course.schedule.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateOffering,
                format!("Duplicate offering: {} ({})", course.code, course.schedule),
            ));
        }
        if course.credits == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCredit,
                format!("Zero-credit course: {} {}", course.code, course.name),
            ));
        }
        if let Err(e) = decode_schedule_code(&course.schedule) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedSchedule,
                format!("{} {}: {e}", course.code, course.name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        Settings {
            english_electives: vec!["演說與簡報".into(), "小說選讀".into()],
            ..Settings::default()
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(validate_settings(&valid_settings(), &Quotas::default()).is_ok());
    }

    #[test]
    fn test_default_settings_with_default_electives() {
        let mut s = Settings::default();
        assert!(validate_settings(&s, &Quotas::default()).is_err());
        s.fill_default_english_electives();
        assert!(validate_settings(&s, &Quotas::default()).is_ok());
    }

    #[test]
    fn test_low_caps() {
        let mut s = valid_settings();
        s.credit_caps = [10; SEMESTER_COUNT];
        let errors = validate_settings(&s, &Quotas::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CreditCapTooLow));
    }

    #[test]
    fn test_english_selection() {
        let mut s = valid_settings();
        s.english_electives = vec!["演說與簡報".into(), "法文".into(), "小說選讀".into()];
        let errors = validate_settings(&s, &Quotas::default()).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::EnglishElectiveCount));
        assert!(kinds.contains(&ValidationErrorKind::UnknownEnglishElective));
    }

    #[test]
    fn test_history_and_preferences() {
        let mut s = valid_settings();
        s.completed_semesters = 9;
        s.wanted_courses = vec!["作業系統".into()];
        s.unwanted_courses = vec!["作業系統".into()];
        let errors = validate_settings(&s, &Quotas::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::CompletedSemestersOutOfRange);
        assert_eq!(errors[1].kind, ValidationErrorKind::ConflictingPreference);
    }

    #[test]
    fn test_catalog_issues() {
        let courses = vec![
            Course::new("C1", "A", 3).with_schedule("M1"),
            Course::new("C1", "A", 3).with_schedule("M1"),
            Course::new("C2", "B", 0).with_schedule("T1"),
            Course::new("C3", "C", 2).with_schedule("Q1"),
            Course::new("C4", "D", 2),
        ];
        let errors = validate_catalog(&courses).unwrap_err();
        let count = |k: ValidationErrorKind| errors.iter().filter(|e| e.kind == k).count();
        assert_eq!(count(ValidationErrorKind::DuplicateOffering), 1);
        assert_eq!(count(ValidationErrorKind::ZeroCredit), 1);
        assert_eq!(count(ValidationErrorKind::MalformedSchedule), 2);
    }

    #[test]
    fn test_clean_catalog() {
        let courses = vec![Course::new("C1", "A", 3).with_schedule("M1M2")];
        assert!(validate_catalog(&courses).is_ok());
    }
}
