//! Catalog filter.
//!
//! Narrows the raw course table to the candidates usable by one student.
//! Every step takes a slice of rows and returns a new vector of
//! references; the source table is never modified.
//!
//! # Steps
//!
//! 1. Drop unwanted course names.
//! 2. Base scope: CS, EECS, GE, English centre, and 大學中文.
//! 3. Basic-science series (and their substitutes) by name.
//! 4. Extra departments chosen by the student.
//! 5. Chosen English electives; foreign-language departments if admitted.
//! 6. Deduplicate by (code, schedule code).
//! 7. Derive the GE and elective-language subsets and the breadth picks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::PreparedCatalog;
use crate::models::{is_english_elective, BreadthCategory, Course, LanguageElectiveMode, Settings};

/// General-education centre.
pub const GE_DEPARTMENT: &str = "通識教育中心";

/// Departments whose complete offering forms the base scope.
pub const BASE_DEPARTMENTS: [&str; 5] = [
    "資訊工程學系",
    "電機資訊學院學士班",
    GE_DEPARTMENT,
    "英語教育中心(110起)",
    "英語教育中心",
];

/// English centre departments (offerers of the English electives).
pub const ENGLISH_DEPARTMENTS: [&str; 2] = ["英語教育中心(110起)", "英語教育中心"];

/// Departments offering foreign-language electives.
pub const FOREIGN_LANGUAGE_DEPARTMENTS: [&str; 2] = ["外國語文學系", "語言中心"];

const CHINESE_DEPARTMENT: &str = "中國文學系";
const CHINESE_COURSE: &str = "大學中文";

/// Basic-science series and their substitutes, added by name.
pub const BASIC_SCIENCE_COURSES: [&str; 16] = [
    "微積分Ｂ一",
    "微積分Ｂ二",
    "普通物理Ｂ一",
    "普通物理Ｂ二",
    "普通化學一",
    "普通化學二",
    "生命科學一",
    "生命科學二",
    "微積分一(數學系)",
    "微積分Ａ一",
    "微積分二(數學系)",
    "微積分Ａ二",
    "普通物理一(物理系)",
    "普通物理Ａ一",
    "普通物理二(物理系)",
    "普通物理Ａ二",
];

/// Breadth elective groups A–D.
pub const BREADTH_GROUPS: [&[&str]; 4] = [
    &["常微分方程", "訊號與系統", "正規語言", "數值最佳化", "量子計算概論"],
    &["電路與電子學一", "積體電路設計概論", "嵌入式系統概論", "編譯器設計", "超大型積體電路系統設計"],
    &["計算機網路概論", "軟體工程", "密碼與網路安全概論", "平行計算概論"],
    &["資料庫系統概論", "人工智慧概論", "多媒體技術概論", "機器學習概論"],
];

/// Number of breadth electives pre-selected.
const BREADTH_PICK_COUNT: usize = 4;

/// One row of the raw course table.
///
/// Every cell is optional; completeness is checked by the filter steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(rename = "科號")]
    pub code: Option<String>,
    #[serde(rename = "中文課名")]
    pub name: Option<String>,
    #[serde(rename = "系所全名")]
    pub department: Option<String>,
    #[serde(rename = "學分")]
    pub credits: Option<String>,
    #[serde(rename = "教師")]
    pub instructor: Option<String>,
    #[serde(rename = "等級制")]
    pub rating: Option<String>,
    #[serde(rename = "上課時間")]
    pub schedule: Option<String>,
    #[serde(rename = "通識分類")]
    pub ge_category: Option<String>,
}

fn cell(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CourseRecord {
    /// Course name, if present.
    pub fn name(&self) -> Option<&str> {
        cell(&self.name)
    }

    /// Department, if present.
    pub fn department(&self) -> Option<&str> {
        cell(&self.department)
    }

    /// Parsed credit value (fractional cells are truncated).
    pub fn credit_value(&self) -> Option<u32> {
        let value: f64 = cell(&self.credits)?.parse().ok()?;
        (value.is_finite() && value >= 0.0).then(|| value as u32)
    }

    /// Parsed rating; absent or unparsable is 0.
    pub fn rating_value(&self) -> f64 {
        cell(&self.rating)
            .and_then(|r| r.parse().ok())
            .unwrap_or(0.0)
    }

    /// Code, name, credits and schedule are all present.
    pub fn is_complete(&self) -> bool {
        cell(&self.code).is_some()
            && self.name().is_some()
            && self.credit_value().is_some()
            && cell(&self.schedule).is_some()
    }

    /// Code, department and credits are present (schedule may be missing).
    pub fn is_identified(&self) -> bool {
        cell(&self.code).is_some() && self.department().is_some() && self.credit_value().is_some()
    }

    /// Converts to a course; `None` without code, name or credits.
    pub fn to_course(&self) -> Option<Course> {
        let mut course = Course::new(cell(&self.code)?, self.name()?, self.credit_value()?)
            .with_rating(self.rating_value())
            .with_schedule(cell(&self.schedule).unwrap_or_default());
        if let Some(department) = self.department() {
            course = course.with_department(department);
        }
        if let Some(instructor) = cell(&self.instructor) {
            course = course.with_instructor(instructor);
        }
        if let Some(category) = cell(&self.ge_category) {
            course = course.with_ge_category(category);
        }
        Some(course)
    }
}

/// Rows whose name is not in `unwanted`.
pub fn without_unwanted<'r>(rows: &'r [CourseRecord], unwanted: &[String]) -> Vec<&'r CourseRecord> {
    rows.iter()
        .filter(|r| !r.name().is_some_and(|n| unwanted.iter().any(|u| u == n)))
        .collect()
}

/// Complete rows offered by any of `departments`.
pub fn in_departments<'r>(rows: &[&'r CourseRecord], departments: &[&str]) -> Vec<&'r CourseRecord> {
    rows.iter()
        .copied()
        .filter(|r| r.is_complete() && r.department().is_some_and(|d| departments.contains(&d)))
        .collect()
}

/// Rows named any of `names`; `complete` requires a schedule code too.
pub fn named<'r>(rows: &[&'r CourseRecord], names: &[&str], complete: bool) -> Vec<&'r CourseRecord> {
    rows.iter()
        .copied()
        .filter(|r| r.name().is_some_and(|n| names.contains(&n)))
        .filter(|r| if complete { r.is_complete() } else { r.is_identified() })
        .collect()
}

/// Base scope: core departments plus the 大學中文 offering.
pub fn base_scope<'r>(rows: &[&'r CourseRecord]) -> Vec<&'r CourseRecord> {
    let mut scope = in_departments(rows, &BASE_DEPARTMENTS);
    scope.extend(
        in_departments(rows, &[CHINESE_DEPARTMENT])
            .into_iter()
            .filter(|r| r.name() == Some(CHINESE_COURSE)),
    );
    scope
}

/// Converts rows to courses, dropping duplicate (code, schedule) pairs.
pub fn dedupe_courses(rows: &[&CourseRecord]) -> Vec<Course> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter_map(|r| r.to_course())
        .filter(|c| seen.insert((c.code.clone(), c.schedule.clone())))
        .collect()
}

/// Courses counting toward the elective-language quota under `mode`.
pub fn language_elective_subset(courses: &[Course], mode: LanguageElectiveMode) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| {
            let english = is_english_elective(&c.name)
                && ENGLISH_DEPARTMENTS.contains(&c.department.as_str());
            let foreign = FOREIGN_LANGUAGE_DEPARTMENTS.contains(&c.department.as_str());
            (mode.admits_english() && english) || (mode.admits_foreign() && foreign)
        })
        .cloned()
        .collect()
}

/// Highest-rated row (first on ties).
fn best_rated<'r>(rows: impl IntoIterator<Item = &'r CourseRecord>) -> Option<&'r CourseRecord> {
    rows.into_iter().fold(None, |best, row| match best {
        Some(b) if b.rating_value() >= row.rating_value() => Some(b),
        _ => Some(row),
    })
}

/// Pre-selects breadth electives.
///
/// Takes the best-rated course of every group except `avoided`, then one
/// more from every name not yet picked (the avoided group included), and
/// keeps the best four by rating.
pub fn pick_breadth(rows: &[&CourseRecord], avoided: BreadthCategory) -> Vec<String> {
    let mut picks: Vec<&CourseRecord> = Vec::new();
    let mut visited: Vec<&str> = Vec::new();

    for (idx, group) in BREADTH_GROUPS.iter().enumerate() {
        if idx == avoided.index() {
            continue;
        }
        let candidates = rows.iter().copied().filter(|r| {
            r.name()
                .is_some_and(|n| group.contains(&n) && !visited.contains(&n))
        });
        if let Some(best) = best_rated(candidates) {
            if let Some(name) = best.name() {
                visited.push(name);
            }
            picks.push(best);
        }
    }

    let remaining = rows.iter().copied().filter(|r| {
        r.name().is_some_and(|n| {
            BREADTH_GROUPS.iter().any(|g| g.contains(&n)) && !visited.contains(&n)
        })
    });
    if let Some(extra) = best_rated(remaining) {
        picks.push(extra);
    }

    // Stable: equal ratings keep pick order
    picks.sort_by(|a, b| {
        b.rating_value()
            .partial_cmp(&a.rating_value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    picks
        .into_iter()
        .take(BREADTH_PICK_COUNT)
        .filter_map(|r| r.name().map(str::to_string))
        .collect()
}

/// Builds the planner catalog from raw rows and student settings.
pub fn prepare_catalog(records: &[CourseRecord], settings: &Settings) -> PreparedCatalog {
    let rows = without_unwanted(records, &settings.unwanted_courses);

    let mut scope = base_scope(&rows);
    scope.extend(named(&rows, &BASIC_SCIENCE_COURSES, false));
    for dept in &settings.extra_departments {
        scope.extend(in_departments(&rows, &[dept.department_name()]));
    }
    let electives: Vec<&str> = settings.english_electives.iter().map(String::as_str).collect();
    scope.extend(named(&rows, &electives, true));
    if settings.language_elective_mode.admits_foreign() {
        scope.extend(in_departments(&rows, &FOREIGN_LANGUAGE_DEPARTMENTS));
    }

    let courses = dedupe_courses(&scope);
    let general_education = dedupe_courses(&in_departments(&rows, &[GE_DEPARTMENT]));
    let language_electives = language_elective_subset(&courses, settings.language_elective_mode);
    let breadth_picks = pick_breadth(&rows, settings.avoided_breadth);

    debug!(
        raw = records.len(),
        courses = courses.len(),
        general_education = general_education.len(),
        language_electives = language_electives.len(),
        breadth = ?breadth_picks,
        "catalog prepared"
    );

    PreparedCatalog {
        courses,
        general_education,
        language_electives,
        breadth_picks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtraDepartment;

    fn row(code: &str, name: &str, dept: &str, credits: &str, schedule: &str, rating: &str) -> CourseRecord {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        CourseRecord {
            code: opt(code),
            name: opt(name),
            department: opt(dept),
            credits: opt(credits),
            instructor: None,
            rating: opt(rating),
            schedule: opt(schedule),
            ge_category: None,
        }
    }

    fn sample_rows() -> Vec<CourseRecord> {
        vec![
            row("11210CS 100100", "計算機程式設計一", "資訊工程學系", "3", "M3M4", "8"),
            row("11210CS 235100", "資料結構", "資訊工程學系", "3", "T3T4", "9"),
            row("11210CS 235100", "資料結構", "資訊工程學系", "3", "T3T4", "9"),
            row("11210GEC 120100", "哲學概論", GE_DEPARTMENT, "2", "W5W6", "7"),
            row("11210MATH102000", "線性代數", "數學系", "3", "R3R4", "6"),
            row("11210MATH100100", "微積分Ａ一", "數學系", "4", "", "5"),
            row("11210CL 101000", "大學中文", "中國文學系", "2", "F3F4", "3"),
            row("11210CL 201000", "現代詩", "中國文學系", "2", "F5F6", "3"),
            row("11210LANG200100", "小說選讀", "英語教育中心", "2", "M7M8", "4"),
            row("11210FL  100100", "日文一", "外國語文學系", "2", "T7T8", "6"),
            row("", "缺科號", "資訊工程學系", "3", "M1", "9"),
        ]
    }

    #[test]
    fn test_record_parsing() {
        let r = row("C1", "A", "D", "3.0", "M1", "");
        assert_eq!(r.credit_value(), Some(3));
        assert!((r.rating_value() - 0.0).abs() < 1e-10);
        assert!(r.is_complete());
        assert!(!row("C1", "A", "D", "x", "M1", "1").is_complete());
        assert!(row("C1", "A", "D", "3", "", "1").is_identified());
    }

    #[test]
    fn test_base_scope_and_dedupe() {
        let rows = sample_rows();
        let catalog = prepare_catalog(&rows, &Settings::default());
        let names: Vec<&str> = catalog.courses.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names.iter().filter(|n| **n == "資料結構").count(), 1);
        assert!(names.contains(&"大學中文"));
        assert!(!names.contains(&"現代詩"));
        assert!(!names.contains(&"線性代數"));
        assert!(!names.contains(&"缺科號"));
        // Added by name even without a schedule code
        assert!(names.contains(&"微積分Ａ一"));
        assert_eq!(catalog.general_education.len(), 1);
    }

    #[test]
    fn test_unwanted_and_extra_departments() {
        let rows = sample_rows();
        let mut settings = Settings::default();
        settings.unwanted_courses = vec!["資料結構".into()];
        settings.extra_departments = vec![ExtraDepartment::Mathematics];

        let catalog = prepare_catalog(&rows, &settings);
        assert!(catalog.find("資料結構").is_none());
        assert!(catalog.find("線性代數").is_some());
    }

    #[test]
    fn test_language_elective_modes() {
        let rows = sample_rows();
        let mut settings = Settings::default();

        settings.language_elective_mode = LanguageElectiveMode::English;
        let english = prepare_catalog(&rows, &settings);
        assert!(english.is_language_elective("小說選讀"));
        assert!(!english.is_language_elective("日文一"));
        assert!(english.find("日文一").is_none());

        settings.language_elective_mode = LanguageElectiveMode::Foreign;
        let foreign = prepare_catalog(&rows, &settings);
        assert!(!foreign.is_language_elective("小說選讀"));
        assert!(foreign.is_language_elective("日文一"));
    }

    #[test]
    fn test_breadth_picks_skip_avoided_group() {
        let rows = vec![
            row("A1", "常微分方程", "數學系", "3", "M1", "9"),
            row("B1", "編譯器設計", "資訊工程學系", "3", "M2", "5"),
            row("C1", "軟體工程", "資訊工程學系", "3", "M3", "7"),
            row("C2", "平行計算概論", "資訊工程學系", "3", "M4", "6"),
            row("D1", "機器學習概論", "資訊工程學系", "3", "M5", "8"),
        ];
        let refs: Vec<&CourseRecord> = rows.iter().collect();
        let picks = pick_breadth(&refs, BreadthCategory::A);

        // B, C, D winners, then the best leftover (常微分方程, 9), best four by rating
        assert_eq!(picks, vec!["常微分方程", "機器學習概論", "軟體工程", "編譯器設計"]);
    }

    #[test]
    fn test_breadth_ties_keep_first() {
        let rows = vec![
            row("D1", "資料庫系統概論", "資訊工程學系", "3", "M1", "5"),
            row("D2", "人工智慧概論", "資訊工程學系", "3", "M2", "5"),
        ];
        let refs: Vec<&CourseRecord> = rows.iter().collect();
        let picks = pick_breadth(&refs, BreadthCategory::A);
        assert_eq!(picks, vec!["資料庫系統概論", "人工智慧概論"]);
    }
}
