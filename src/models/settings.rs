//! Per-student planning settings.
//!
//! Settings are deserialized from a JSON configuration file and may be
//! overridden by command-line flags. Every field has a default so
//! partial files are accepted.

use serde::{Deserialize, Serialize};

use super::SEMESTER_COUNT;

/// The ten English electives, keyed by their selection code `1`..`10`.
pub const ENGLISH_ELECTIVES: [(&str, &str); 10] = [
    ("1", "演說與簡報"),
    ("2", "新聞英文選讀"),
    ("3", "短篇故事選讀"),
    ("4", "影視英語聽講"),
    ("5", "中英口譯"),
    ("6", "職場英語寫作"),
    ("7", "小說選讀"),
    ("8", "中英文筆譯"),
    ("9", "學術英語聽力"),
    ("10", "職場英語口語表達"),
];

/// Selection codes used when no English electives were chosen.
pub const DEFAULT_ENGLISH_ELECTIVE_CODES: [&str; 2] = ["1", "2"];

/// Looks up an English elective name by its selection code.
pub fn english_elective_name(code: &str) -> Option<&'static str> {
    ENGLISH_ELECTIVES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

/// Whether `name` is one of the English electives.
pub fn is_english_elective(name: &str) -> bool {
    ENGLISH_ELECTIVES.iter().any(|(_, n)| *n == name)
}

/// Selected basic-science series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScienceTrack {
    /// General physics (`X`).
    #[default]
    Physics,
    /// General chemistry (`Y`).
    Chemistry,
    /// Life science (`Z`).
    LifeScience,
}

impl ScienceTrack {
    /// Parses a track code (`X`, `Y`, `Z`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "X" => Some(Self::Physics),
            "Y" => Some(Self::Chemistry),
            "Z" => Some(Self::LifeScience),
            _ => None,
        }
    }
}

/// Breadth elective category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreadthCategory {
    #[default]
    A,
    B,
    C,
    D,
}

impl BreadthCategory {
    /// All categories in order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Parses a category letter.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    /// Position in [`Self::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Additional department whose whole offering joins the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraDepartment {
    /// 數學系 (`1`).
    Mathematics,
    /// 物理學系 (`2`).
    Physics,
}

impl ExtraDepartment {
    /// Parses a selection code (`1`, `2`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::Mathematics),
            "2" => Some(Self::Physics),
            _ => None,
        }
    }

    /// Catalog department name.
    pub fn department_name(self) -> &'static str {
        match self {
            Self::Mathematics => "數學系",
            Self::Physics => "物理學系",
        }
    }
}

/// Declared English proficiency, which decides the required language courses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnglishLevel {
    /// No language requirement at all.
    Exempt,
    Elementary,
    #[default]
    Intermediate,
    Advanced,
}

impl EnglishLevel {
    /// Required language course names for this level.
    pub fn required_courses(self) -> &'static [&'static str] {
        match self {
            Self::Exempt => &[],
            Self::Elementary => &["大學中文", "英文（一）", "英文（二）"],
            Self::Intermediate => &["大學中文", "英文（二）"],
            Self::Advanced => &["大學中文"],
        }
    }

    /// Parses a level name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "exempt" => Some(Self::Exempt),
            "elementary" => Some(Self::Elementary),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

/// Which courses count toward the elective-language quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageElectiveMode {
    /// English electives only.
    English,
    /// Foreign-language department courses only.
    Foreign,
    /// Either kind.
    #[default]
    Either,
}

impl LanguageElectiveMode {
    /// Whether English electives count.
    pub fn admits_english(self) -> bool {
        matches!(self, Self::English | Self::Either)
    }

    /// Whether foreign-language courses count.
    pub fn admits_foreign(self) -> bool {
        matches!(self, Self::Foreign | Self::Either)
    }
}

/// Planning settings for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Credit cap per semester.
    pub credit_caps: [u32; SEMESTER_COUNT],
    /// Selected basic-science track.
    pub track: ScienceTrack,
    /// Breadth category the student prefers to avoid.
    pub avoided_breadth: BreadthCategory,
    /// Departments added to the catalog scope.
    pub extra_departments: Vec<ExtraDepartment>,
    /// Declared English proficiency.
    pub english_level: EnglishLevel,
    /// Chosen English elective names (normally two).
    pub english_electives: Vec<String>,
    /// Elective-language disposition.
    pub language_elective_mode: LanguageElectiveMode,
    /// Course names the student wants placed first.
    pub wanted_courses: Vec<String>,
    /// Course names removed from the catalog.
    pub unwanted_courses: Vec<String>,
    /// Semesters already completed (closed to placement).
    pub completed_semesters: usize,
    /// Names of courses already completed.
    pub completed_courses: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credit_caps: [20, 20, 20, 20, 12, 12, 12, 12],
            track: ScienceTrack::default(),
            avoided_breadth: BreadthCategory::default(),
            extra_departments: Vec::new(),
            english_level: EnglishLevel::default(),
            english_electives: Vec::new(),
            language_elective_mode: LanguageElectiveMode::default(),
            wanted_courses: Vec::new(),
            unwanted_courses: Vec::new(),
            completed_semesters: 0,
            completed_courses: Vec::new(),
        }
    }
}

impl Settings {
    /// Sum of all semester credit caps.
    pub fn total_cap(&self) -> u32 {
        self.credit_caps.iter().sum()
    }

    /// Selects the default English electives if none were chosen.
    pub fn fill_default_english_electives(&mut self) {
        if self.english_electives.is_empty() {
            self.english_electives = DEFAULT_ENGLISH_ELECTIVE_CODES
                .iter()
                .filter_map(|code| english_elective_name(code))
                .map(str::to_string)
                .collect();
        }
    }

    /// Required language names followed by the chosen English electives.
    pub fn language_requirements(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .english_level
            .required_courses()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for name in &self.english_electives {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }
}
