//! Course-planning domain models.
//!
//! Provides the data types for describing a planning problem (catalog
//! courses, requirements, student settings) and its solution (timetable).
//!
//! # Domain Mappings
//!
//! | u-curriculum | Generic scheduling |
//! |--------------|--------------------|
//! | Course | Task with a fixed weekly footprint |
//! | Semester | Capacity-bounded resource |
//! | WeekGrid | Resource calendar |
//! | Timetable | Schedule |

mod course;
mod requirement;
mod settings;
mod timetable;
mod week_grid;

pub use course::{Course, CORE_GE_PREFIX, GE_CODE_MARKER};
pub use requirement::{Requirement, RequirementCatalog, RequirementCategory, SubstituteMap};
pub use settings::{
    english_elective_name, is_english_elective, BreadthCategory, EnglishLevel, ExtraDepartment,
    LanguageElectiveMode, ScienceTrack, Settings, DEFAULT_ENGLISH_ELECTIVE_CODES,
    ENGLISH_ELECTIVES,
};
pub use timetable::{academic_year, SemesterPlan, Timetable, SEMESTER_COUNT, SEMESTER_LABELS};
pub use week_grid::{
    decode_schedule_code, Period, SlotCodeError, TimeSlot, WeekGrid, Weekday, DAYS_PER_WEEK,
    PERIODS_PER_DAY,
};
