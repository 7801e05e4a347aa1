//! Weekly time grid and schedule-code decoding.
//!
//! A schedule code is a flat string of letter pairs, each pair naming one
//! weekday and one period: `M1T2` = Monday period 1 + Tuesday period 2.
//! Commas are ignored.
//!
//! # Periods
//!
//! | Letter | 1 | 2 | 3 | 4 | n | 5 | 6 | 7 | 8 | 9 | a | b | c |
//! |--------|---|---|---|---|---|---|---|---|---|---|---|---|---|
//! | Index  | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 | 10 | 11 | 12 |
//!
//! `n` is the noon slot, `a`–`c` the evening slots.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of weekday rows in a grid.
pub const DAYS_PER_WEEK: usize = 7;
/// Number of period columns in a grid.
pub const PERIODS_PER_DAY: usize = 13;

const PERIOD_LETTERS: [char; PERIODS_PER_DAY] =
    ['1', '2', '3', '4', 'n', '5', '6', '7', '8', '9', 'a', 'b', 'c'];

/// Day of the week. Schedule codes only address Monday–Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Parses a schedule-code weekday letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'M' => Some(Self::Monday),
            'T' => Some(Self::Tuesday),
            'W' => Some(Self::Wednesday),
            'R' => Some(Self::Thursday),
            'F' => Some(Self::Friday),
            'S' => Some(Self::Saturday),
            _ => None,
        }
    }

    /// Row index in the grid.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A period of the day (column index 0..13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period(u8);

impl Period {
    /// Parses a schedule-code period letter.
    pub fn from_letter(letter: char) -> Option<Self> {
        PERIOD_LETTERS
            .iter()
            .position(|&p| p == letter)
            .map(|idx| Self(idx as u8))
    }

    /// Column index in the grid.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The schedule-code letter for this period.
    pub fn letter(self) -> char {
        PERIOD_LETTERS[self.index()]
    }
}

/// One (weekday, period) coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: Weekday,
    pub period: Period,
}

/// Why a schedule code could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotCodeError {
    #[error("schedule code is empty")]
    Empty,
    #[error("schedule code has odd length {0}")]
    OddLength(usize),
    #[error("unknown weekday letter '{0}'")]
    UnknownWeekday(char),
    #[error("unknown period letter '{0}'")]
    UnknownPeriod(char),
}

/// Decodes a schedule code into its time slots.
///
/// # Examples
///
/// ```
/// use u_curriculum::models::{decode_schedule_code, Weekday};
///
/// let slots = decode_schedule_code("M1T2").unwrap();
/// assert_eq!(slots.len(), 2);
/// assert_eq!(slots[0].day, Weekday::Monday);
/// assert!(decode_schedule_code("M1T").is_err());
/// ```
pub fn decode_schedule_code(code: &str) -> Result<Vec<TimeSlot>, SlotCodeError> {
    let letters: Vec<char> = code.chars().filter(|&c| c != ',').collect();
    if letters.is_empty() {
        return Err(SlotCodeError::Empty);
    }
    if letters.len() % 2 != 0 {
        return Err(SlotCodeError::OddLength(letters.len()));
    }

    letters
        .chunks_exact(2)
        .map(|pair| {
            let day = Weekday::from_letter(pair[0]).ok_or(SlotCodeError::UnknownWeekday(pair[0]))?;
            let period = Period::from_letter(pair[1]).ok_or(SlotCodeError::UnknownPeriod(pair[1]))?;
            Ok(TimeSlot { day, period })
        })
        .collect()
}

/// Weekly occupancy matrix for one semester.
///
/// Each cell stores the name of the course occupying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekGrid {
    cells: Vec<Option<String>>,
}

impl WeekGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self {
            cells: vec![None; DAYS_PER_WEEK * PERIODS_PER_DAY],
        }
    }

    #[inline]
    fn offset(slot: TimeSlot) -> usize {
        slot.day.index() * PERIODS_PER_DAY + slot.period.index()
    }

    /// Name of the course occupying `slot`, if any.
    pub fn occupant(&self, slot: TimeSlot) -> Option<&str> {
        self.cells[Self::offset(slot)].as_deref()
    }

    /// First occupant found among `slots`.
    pub fn first_conflict(&self, slots: &[TimeSlot]) -> Option<&str> {
        slots.iter().find_map(|&slot| self.occupant(slot))
    }

    /// Whether any of `slots` is already occupied.
    pub fn conflicts(&self, slots: &[TimeSlot]) -> bool {
        self.first_conflict(slots).is_some()
    }

    /// Writes `name` into every slot.
    pub fn occupy(&mut self, slots: &[TimeSlot], name: &str) {
        for &slot in slots {
            self.cells[Self::offset(slot)] = Some(name.to_string());
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

impl Default for WeekGrid {
    fn default() -> Self {
        Self::new()
    }
}
