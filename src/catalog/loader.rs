//! CSV loading of the course and requirement tables.
//!
//! Cells are trimmed and empty cells become `None`. A missing file or a
//! missing required column is fatal; rows with incomplete fields are kept
//! here and dropped by the filter.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use super::CourseRecord;
use crate::error::PlannerError;
use crate::models::{Requirement, RequirementCatalog, RequirementCategory, SubstituteMap};

/// Columns the course table must carry.
pub const COURSE_COLUMNS: [&str; 5] = ["科號", "中文課名", "系所全名", "學分", "上課時間"];

/// Columns the requirement table must carry.
pub const REQUIREMENT_COLUMNS: [&str; 2] = ["中文課名", "類別"];

/// One row of the requirement table.
#[derive(Debug, Clone, Deserialize)]
struct RequirementRecord {
    #[serde(rename = "中文課名")]
    name: Option<String>,
    #[serde(rename = "類別")]
    category: Option<String>,
}

fn require_columns(
    headers: &StringRecord,
    table: &'static str,
    columns: &[&'static str],
) -> Result<(), PlannerError> {
    match columns.iter().copied().find(|c| !headers.iter().any(|h| h == *c)) {
        Some(column) => Err(PlannerError::MissingColumn { table, column }),
        None => Ok(()),
    }
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, PlannerError> {
    File::open(path).map_err(|e| PlannerError::io(path, e))
}

/// Reads the raw course table from any reader.
pub fn read_course_table<R: Read>(reader: R) -> Result<Vec<CourseRecord>, PlannerError> {
    let mut reader = csv_reader(reader);
    require_columns(reader.headers()?, "course", &COURSE_COLUMNS)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: CourseRecord = result?;
        records.push(record);
    }
    debug!(rows = records.len(), "course table read");
    Ok(records)
}

/// Reads the requirement table from any reader and attaches `substitutes`.
///
/// Rows without a name are skipped.
pub fn read_requirement_table<R: Read>(
    reader: R,
    substitutes: SubstituteMap,
) -> Result<RequirementCatalog, PlannerError> {
    let mut reader = csv_reader(reader);
    require_columns(reader.headers()?, "requirement", &REQUIREMENT_COLUMNS)?;

    let mut catalog = RequirementCatalog::new();
    for result in reader.deserialize() {
        let record: RequirementRecord = result?;
        let Some(name) = record.name.filter(|n| !n.is_empty()) else {
            continue;
        };
        let category = RequirementCategory::from_table(record.category.as_deref().unwrap_or(""));
        catalog = catalog.with_requirement(Requirement::new(name, category));
    }
    Ok(catalog.with_substitutes(substitutes))
}

/// Loads the raw course table from `path`.
pub fn load_course_table(path: impl AsRef<Path>) -> Result<Vec<CourseRecord>, PlannerError> {
    let path = path.as_ref();
    let records = read_course_table(open(path)?)?;
    info!(path = %path.display(), rows = records.len(), "course table loaded");
    Ok(records)
}

/// Loads the requirement table from `path` with the standard substitutes.
pub fn load_requirement_table(path: impl AsRef<Path>) -> Result<RequirementCatalog, PlannerError> {
    let path = path.as_ref();
    let catalog = read_requirement_table(open(path)?, SubstituteMap::standard())?;
    info!(path = %path.display(), requirements = catalog.len(), "requirement table loaded");
    Ok(catalog)
}
