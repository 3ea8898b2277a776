// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rows of the grade and student exports.
//!
//! Both exports are `;`-delimited with a header row of Hungarian column names.
//! Columns the import does not use (birth date, percentage grade, last save
//! date, ...) are ignored. Each parsed row is keyed by [`hash`] of the
//! student's education ID, and the plain ID is dropped from the row.

use crate::hash::hash;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Errors raised while importing an export.
#[derive(Debug, Error)]
pub enum GradesError {
    /// The export file could not be opened.
    #[error("failed to open {}", path.display())]
    Open {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A row is malformed or a required column is missing.
    #[error("invalid export: {0}")]
    Csv(#[from] csv::Error),
}

/// One grade row of the grade export.
///
/// Serializes with PascalCase field names, without the class and the
/// education ID.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GradeRecord {
    /// Student's full name.
    #[serde(rename(deserialize = "Tanuló név"))]
    pub student_name: String,
    /// Student's class, when the export carries it on this row.
    #[serde(rename(deserialize = "Tanuló osztálya"), skip_serializing)]
    pub school_class: Option<String>,
    #[serde(rename(deserialize = "Tanuló azonosítója"), skip_serializing)]
    om_code: String,
    /// Subject category.
    #[serde(rename(deserialize = "Tárgy kategória"))]
    pub subject_category: String,
    /// Subject.
    #[serde(rename(deserialize = "Tantárgy"))]
    pub subject: String,
    /// Class or group the grade was given in.
    #[serde(rename(deserialize = "Osztály/Csoport név"))]
    pub group: String,
    /// Teacher who gave the grade.
    #[serde(rename(deserialize = "Pedagógus név"), default)]
    pub teacher: Option<String>,
    /// Topic.
    #[serde(rename(deserialize = "Téma"))]
    pub theme: String,
    /// Kind of assessment (test, oral answer, ...).
    #[serde(rename(deserialize = "Értékelés módja"), default)]
    pub r#type: Option<String>,
    /// Grade in words.
    #[serde(rename(deserialize = "Osztályzat"))]
    pub text_grade: String,
    /// Numeric grade.
    #[serde(rename(deserialize = "Jegy"), default)]
    pub grade: Option<String>,
    /// Short written assessment.
    #[serde(rename(deserialize = "Szöveges értékelés"))]
    pub short_text_grade: String,
    /// Behavior grade.
    #[serde(rename(deserialize = "Magatartás"))]
    pub behavior_grade: String,
    /// Diligence grade.
    #[serde(rename(deserialize = "Szorgalom"))]
    pub diligence_grade: String,
    /// Date the grade was entered.
    #[serde(rename(deserialize = "Bejegyzés dátuma"))]
    pub create_date: String,
    /// Date the grade was recorded.
    #[serde(rename(deserialize = "Rögzítés dátuma"))]
    pub record_date: String,
}

impl GradeRecord {
    /// Hash of the education ID. The plain ID is cleared from the row.
    pub fn hashed_om_code(&mut self) -> String {
        hash(&std::mem::take(&mut self.om_code))
    }
}

/// One row of the student export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentRecord {
    /// Student's full name.
    #[serde(rename = "Név")]
    pub name: String,
    #[serde(rename = "Oktatási azonosítója")]
    om_code: String,
    /// Student's class.
    #[serde(rename = "Osztály")]
    pub class: String,
}

impl StudentRecord {
    /// Hash of the education ID. The plain ID is cleared from the row.
    pub fn hashed_om_code(&mut self) -> String {
        hash(&std::mem::take(&mut self.om_code))
    }
}

fn export_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().delimiter(b';').from_reader(reader)
}

fn open(path: &Path) -> Result<File, GradesError> {
    File::open(path).map_err(|source| GradesError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a grade export, grouping rows by hashed education ID in file order.
pub fn read_grades<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, Vec<GradeRecord>>, GradesError> {
    let mut grades: BTreeMap<String, Vec<GradeRecord>> = BTreeMap::new();
    for row in export_reader(reader).deserialize() {
        let mut grade: GradeRecord = row?;
        grades.entry(grade.hashed_om_code()).or_default().push(grade);
    }
    debug!(students = grades.len(), "parsed grade export");
    trace!(?grades, "grades by hashed id");
    Ok(grades)
}

/// Parse a student export, keyed by hashed education ID.
///
/// When an ID appears twice the later row wins.
pub fn read_students<R: Read>(
    reader: R,
) -> Result<BTreeMap<String, StudentRecord>, GradesError> {
    let mut students = BTreeMap::new();
    for row in export_reader(reader).deserialize() {
        let mut student: StudentRecord = row?;
        let id = student.hashed_om_code();
        if let Some(previous) = students.insert(id, student) {
            warn!(name = %previous.name, "duplicate student row, keeping the later one");
        }
    }
    debug!(students = students.len(), "parsed student export");
    Ok(students)
}

/// [`read_grades`] over the file at `path`.
pub fn process_grades_csv_file(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<String, Vec<GradeRecord>>, GradesError> {
    let path = path.as_ref();
    info!(?path, "processing grades");
    read_grades(open(path)?)
}

/// [`read_students`] over the file at `path`.
pub fn process_students_csv_file(
    path: impl AsRef<Path>,
) -> Result<BTreeMap<String, StudentRecord>, GradesError> {
    let path = path.as_ref();
    info!(?path, "processing students");
    read_students(open(path)?)
}
