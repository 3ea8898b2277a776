// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-student grade collections.

use crate::records::{GradeRecord, StudentRecord};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Everything the import knows about one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GradeCollection {
    /// Hashed education ID the server identifies the student by.
    pub om_code_hashed: String,
    /// The student's grades in export order.
    pub grades: Vec<GradeRecord>,
    /// Class, if any source provided one.
    pub school_class: Option<String>,
    /// Full name.
    pub student_name: String,
}

/// Build one collection per student, ordered by hashed education ID.
///
/// Name and class come from the student export when it lists the student.
/// Otherwise the class is taken from the first grade row that carries one,
/// and the name from the first grade row. Students with no grade rows are
/// skipped.
pub fn collect_grades(
    grades: BTreeMap<String, Vec<GradeRecord>>,
    students: &BTreeMap<String, StudentRecord>,
) -> Vec<GradeCollection> {
    let mut collections = Vec::with_capacity(grades.len());
    for (id, rows) in grades {
        let (school_class, student_name) = if let Some(student) = students.get(&id) {
            (Some(student.class.clone()), student.name.clone())
        } else {
            let Some(first) = rows.first() else {
                warn!(%id, "no grade rows, skipping student");
                continue;
            };
            warn!(%id, "student not in student export, falling back to grade rows");
            let class = rows.iter().find_map(|row| row.school_class.clone());
            (class, first.student_name.clone())
        };
        debug!(%id, %student_name, ?school_class, grades = rows.len(), "collected student");
        collections.push(GradeCollection {
            om_code_hashed: id,
            grades: rows,
            school_class,
            student_name,
        });
    }
    collections
}
