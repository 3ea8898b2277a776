// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Offline grade import for Backboard.
//!
//! Parses the `;`-delimited grade and student exports, keys every row by the
//! student's hashed education ID, and groups the rows per student. Network
//! upload and payload encryption live with the API client, not here.

pub mod collection;
pub mod hash;
pub mod records;

#[cfg(test)]
mod fixtures;

pub use collection::{collect_grades, GradeCollection};
pub use hash::hash;
pub use records::{
    process_grades_csv_file, process_students_csv_file, read_grades, read_students, GradeRecord,
    GradesError, StudentRecord,
};
