//! Data types used by the classification and aggregation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scraped section, as produced by the results-page parser and
/// enriched with enrollment from the section's detail page.
///
/// Serializes to a single CSV row, so a scrape can be dumped and
/// re-aggregated offline with the `summarize` subcommand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCourseRow {
    pub scraped_at: DateTime<Utc>,
    pub course_type: String,
    pub title: String,
    pub units: String,
    /// Subject plus course number, e.g. "FIN 350". Starts as a placeholder
    /// built from the class number and is replaced once the detail page
    /// reveals the real code.
    pub course_code: String,
    /// Instructor as scraped, normalized to "Last, First" where possible.
    /// May be empty or a placeholder ("TBA", "Staff").
    pub instructor: String,
    /// 0 until the detail page is visited, and 0 again if that visit fails.
    pub enrolled: u32,
    /// Free-text annotations derived from the course type ("cross-listed",
    /// "paired"), already joined with "; ".
    pub note: String,
    pub course_link: Option<String>,
    pub class_number: String,
}

/// Course career level derived from the course number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Ug,
    Grad,
}

/// One of the four (level x supervision) aggregation categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    UgLecture,
    UgSupervision,
    GradLecture,
    GradSupervision,
}

impl Bucket {
    pub fn of(level: Level, supervision: bool) -> Self {
        match (level, supervision) {
            (Level::Ug, false) => Bucket::UgLecture,
            (Level::Ug, true) => Bucket::UgSupervision,
            (Level::Grad, false) => Bucket::GradLecture,
            (Level::Grad, true) => Bucket::GradSupervision,
        }
    }
}

/// A [`RawCourseRow`] labeled with its aggregation coordinates.
/// Ephemeral: produced by classification, consumed once by aggregation.
#[derive(Debug, Clone)]
pub struct ClassifiedRow {
    pub raw: RawCourseRow,
    pub level: Level,
    pub supervision: bool,
}

impl ClassifiedRow {
    pub fn bucket(&self) -> Bucket {
        Bucket::of(self.level, self.supervision)
    }
}

/// Instructor grouping key: (last name, first name).
pub type InstructorKey = (String, String);

/// One output record per distinct non-placeholder instructor.
///
/// Field order matches the fixed 11-column spreadsheet schema in
/// [`crate::load::schema`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstructorSummaryRow {
    pub last_name: String,
    pub first_name: String,
    pub ug_class_count: u32,
    pub ug_student_count: u32,
    pub ug_superv_class_count: u32,
    pub ug_superv_student_count: u32,
    pub grad_class_count: u32,
    pub grad_student_count: u32,
    pub grad_superv_class_count: u32,
    pub grad_superv_student_count: u32,
    pub note: String,
}

impl InstructorSummaryRow {
    /// Total sections attributed to this instructor across all buckets.
    pub fn total_classes(&self) -> u32 {
        self.ug_class_count
            + self.ug_superv_class_count
            + self.grad_class_count
            + self.grad_superv_class_count
    }

    /// Total enrolled students attributed to this instructor.
    pub fn total_students(&self) -> u32 {
        self.ug_student_count
            + self.ug_superv_student_count
            + self.grad_student_count
            + self.grad_superv_student_count
    }
}
