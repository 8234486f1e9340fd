//! Per-instructor teaching-load aggregation.

use std::collections::BTreeMap;

use crate::load::names::{NameConvention, split_name};
use crate::load::notes::collect_notes;
use crate::load::types::{Bucket, ClassifiedRow, InstructorKey, InstructorSummaryRow};

/// Placeholder instructor values meaning "not yet assigned". Rows carrying
/// one of these (or an empty name) are excluded from aggregation.
const SENTINELS: &[&str] = &["tba", "staff"];

fn is_placeholder(key: &InstructorKey) -> bool {
    let (last, first) = key;
    if last.is_empty() && first.is_empty() {
        return true;
    }
    first.is_empty() && SENTINELS.contains(&last.to_lowercase().as_str())
}

#[derive(Default)]
struct LoadTotals {
    ug_classes: u32,
    ug_students: u32,
    ug_superv_classes: u32,
    ug_superv_students: u32,
    grad_classes: u32,
    grad_students: u32,
    grad_superv_classes: u32,
    grad_superv_students: u32,
}

impl LoadTotals {
    fn add(&mut self, bucket: Bucket, enrolled: u32) {
        match bucket {
            Bucket::UgLecture => {
                self.ug_classes += 1;
                self.ug_students += enrolled;
            }
            Bucket::UgSupervision => {
                self.ug_superv_classes += 1;
                self.ug_superv_students += enrolled;
            }
            Bucket::GradLecture => {
                self.grad_classes += 1;
                self.grad_students += enrolled;
            }
            Bucket::GradSupervision => {
                self.grad_superv_classes += 1;
                self.grad_superv_students += enrolled;
            }
        }
    }
}

/// Aggregates classified rows into one summary row per instructor.
///
/// Rows with an empty or placeholder instructor are dropped. Grouping is by
/// `(last, first)` in an ordered map, so the output is sorted by name and
/// identical for any permutation of the input.
pub fn aggregate(rows: &[ClassifiedRow], convention: NameConvention) -> Vec<InstructorSummaryRow> {
    let mut groups: BTreeMap<InstructorKey, LoadTotals> = BTreeMap::new();
    let mut kept: Vec<&ClassifiedRow> = Vec::with_capacity(rows.len());

    for row in rows {
        let key = split_name(&row.raw.instructor, convention);
        if is_placeholder(&key) {
            continue;
        }
        groups
            .entry(key)
            .or_default()
            .add(row.bucket(), row.raw.enrolled);
        kept.push(row);
    }

    let notes = collect_notes(kept.iter().copied(), convention);

    groups
        .into_iter()
        .map(|((last, first), totals)| {
            let note = notes
                .get(&(last.clone(), first.clone()))
                .cloned()
                .unwrap_or_default();
            InstructorSummaryRow {
                last_name: last,
                first_name: first,
                ug_class_count: totals.ug_classes,
                ug_student_count: totals.ug_students,
                ug_superv_class_count: totals.ug_superv_classes,
                ug_superv_student_count: totals.ug_superv_students,
                grad_class_count: totals.grad_classes,
                grad_student_count: totals.grad_students,
                grad_superv_class_count: totals.grad_superv_classes,
                grad_superv_student_count: totals.grad_superv_students,
                note,
            }
        })
        .collect()
}
