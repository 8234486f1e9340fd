//! Per-instructor note collection.

use std::collections::{BTreeMap, BTreeSet};

use crate::load::names::{NameConvention, split_name};
use crate::load::types::{ClassifiedRow, InstructorKey};

/// Gathers the non-empty `note` values of each instructor's rows into a
/// deduplicated, lexicographically sorted, `"; "`-joined string.
///
/// Every instructor present in `rows` gets a key, with an empty string when
/// none of their rows carry a note.
pub fn collect_notes<'a>(
    rows: impl IntoIterator<Item = &'a ClassifiedRow>,
    convention: NameConvention,
) -> BTreeMap<InstructorKey, String> {
    let mut grouped: BTreeMap<InstructorKey, BTreeSet<&'a str>> = BTreeMap::new();

    for row in rows {
        let key = split_name(&row.raw.instructor, convention);
        let notes = grouped.entry(key).or_default();
        let note = row.raw.note.trim();
        if !note.is_empty() {
            notes.insert(note);
        }
    }

    grouped
        .into_iter()
        .map(|(key, notes)| {
            let joined = notes.into_iter().collect::<Vec<_>>().join("; ");
            (key, joined)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::classify::{GradRule, classify};
    use crate::load::types::RawCourseRow;
    use chrono::Utc;

    fn row(instructor: &str, note: &str) -> ClassifiedRow {
        classify(
            RawCourseRow {
                scraped_at: Utc::now(),
                course_type: String::new(),
                title: "Corporate Finance".to_string(),
                units: "3".to_string(),
                course_code: "FIN 350".to_string(),
                instructor: instructor.to_string(),
                enrolled: 0,
                note: note.to_string(),
                course_link: None,
                class_number: "12345".to_string(),
            },
            GradRule::FullNumber,
        )
    }

    #[test]
    fn test_dedup_sort_join() {
        let rows = vec![
            row("Lee, Amy", "cross-listed"),
            row("Lee, Amy", ""),
            row("Lee, Amy", "paired"),
            row("Lee, Amy", "cross-listed"),
        ];

        let notes = collect_notes(&rows, NameConvention::CommaSeparated);
        let key = ("Lee".to_string(), "Amy".to_string());
        assert_eq!(notes.get(&key).map(String::as_str), Some("cross-listed; paired"));
    }

    #[test]
    fn test_instructor_without_notes_gets_empty_string() {
        let rows = vec![row("Smith, Jane", "")];

        let notes = collect_notes(&rows, NameConvention::CommaSeparated);
        let key = ("Smith".to_string(), "Jane".to_string());
        assert_eq!(notes.get(&key).map(String::as_str), Some(""));
    }

    #[test]
    fn test_notes_are_grouped_per_instructor() {
        let rows = vec![
            row("Lee, Amy", "paired"),
            row("Smith, Jane", "cross-listed"),
        ];

        let notes = collect_notes(&rows, NameConvention::CommaSeparated);
        assert_eq!(notes.len(), 2);
        assert_eq!(
            notes[&("Lee".to_string(), "Amy".to_string())],
            "paired".to_string()
        );
        assert_eq!(
            notes[&("Smith".to_string(), "Jane".to_string())],
            "cross-listed".to_string()
        );
    }
}
