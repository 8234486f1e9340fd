//! The fixed spreadsheet column schema.
//!
//! The output header is a literal wire contract with the spreadsheet
//! consumer, spelled exactly as the report recipients specified it,
//! misspellings included ("supervion", "Colum H"). Keeping the mapping as
//! one table makes the contract auditable and testable in isolation.

/// `(canonical field name, literal output label)` per column, in output
/// order.
pub const SUMMARY_COLUMNS: [(&str, &str); 11] = [
    ("last_name", "Last Name"),
    ("first_name", "First Name"),
    ("ug_class_count", "Total # of UG classes"),
    ("ug_student_count", "Total # of UG students from Column D"),
    ("ug_superv_class_count", "Total # of UG supervion classes"),
    ("ug_superv_student_count", "Total # of UG students from Column F"),
    ("grad_class_count", "Total # of Grad classes"),
    ("grad_student_count", "Total # of Grad students from Colum H"),
    ("grad_superv_class_count", "Total # of Grad supervion classes"),
    ("grad_superv_student_count", "Total # of Grad student from Column J"),
    ("note", "note"),
];

/// The output header labels in column order.
pub fn header_labels() -> impl Iterator<Item = &'static str> {
    SUMMARY_COLUMNS.iter().map(|(_, label)| *label)
}
