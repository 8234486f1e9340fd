//! HTML parsers for the schedule results table and section detail pages.
//!
//! The schedule site's markup drifts between terms, so both parsers work
//! through ordered selector fallback chains: the first selector that yields
//! usable content wins. Parsing is best-effort and never panics; a row or
//! field that cannot be extracted is skipped or defaulted.

use std::sync::LazyLock;

use chrono::Utc;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::load::types::RawCourseRow;

/// Results-table row selectors, most specific first.
const ROW_SELECTORS: &[&str] = &["tr[data-role='row']", "tbody tr", "table tr"];

/// Detail-page enrollment selectors. The positional chains cover the layout
/// variants observed across terms; the id-substring selector covers the
/// portal-rendered variant.
const ENROLLMENT_SELECTORS: &[&str] = &[
    "#content > div > div.detail-container.row.class-details > div.col-md-4 > div > div:nth-child(7) > div.col-xs-5.col-md-6",
    "#content > div > div.detail-container.row.class-details > div.col-md-4 > div > div:nth-child(5) > div.col-xs-5.col-md-6",
    "#content > div > div.detail-container.row.class-details > div.col-md-4 > div > div:nth-child(6) > div.col-xs-5.col-md-6",
    "span[id*='ENRL_TOT']",
];

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("number regex"));

static COURSE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{2,4}\s+\d{3}[A-Z]?").expect("course code regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Collapses an element's text nodes into one trimmed, space-joined string.
fn cell_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Converts an "Instructors: First Last ..." cell into "Last, First".
///
/// Returns an empty string when the cell carries no instructor name.
fn instructor_from_cell(cell: &str) -> String {
    let Some(rest) = cell.split("Instructors:").nth(1) else {
        return String::new();
    };

    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [] => String::new(),
        [single] => (*single).to_string(),
        [first, last, ..] => format!("{last}, {first}"),
    }
}

/// Derives the note string from the course-type cell.
fn note_from_course_type(course_type: &str) -> String {
    let mut parts = Vec::new();
    if course_type.contains("Cross-Listed") {
        parts.push("cross-listed");
    }
    if course_type.contains("Paired") {
        parts.push("paired");
    }
    parts.join("; ")
}

/// Resolves a scraped href against the schedule host when it is relative.
fn absolute_link(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}

/// Parses the results page into raw section rows.
///
/// Header rows and rows with fewer than 3 cells are skipped, as are rows
/// without an instructor. `course_code` starts as a `"<SUBJECT>
/// <class_number>"` placeholder until the detail page supplies the real
/// code, and `enrolled` starts at 0.
pub fn parse_rows(page_source: &str, subject: &str, base_url: &str) -> Vec<RawCourseRow> {
    let doc = Html::parse_document(page_source);

    let mut course_rows = Vec::new();
    for css in ROW_SELECTORS {
        course_rows = doc.select(&selector(css)).collect::<Vec<_>>();
        if !course_rows.is_empty() {
            debug!(selector = css, row_count = course_rows.len(), "Results rows located");
            break;
        }
    }

    let td = selector("td");
    let anchor = selector("a");
    let mut rows = Vec::new();

    for tr in course_rows {
        let mut cells: Vec<String> = tr.select(&td).map(cell_text).collect();
        if cells.len() < 3 {
            continue;
        }

        let row_text = cells.join(" ").to_lowercase();
        if row_text.contains("course type") && row_text.contains("class number") {
            continue;
        }

        if cells.len() < 12 {
            cells.resize(12, String::new());
        }

        let course_type = cells[0].clone();
        let title = cells[1].clone();
        let units = cells[2].clone();
        let class_number = cells[3].clone();
        let instructor = instructor_from_cell(&cells[5]);

        if instructor.is_empty() {
            continue;
        }

        let course_link = tr
            .select(&anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| absolute_link(href, base_url));

        let note = note_from_course_type(&course_type);

        rows.push(RawCourseRow {
            scraped_at: Utc::now(),
            course_type,
            title,
            units,
            course_code: format!("{subject} {class_number}"),
            instructor,
            enrolled: 0,
            note,
            course_link,
            class_number,
        });
    }

    debug!(parsed = rows.len(), "Valid course rows parsed");
    rows
}

/// Extracts the enrolled-student count from a section detail page.
///
/// Tries the positional selector chain first, then scans every
/// `div.col-xs-5.col-md-6` for a bare integer in a plausible range.
pub fn parse_enrollment(page_source: &str) -> Option<u32> {
    let doc = Html::parse_document(page_source);

    for css in ENROLLMENT_SELECTORS {
        if let Some(el) = doc.select(&selector(css)).next() {
            let text = cell_text(el);
            if let Some(m) = FIRST_NUMBER.find(&text) {
                if let Ok(n) = m.as_str().parse() {
                    return Some(n);
                }
            }
        }
    }

    // Generic scan: the enrollment figure is a small bare integer.
    for el in doc.select(&selector("div.col-xs-5.col-md-6")) {
        let text = cell_text(el);
        if let Ok(n) = text.parse::<u32>() {
            if n <= 500 {
                return Some(n);
            }
        }
    }

    None
}

/// Extracts the first thing that looks like a course code ("FIN 350",
/// "MATH 115A") from a detail page's source.
pub fn parse_course_code(page_source: &str) -> Option<String> {
    COURSE_CODE
        .find(page_source)
        .map(|m| m.as_str().to_string())
}
