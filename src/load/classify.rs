//! Course-level and supervision classification.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;

use crate::load::types::{ClassifiedRow, Level, RawCourseRow};

static COURSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{3})\b").expect("course number regex"));

static SUPERVISION_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Independent|Internship|Supervision|Thesis|Field|Research")
        .expect("supervision keyword regex")
});

/// Which graduate-level threshold to apply to the course number.
///
/// The two historical report variants disagreed: one compared the full
/// 3-digit number against 700, the other compared only the leading digit
/// against 7. They agree on well-formed 3-digit numbers, but both are kept
/// selectable so either report can be reproduced exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum GradRule {
    /// Graduate iff the full course number is >= 700.
    #[default]
    FullNumber,
    /// Graduate iff the course number's first digit is >= 7.
    LeadingDigit,
}

/// Extracts the first standalone 3-digit token from a course code.
///
/// `"FIN 350"` -> `Some(350)`, `"FIN"` -> `None`.
fn course_number(course_code: &str) -> Option<u32> {
    COURSE_NUMBER
        .captures(course_code)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Derives the career level from the course code under the given rule.
///
/// A missing or malformed course number fails open to undergraduate;
/// this never errors.
pub fn level_of(course_code: &str, rule: GradRule) -> Level {
    let Some(number) = course_number(course_code) else {
        return Level::Ug;
    };

    let grad = match rule {
        GradRule::FullNumber => number >= 700,
        GradRule::LeadingDigit => number / 100 >= 7,
    };

    if grad { Level::Grad } else { Level::Ug }
}

/// Returns `true` if the section title marks a supervision-type offering
/// (independent study, internship, thesis, field work, research).
pub fn is_supervision(title: &str) -> bool {
    SUPERVISION_KEYWORDS.is_match(title)
}

/// Labels a raw row with its level and supervision flag.
/// Pure function of its input, no side effects.
pub fn classify(raw: RawCourseRow, rule: GradRule) -> ClassifiedRow {
    let level = level_of(&raw.course_code, rule);
    let supervision = is_supervision(&raw.title);
    ClassifiedRow {
        raw,
        level,
        supervision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn raw(course_code: &str, title: &str) -> RawCourseRow {
        RawCourseRow {
            scraped_at: Utc::now(),
            course_type: String::new(),
            title: title.to_string(),
            units: "3".to_string(),
            course_code: course_code.to_string(),
            instructor: "Lee, Amy".to_string(),
            enrolled: 0,
            note: String::new(),
            course_link: None,
            class_number: "12345".to_string(),
        }
    }

    #[test]
    fn test_full_number_boundary() {
        assert_eq!(level_of("FIN 699", GradRule::FullNumber), Level::Ug);
        assert_eq!(level_of("FIN 700", GradRule::FullNumber), Level::Grad);
        assert_eq!(level_of("FIN 799", GradRule::FullNumber), Level::Grad);
        assert_eq!(level_of("FIN 350", GradRule::FullNumber), Level::Ug);
    }

    #[test]
    fn test_leading_digit_boundary() {
        assert_eq!(level_of("FIN 650", GradRule::LeadingDigit), Level::Ug);
        assert_eq!(level_of("FIN 699", GradRule::LeadingDigit), Level::Ug);
        assert_eq!(level_of("FIN 700", GradRule::LeadingDigit), Level::Grad);
        assert_eq!(level_of("FIN 750", GradRule::LeadingDigit), Level::Grad);
    }

    #[test]
    fn test_rules_agree_on_three_digit_numbers() {
        for n in [100u32, 699, 700, 701, 999] {
            let code = format!("ACCT {n}");
            assert_eq!(
                level_of(&code, GradRule::FullNumber),
                level_of(&code, GradRule::LeadingDigit),
                "rules diverged on {code}"
            );
        }
    }

    #[test]
    fn test_missing_course_number_fails_open_to_ug() {
        assert_eq!(level_of("FIN", GradRule::FullNumber), Level::Ug);
        assert_eq!(level_of("", GradRule::FullNumber), Level::Ug);
        assert_eq!(level_of("FIN 99", GradRule::FullNumber), Level::Ug);
        assert_eq!(level_of("FIN ABC", GradRule::LeadingDigit), Level::Ug);
    }

    #[test]
    fn test_letter_suffix_is_not_standalone() {
        // "880A" has no standalone 3-digit token, so it falls back to ug.
        assert_eq!(level_of("ENGL 880A", GradRule::FullNumber), Level::Ug);
        assert_eq!(level_of("ENGL 880", GradRule::FullNumber), Level::Grad);
    }

    #[test]
    fn test_supervision_keywords_case_insensitive() {
        assert!(is_supervision("Independent Study"));
        assert!(is_supervision("INTERNSHIP IN FINANCE"));
        assert!(is_supervision("Master's Thesis"));
        assert!(is_supervision("field experience"));
        assert!(is_supervision("Directed Research"));
        assert!(!is_supervision("Corporate Finance"));
        assert!(!is_supervision(""));
    }

    #[test]
    fn test_classify_combines_level_and_supervision() {
        let classified = classify(raw("FIN 799", "Master's Thesis"), GradRule::FullNumber);
        assert_eq!(classified.level, Level::Grad);
        assert!(classified.supervision);

        let classified = classify(raw("FIN 350", "Corporate Finance"), GradRule::FullNumber);
        assert_eq!(classified.level, Level::Ug);
        assert!(!classified.supervision);
    }
}
