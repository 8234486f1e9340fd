//! Instructor name splitting.
//!
//! The schedule feed carries instructors as free text whose shape depends on
//! the upstream collaborator: the results-page parser emits "Last, First",
//! while older CSV dumps carry "First Last" with no comma. The convention is
//! an explicit parameter rather than a global assumption.

use clap::ValueEnum;

/// Expected shape of the raw instructor string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum NameConvention {
    /// "Last, First" — split on the first comma. Input without a comma
    /// falls through to the whitespace rule.
    #[default]
    CommaSeparated,
    /// "First Last" with commas treated as noise: commas are stripped and
    /// the whitespace rule applies directly.
    SpaceSeparated,
}

/// Splits a raw instructor string into `(last, first)`.
///
/// Empty input yields `("", "")`. Under the whitespace rule the first token
/// is the last name and the remaining tokens, joined, are the first name;
/// a single token is treated entirely as a last name.
pub fn split_name(raw: &str, convention: NameConvention) -> (String, String) {
    let raw = raw.trim();
    if raw.is_empty() {
        return (String::new(), String::new());
    }

    match convention {
        NameConvention::CommaSeparated => {
            if let Some((last, first)) = raw.split_once(',') {
                (last.trim().to_string(), first.trim().to_string())
            } else {
                split_whitespace_rule(raw)
            }
        }
        NameConvention::SpaceSeparated => {
            let stripped = raw.replace(',', " ");
            split_whitespace_rule(stripped.trim())
        }
    }
}

fn split_whitespace_rule(raw: &str) -> (String, String) {
    let mut tokens = raw.split_whitespace();
    let last = tokens.next().unwrap_or_default().to_string();
    let first = tokens.collect::<Vec<_>>().join(" ");
    (last, first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            split_name("Smith, Jane", NameConvention::CommaSeparated),
            ("Smith".to_string(), "Jane".to_string())
        );
    }

    #[test]
    fn test_comma_separated_trims_whitespace() {
        assert_eq!(
            split_name("  O'Brien ,  Mary Kate ", NameConvention::CommaSeparated),
            ("O'Brien".to_string(), "Mary Kate".to_string())
        );
    }

    #[test]
    fn test_only_first_comma_splits() {
        assert_eq!(
            split_name("Smith, Jane, PhD", NameConvention::CommaSeparated),
            ("Smith".to_string(), "Jane, PhD".to_string())
        );
    }

    #[test]
    fn test_no_comma_falls_through_to_whitespace_rule() {
        assert_eq!(
            split_name("Jane Smith", NameConvention::CommaSeparated),
            ("Jane".to_string(), "Smith".to_string())
        );
    }

    #[test]
    fn test_space_separated() {
        assert_eq!(
            split_name("Smith Jane Ann", NameConvention::SpaceSeparated),
            ("Smith".to_string(), "Jane Ann".to_string())
        );
    }

    #[test]
    fn test_space_separated_strips_commas() {
        assert_eq!(
            split_name("Smith, Jane", NameConvention::SpaceSeparated),
            ("Smith".to_string(), "Jane".to_string())
        );
    }

    #[test]
    fn test_single_token_is_last_name() {
        assert_eq!(
            split_name("Smith", NameConvention::CommaSeparated),
            ("Smith".to_string(), String::new())
        );
        assert_eq!(
            split_name("Smith", NameConvention::SpaceSeparated),
            ("Smith".to_string(), String::new())
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            split_name("", NameConvention::CommaSeparated),
            (String::new(), String::new())
        );
        assert_eq!(
            split_name("   ", NameConvention::SpaceSeparated),
            (String::new(), String::new())
        );
    }
}
