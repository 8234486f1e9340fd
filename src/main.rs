//! CLI entry point for the instructor-load reporting tool.
//!
//! Provides subcommands for scraping a term/subject class schedule into a
//! per-instructor teaching-load workbook, and for rebuilding the workbook
//! offline from a previously dumped raw-rows CSV.

mod infra;
mod services;

use std::ffi::OsStr;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use instructor_load::{
    load::{
        aggregate::aggregate,
        classify::{GradRule, classify},
        names::NameConvention,
        types::ClassifiedRow,
    },
    output::{append_raw_record, log_summary, print_json, read_raw_records, write_workbook},
    parser::{parse_course_code, parse_enrollment, parse_rows},
};
use regex::Regex;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::infra::classsearch::client::ClassSearchClient;
use crate::services::schedule_api::{ScheduleSource, SearchQuery};

#[derive(Parser)]
#[command(name = "instructor_load")]
#[command(about = "A tool to build per-instructor teaching-load reports from a class schedule", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a term/subject schedule and write the instructor-load workbook
    Scrape {
        /// 4-digit term code (e.g. 2253 for Spring 2025)
        #[arg(short, long, value_parser = parse_term)]
        term: String,

        /// Department code, 2-5 letters (e.g. FIN, ACCT)
        #[arg(short, long, value_parser = parse_code)]
        subject: String,

        /// Class category code (e.g. REG, EXT)
        #[arg(short, long, default_value = "REG", value_parser = parse_code)]
        class_category: String,

        /// Output xlsx path (default: <subject>_<term>_instructor_load.xlsx)
        #[arg(short, long)]
        output: Option<String>,

        /// Also dump the raw scraped rows to this CSV file
        #[arg(long)]
        raw_csv: Option<String>,

        /// Delay between section detail-page visits, in milliseconds
        #[arg(long, default_value_t = 1000)]
        delay_ms: u64,

        /// Graduate-level threshold rule
        #[arg(long, value_enum, default_value = "full-number")]
        grad_rule: GradRule,
    },
    /// Rebuild the workbook from a raw-rows CSV dump, without scraping
    Summarize {
        /// Raw-rows CSV produced by `scrape --raw-csv`
        #[arg(short, long)]
        input: String,

        /// Output xlsx path
        #[arg(short, long)]
        output: String,

        /// Worksheet name
        #[arg(long, default_value = "Instructor Load")]
        sheet: String,

        /// Graduate-level threshold rule
        #[arg(long, value_enum, default_value = "full-number")]
        grad_rule: GradRule,

        /// Shape of the instructor strings in the input CSV
        #[arg(long, value_enum, default_value = "comma-separated")]
        name_convention: NameConvention,

        /// Also log the summary as pretty-printed JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

static TERM_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("term regex"));

static CODE_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,5}$").expect("code regex"));

fn parse_term(s: &str) -> Result<String, String> {
    if TERM_FORMAT.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(format!("'{s}' is not a 4-digit term code (e.g. 2253)"))
    }
}

fn parse_code(s: &str) -> Result<String, String> {
    if CODE_FORMAT.is_match(s) {
        Ok(s.to_uppercase())
    } else {
        Err(format!("'{s}' is not a 2-5 letter code (e.g. FIN, REG)"))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/instructor_load.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("instructor_load.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            term,
            subject,
            class_category,
            output,
            raw_csv,
            delay_ms,
            grad_rule,
        } => {
            run_scrape(
                SearchQuery {
                    term,
                    subject,
                    class_category,
                },
                output,
                raw_csv,
                delay_ms,
                grad_rule,
            )
            .await?;
        }
        Commands::Summarize {
            input,
            output,
            sheet,
            grad_rule,
            name_convention,
            json,
        } => {
            run_summarize(&input, &output, &sheet, grad_rule, name_convention, json)?;
        }
    }

    Ok(())
}

/// Runs the full scrape pipeline for one query: results page, per-section
/// enrollment enrichment, aggregation, workbook.
///
/// Sequential end-to-end: one HTTP session, one page in flight at a time,
/// a politeness delay after each detail visit. A failed detail visit leaves
/// that row's enrollment at 0 and the batch continues.
#[tracing::instrument(skip(output, raw_csv, grad_rule), fields(term = %query.term, subject = %query.subject))]
async fn run_scrape(
    query: SearchQuery,
    output: Option<String>,
    raw_csv: Option<String>,
    delay_ms: u64,
    grad_rule: GradRule,
) -> Result<()> {
    let client = ClassSearchClient::from_env()?;

    info!(class_category = %query.class_category, "Fetching search results");
    let page = client.search_results(&query).await?;

    let mut rows = parse_rows(&page, &query.subject, client.base_url());
    if rows.is_empty() {
        bail!(
            "no course rows found for {} {}; check that the term/subject combination exists",
            query.subject,
            query.term
        );
    }
    info!(rows = rows.len(), "Course rows parsed");

    let delay = Duration::from_millis(delay_ms);
    let total = rows.len();

    for (i, row) in rows.iter_mut().enumerate() {
        if let Some(link) = row.course_link.clone() {
            match client.detail_page(&link).await {
                Ok(detail) => {
                    match parse_enrollment(&detail) {
                        Some(enrolled) => row.enrolled = enrolled,
                        None => warn!(
                            class_number = %row.class_number,
                            "Enrollment not found on detail page, defaulting to 0"
                        ),
                    }
                    if let Some(code) = parse_course_code(&detail) {
                        row.course_code = code;
                    }
                }
                Err(e) => warn!(
                    class_number = %row.class_number,
                    error = %e,
                    "Detail page fetch failed, enrollment stays 0"
                ),
            }

            tokio::time::sleep(delay).await;
        }

        if (i + 1) % 5 == 0 {
            info!(processed = i + 1, total, "Detail pages processed");
        }
    }

    if let Some(path) = &raw_csv {
        for row in &rows {
            append_raw_record(path, row)?;
        }
        info!(path = %path, rows = rows.len(), "Raw rows written");
    }

    let classified: Vec<ClassifiedRow> =
        rows.into_iter().map(|r| classify(r, grad_rule)).collect();
    let summary = aggregate(&classified, NameConvention::CommaSeparated);

    let output = output.unwrap_or_else(|| {
        format!(
            "{}_{}_instructor_load.xlsx",
            query.subject.to_lowercase(),
            query.term
        )
    });
    let sheet = format!("{}_{}", query.subject, query.term);
    write_workbook(&output, &sheet, &summary)?;

    info!(
        instructors = summary.len(),
        sections = classified.len(),
        output = %output,
        "Scrape complete"
    );
    log_summary(&summary);

    Ok(())
}

/// Re-aggregates a raw-rows CSV dump into the workbook, no network needed.
#[tracing::instrument(skip(grad_rule, name_convention, json))]
fn run_summarize(
    input: &str,
    output: &str,
    sheet: &str,
    grad_rule: GradRule,
    name_convention: NameConvention,
    json: bool,
) -> Result<()> {
    let raw = read_raw_records(input)?;
    if raw.is_empty() {
        bail!("no rows in {input}");
    }

    let classified: Vec<ClassifiedRow> =
        raw.into_iter().map(|r| classify(r, grad_rule)).collect();
    let summary = aggregate(&classified, name_convention);

    if json {
        print_json(&summary)?;
    }

    write_workbook(output, sheet, &summary)?;
    info!(
        instructors = summary.len(),
        sections = classified.len(),
        output,
        "Summary rebuilt"
    );
    log_summary(&summary);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_term_valid() {
        assert_eq!(parse_term("2253").unwrap(), "2253");
    }

    #[test]
    fn test_parse_term_invalid() {
        assert!(parse_term("225").is_err());
        assert!(parse_term("22533").is_err());
        assert!(parse_term("FIN5").is_err());
        assert!(parse_term("").is_err());
    }

    #[test]
    fn test_parse_code_upcases() {
        assert_eq!(parse_code("fin").unwrap(), "FIN");
        assert_eq!(parse_code("ACCT").unwrap(), "ACCT");
    }

    #[test]
    fn test_parse_code_invalid() {
        assert!(parse_code("F").is_err());
        assert!(parse_code("FINANC").is_err());
        assert!(parse_code("FIN1").is_err());
    }
}
