//! Validate the content directory

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::{day_file_number, parse_timestamp, FrontMatter, TOTAL_DAYS};
use crate::Advent;

/// One content problem found by the checker
#[derive(Debug)]
pub struct Finding {
    pub file: String,
    pub message: String,
}

/// Everything `check` found, split by severity.
///
/// Errors are problems in files that exist; gaps in the calendar are
/// warnings, because missing days are normal until December is over.
#[derive(Debug, Default)]
pub struct Report {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Report {
    fn error(&mut self, file: &str, message: impl Into<String>) {
        self.errors.push(Finding {
            file: file.to_string(),
            message: message.into(),
        });
    }

    fn warn(&mut self, file: &str, message: impl Into<String>) {
        self.warnings.push(Finding {
            file: file.to_string(),
            message: message.into(),
        });
    }
}

/// Run all checks and fail if any error was found
pub fn run(advent: &Advent) -> Result<()> {
    let report = check_content(&advent.content_dir)?;

    for finding in &report.warnings {
        println!("warning: {}: {}", finding.file, finding.message);
    }
    for finding in &report.errors {
        println!("error: {}: {}", finding.file, finding.message);
    }

    if report.errors.is_empty() {
        println!(
            "Content OK ({} warning{})",
            report.warnings.len(),
            if report.warnings.len() == 1 { "" } else { "s" }
        );
        Ok(())
    } else {
        anyhow::bail!("{} content problem(s) found", report.errors.len());
    }
}

/// Validate every day file and the index, with per-file isolation.
///
/// Unlike the store's listing, a malformed file does not stop the check;
/// it becomes a finding and the remaining files are still inspected.
pub fn check_content(content_dir: &Path) -> Result<Report> {
    let mut report = Report::default();
    let mut seen_days: HashMap<u32, String> = HashMap::new();

    for entry in WalkDir::new(content_dir).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(filename_day) = day_file_number(file_name) else {
            continue;
        };

        check_day_file(entry.path(), file_name, filename_day, &mut report);

        if filename_day < 1 || filename_day > TOTAL_DAYS {
            report.error(
                file_name,
                format!("day {} is outside the 1-{} calendar", filename_day, TOTAL_DAYS),
            );
        }

        if let Some(previous) = seen_days.insert(filename_day, file_name.to_string()) {
            report.error(
                file_name,
                format!("duplicate day {} (also in {})", filename_day, previous),
            );
        }
    }

    // Calendar gaps are expected while December is still running
    let missing: Vec<String> = (1..=TOTAL_DAYS)
        .filter(|day| !seen_days.contains_key(day))
        .map(|day| day.to_string())
        .collect();
    if !missing.is_empty() && !seen_days.is_empty() {
        report.warn("content", format!("missing days: {}", missing.join(", ")));
    }

    let index_path = content_dir.join("index.md");
    if index_path.exists() {
        match fs::read_to_string(&index_path) {
            Ok(raw) => {
                if let Err(err) = FrontMatter::parse(&raw) {
                    report.error("index.md", format!("{}", err));
                }
            }
            Err(err) => report.error("index.md", format!("unreadable: {}", err)),
        }
    } else {
        report.warn("index.md", "missing overview entry");
    }

    Ok(report)
}

fn check_day_file(path: &Path, file_name: &str, filename_day: u32, report: &mut Report) {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            report.error(file_name, format!("unreadable: {}", err));
            return;
        }
    };

    let fm = match FrontMatter::parse(&raw) {
        Ok((fm, _body)) => fm,
        Err(err) => {
            report.error(file_name, format!("{}", err));
            return;
        }
    };

    if fm.title.is_none() {
        report.error(file_name, "missing title");
    }

    if let Some(day) = fm.day {
        if day != filename_day {
            report.error(
                file_name,
                format!("front matter day {} disagrees with filename", day),
            );
        }
    }

    // Canonical names are unpadded; day-07.md would shadow day-7 lookups
    if file_name != format!("day-{}.md", filename_day) {
        report.error(
            file_name,
            format!("non-canonical filename, expected day-{}.md", filename_day),
        );
    }

    for (field, value) in [
        ("publishedAt", fm.published_at.as_deref()),
        ("updatedAt", fm.updated_at.as_deref()),
    ] {
        if let Some(value) = value {
            if parse_timestamp(value).is_none() {
                report.error(file_name, format!("{} is not a timestamp: {:?}", field, value));
            }
        }
    }
}
