use std::sync::LazyLock;

use regex::Regex;

use crate::models::{JobRecord, SalaryBucket, SalarySummary};

static DIGIT_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());

const SAMPLE_SALARY_LIMIT: usize = 10;
const SALARY_VALUE_LIMIT: usize = 20;

/// Turn a free-text salary string into a single point estimate.
///
/// All maximal digit runs are taken left to right, ignoring currency
/// symbols, commas and any other separators. Two or more runs are read
/// as a range and averaged ("$80k - $120k" -> 100000); one run stands
/// alone. A 'k' anywhere in the string scales the result by 1000,
/// applied once no matter how many runs were found.
///
/// Returns None for strings with no digits, and for digit runs too
/// large to fit an i64 (skipped rather than aborting the batch).
pub fn parse_salary(raw: &str) -> Option<f64> {
    let runs: Vec<&str> = DIGIT_RUNS.find_iter(raw).map(|m| m.as_str()).collect();
    if runs.is_empty() {
        return None;
    }

    let mut estimate = if runs.len() >= 2 {
        let low: i64 = runs[0].parse().ok()?;
        let high: i64 = runs[1].parse().ok()?;
        (low + high) as f64 / 2.0
    } else {
        let value: i64 = runs[0].parse().ok()?;
        value as f64
    };

    if raw.to_lowercase().contains('k') {
        estimate *= 1000.0;
    }

    Some(estimate)
}

/// Summarize salary information across the whole batch.
///
/// Every record with a non-empty salary field counts toward coverage
/// and may appear among the raw samples, whether or not its text
/// parses. Only parsed estimates feed the buckets and the average.
pub fn summarize(records: &[JobRecord]) -> SalarySummary {
    let mut summary = SalarySummary::default();
    let mut parsed_total = 0.0;
    let mut parsed_count = 0usize;

    for record in records {
        if !record.has_salary() {
            continue;
        }
        let raw = record.salary.as_deref().unwrap_or_default();

        summary.total_with_salary += 1;
        if summary.sample_salaries.len() < SAMPLE_SALARY_LIMIT {
            summary.sample_salaries.push(raw.to_string());
        }

        if let Some(estimate) = parse_salary(raw) {
            summary.salary_ranges.increment(SalaryBucket::for_estimate(estimate));
            if summary.salary_values.len() < SALARY_VALUE_LIMIT {
                summary.salary_values.push(estimate);
            }
            parsed_total += estimate;
            parsed_count += 1;
        }
    }

    if parsed_count > 0 {
        summary.average_salary = Some(parsed_total / parsed_count as f64);
    }

    summary
}
