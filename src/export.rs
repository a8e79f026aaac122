use anyhow::{Context, Result};
use std::io::Write;

use crate::models::{JobRecord, TrendsReport};

/// Write the batch as CSV, one row per record. Skills collapse back to
/// a single ", "-joined cell; absent optional fields become empty cells.
pub fn write_records_csv<W: Write>(records: &[JobRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "title",
        "company",
        "location",
        "skills",
        "date_posted",
        "source",
        "salary",
        "job_type",
        "description",
        "url",
    ])?;

    for record in records {
        csv_writer.write_record([
            record.title.as_str(),
            record.company.as_str(),
            record.location.as_str(),
            &record.skills.join(", "),
            record.date_posted.as_str(),
            record.source.as_str(),
            record.salary.as_deref().unwrap_or(""),
            record.job_type.as_str(),
            record.description.as_deref().unwrap_or(""),
            record.url.as_deref().unwrap_or(""),
        ])?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn trends_to_json(trends: &TrendsReport) -> Result<String> {
    serde_json::to_string_pretty(trends).context("Failed to serialize trends report")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::analyze_trends;

    fn records(json: &str) -> Vec<JobRecord> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let batch = records(
            r#"[
                {"title": "Dev, Senior", "company": "Acme", "skills": ["Rust", "SQL"]},
                {"title": "Analyst"}
            ]"#,
        );
        let mut buffer = Vec::new();
        write_records_csv(&batch, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("title,company,location"));
        // Comma-bearing fields get quoted
        assert!(lines[1].contains("\"Dev, Senior\""));
        assert!(lines[1].contains("\"Rust, SQL\""));
    }

    #[test]
    fn test_trends_json_round_trips_counts() {
        let batch = records(r#"[{"title": "Dev", "skills": ["Rust"]}]"#);
        let report = analyze_trends(&batch);
        let json = trends_to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_jobs"], 1);
        assert_eq!(value["top_skills"][0][0], "Rust");
        assert_eq!(value["salary_info"]["average_salary"], serde_json::Value::Null);
    }
}
