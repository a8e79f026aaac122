use std::fmt::Write;

use crate::models::{JobRecord, SalaryBucket, TrendsReport};

/// Rendering knobs, passed explicitly so the renderer keeps no
/// process-wide state. Defaults reproduce the reference report layout.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Width of the '=' banner lines and title centering.
    pub width: usize,
    /// Line printed after the total in the header.
    pub data_sources: String,
    /// How many records get a detail block.
    pub detail_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            width: 80,
            data_sources: "LinkedIn, Glassdoor, Indeed".to_string(),
            detail_limit: 20,
        }
    }
}

fn banner(out: &mut String, title: &str, width: usize) {
    let rule = "=".repeat(width);
    let pad = width.saturating_sub(title.len()) / 2;
    let _ = write!(out, "\n{}\n{}{}\n{}\n\n", rule, " ".repeat(pad), title, rule);
}

/// "1234567.0" -> "1,234,567"
fn format_thousands(value: f64) -> String {
    let whole = value.round() as i64;
    let digits = whole.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn pct(count: usize, total: usize) -> f64 {
    (count as f64 / total.max(1) as f64) * 100.0
}

fn top_or_placeholder(table: &[(String, usize)]) -> (&str, usize) {
    table
        .first()
        .map(|(label, count)| (label.as_str(), *count))
        .unwrap_or(("N/A", 0))
}

/// Render the full text report for one analysis run.
///
/// Pure string construction: same inputs give the same document, and
/// empty tables render as placeholders instead of failing. Section
/// order follows the reference report; writing the result to a file
/// is the caller's business.
pub fn render_report(
    skill: &str,
    location: Option<&str>,
    records: &[JobRecord],
    trends: &TrendsReport,
    opts: &ReportOptions,
) -> String {
    let total = trends.total_jobs;
    let search_query = match location {
        Some(loc) if !loc.is_empty() => format!("{} in {}", skill, loc),
        _ => skill.to_string(),
    };

    let mut out = String::new();
    banner(&mut out, "REAL-TIME JOB TREND ANALYZER REPORT", opts.width);
    let _ = writeln!(out, "Search Query: {}", search_query);
    let _ = writeln!(out, "Generated: {}", trends.analysis_date);
    let _ = writeln!(out, "Total Jobs Found: {}", total);
    let _ = writeln!(out, "Data Sources: {}", opts.data_sources);

    banner(&mut out, "EXECUTIVE SUMMARY", opts.width);
    let (top_title, title_count) = top_or_placeholder(&trends.top_jobs);
    let (top_skill, skill_count) = top_or_placeholder(&trends.top_skills);
    let (top_city, city_count) = top_or_placeholder(&trends.top_cities);
    let (top_company, company_count) = top_or_placeholder(&trends.top_companies);
    let _ = writeln!(out, "Top Job Title: {} ({} positions)", top_title, title_count);
    let _ = writeln!(out, "Most Required Skill: {} ({} mentions)", top_skill, skill_count);
    let _ = writeln!(out, "Top Hiring Location: {} ({} jobs)", top_city, city_count);
    let _ = writeln!(out, "Top Hiring Company: {} ({} jobs)", top_company, company_count);

    banner(&mut out, "KEY MARKET INSIGHTS", opts.width);
    for insight in &trends.insights {
        let _ = writeln!(out, "* {}", insight);
    }

    banner(&mut out, "TOP 10 JOB TITLES", opts.width);
    for (i, (title, count)) in trends.top_jobs.iter().take(10).enumerate() {
        let _ = writeln!(out, "{:2}. {:<40} - {:3} positions", i + 1, title, count);
    }

    banner(&mut out, "TOP 15 REQUIRED SKILLS", opts.width);
    for (i, (name, count)) in trends.top_skills.iter().take(15).enumerate() {
        let _ = writeln!(out, "{:2}. {:<30} - {:3} mentions", i + 1, name, count);
    }

    banner(&mut out, "TOP 10 HIRING LOCATIONS", opts.width);
    for (i, (city, count)) in trends.top_cities.iter().take(10).enumerate() {
        let _ = writeln!(out, "{:2}. {:<35} - {:3} jobs", i + 1, city, count);
    }

    banner(&mut out, "TOP 10 HIRING COMPANIES", opts.width);
    for (i, (company, count)) in trends.top_companies.iter().take(10).enumerate() {
        let _ = writeln!(out, "{:2}. {:<30} - {:3} jobs", i + 1, company, count);
    }

    banner(&mut out, "JOB TYPE DISTRIBUTION", opts.width);
    for (job_type, count) in &trends.job_type_distribution {
        let _ = writeln!(
            out,
            "{:<15} - {:3} jobs ({:5.1}%)",
            job_type,
            count,
            pct(*count, total)
        );
    }

    banner(&mut out, "SALARY INFORMATION", opts.width);
    let salary = &trends.salary_info;
    let _ = writeln!(
        out,
        "Jobs with Salary Info: {}/{}",
        salary.total_with_salary, total
    );
    match salary.average_salary {
        Some(avg) => {
            let _ = writeln!(out, "Average Salary: ${} (if available)", format_thousands(avg));
        }
        None => {
            let _ = writeln!(out, "Average Salary: Not available");
        }
    }
    let _ = writeln!(out, "\nSalary Distribution:");
    for bucket in SalaryBucket::ALL {
        let _ = writeln!(
            out,
            "  {}: {} jobs",
            bucket.human_label(),
            salary.salary_ranges.count(bucket)
        );
    }
    let _ = writeln!(out, "\nSample Salary Ranges:");
    for sample in salary.sample_salaries.iter().take(10) {
        let _ = writeln!(out, "  * {}", sample);
    }

    banner(
        &mut out,
        &format!("DETAILED JOB LISTINGS (First {})", opts.detail_limit),
        opts.width,
    );
    for (i, record) in records.iter().take(opts.detail_limit).enumerate() {
        let _ = writeln!(out, "\nJob #{}", i + 1);
        let _ = writeln!(out, "{}", "-".repeat(50));
        let _ = writeln!(out, "Title: {}", record.title);
        let _ = writeln!(out, "Company: {}", record.company);
        let _ = writeln!(out, "Location: {}", record.location);
        let _ = writeln!(out, "Source: {}", record.source);
        let _ = writeln!(out, "Job Type: {}", record.job_type);
        let _ = writeln!(out, "Date Posted: {}", record.date_posted);
        if record.has_salary() {
            let _ = writeln!(out, "Salary: {}", record.salary.as_deref().unwrap_or_default());
        } else {
            let _ = writeln!(out, "Salary: Not specified");
        }
        let _ = writeln!(out, "Required Skills: {}", record.skills.join(", "));
        let _ = writeln!(out, "URL: {}", record.url.as_deref().unwrap_or("Not available"));
    }
    if records.len() > opts.detail_limit {
        let _ = writeln!(
            out,
            "\n... and {} more jobs (see full data export for complete listings)",
            records.len() - opts.detail_limit
        );
    }

    banner(&mut out, "DATA SOURCES", opts.width);
    for (source, count) in &trends.sources {
        let _ = writeln!(out, "{}: {} jobs ({:.1}%)", source, count, pct(*count, total));
    }

    banner(&mut out, "METHODOLOGY", opts.width);
    let _ = writeln!(out, "Data Collection Process:");
    let _ = writeln!(out, "1. Search performed for \"{}\"", search_query);
    let _ = writeln!(out, "2. Job listings collected from {}", opts.data_sources);
    let _ = writeln!(
        out,
        "3. Data extracted: title, company, location, skills, posting date, salary"
    );
    let _ = writeln!(out, "4. Results aggregated and analyzed for trends");
    let _ = writeln!(out, "5. Data exported to multiple formats (TXT, CSV, JSON)");
    let _ = writeln!(out, "\nEthical Scraping Practices:");
    let _ = writeln!(out, "- Respectful request rates (2-4 second delays)");
    let _ = writeln!(out, "- robots.txt compliance awareness");
    let _ = writeln!(out, "- User-agent identification");
    let _ = writeln!(out, "- No personal data collection");
    let _ = writeln!(out, "- Rate limiting to prevent server overload");

    banner(&mut out, "DISCLAIMER", opts.width);
    let _ = writeln!(
        out,
        "This data is for informational purposes only. Job market trends can change\n\
         rapidly. For the most current information, please visit the respective job\n\
         platforms directly.\n\n\
         The salary information and job descriptions are based on publicly available\n\
         job postings and may not reflect actual compensation or complete job requirements.\n\n\
         Some data may be supplemented with representative examples to demonstrate\n\
         the system's capabilities when real-time scraping encounters limitations."
    );
    let _ = writeln!(out, "\nReport generated by Real-Time Job Trend Analyzer");
    let _ = writeln!(out, "{}", "=".repeat(opts.width));

    out
}
