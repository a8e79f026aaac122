use crate::models::{JobRecord, TrendsReport};
use crate::{aggregate, insights, salary};

/// Run one full analysis over a batch of records.
///
/// Pure orchestration over the aggregator, salary summarizer and
/// insight rules; holds no state between calls, so separate analyses
/// can run concurrently on their own inputs. An empty batch yields a
/// well-formed empty report (all tables empty, no average salary, a
/// single size-tier insight) rather than an error.
pub fn analyze_trends(records: &[JobRecord]) -> TrendsReport {
    let tables = aggregate::aggregate(records);
    let salary_info = salary::summarize(records);
    let insights = insights::generate_insights(records, &tables);

    TrendsReport {
        total_jobs: records.len(),
        top_jobs: tables.top_jobs,
        top_skills: tables.top_skills,
        top_cities: tables.top_cities,
        top_companies: tables.top_companies,
        posting_trends: tables.posting_trends,
        job_type_distribution: tables.job_type_distribution,
        salary_info,
        sources: tables.sources,
        insights,
        analysis_date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}
