use crate::aggregate::FrequencyTables;
use crate::models::JobRecord;

fn percentage(count: usize, total: usize) -> f64 {
    (count as f64 / total.max(1) as f64) * 100.0
}

/// Derive the market observations for a batch. Rules run in a fixed
/// order and each appends at most one sentence; ordering is by rule,
/// not by any importance measure. The size-tier rule always fires,
/// even for an empty batch; the rest need a non-zero total.
pub fn generate_insights(records: &[JobRecord], tables: &FrequencyTables) -> Vec<String> {
    let total = records.len();
    let mut insights = Vec::new();

    if total > 100 {
        insights.push(format!("Strong job market with {} opportunities found", total));
    } else if total > 50 {
        insights.push(format!("Moderate job market with {} opportunities", total));
    } else {
        insights.push(format!("Limited job market with {} opportunities", total));
    }

    if total == 0 {
        return insights;
    }

    if let Some((title, count)) = tables.top_jobs.first() {
        insights.push(format!(
            "'{}' is the most common position ({:.1}% of jobs)",
            title,
            percentage(*count, total)
        ));
    }

    // Skill share is measured against record count, not skill mentions,
    // so a skill listed by every record reads as 100%.
    if let Some((skill, count)) = tables.top_skills.first() {
        insights.push(format!(
            "'{}' is the most in-demand skill ({:.1}% of jobs)",
            skill,
            percentage(*count, total)
        ));
    }

    if let Some((city, count)) = tables.top_cities.first() {
        insights.push(format!(
            "'{}' has the highest concentration of jobs ({:.1}%)",
            city,
            percentage(*count, total)
        ));
    }

    // "remote" in either field counts, even when job_type is literally
    // the category "Remote"; the two cases are deliberately not told apart.
    let remote = records
        .iter()
        .filter(|r| {
            r.location.to_lowercase().contains("remote")
                || r.job_type.to_lowercase().contains("remote")
        })
        .count();
    if remote > 0 {
        insights.push(format!(
            "{:.1}% of jobs offer remote work options",
            percentage(remote, total)
        ));
    }

    let with_salary = records.iter().filter(|r| r.has_salary()).count();
    if with_salary > 0 {
        insights.push(format!(
            "{:.1}% of jobs include salary information",
            percentage(with_salary, total)
        ));
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;

    fn record(json: &str) -> JobRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_size_tier_thresholds() {
        let strong: Vec<JobRecord> = (0..101).map(|_| record("{}")).collect();
        let moderate: Vec<JobRecord> = (0..51).map(|_| record("{}")).collect();
        let limited: Vec<JobRecord> = (0..50).map(|_| record("{}")).collect();

        let insights = generate_insights(&strong, &aggregate(&strong));
        assert_eq!(insights[0], "Strong job market with 101 opportunities found");
        let insights = generate_insights(&moderate, &aggregate(&moderate));
        assert_eq!(insights[0], "Moderate job market with 51 opportunities");
        let insights = generate_insights(&limited, &aggregate(&limited));
        assert_eq!(insights[0], "Limited job market with 50 opportunities");
    }

    #[test]
    fn test_empty_batch_gets_only_size_tier() {
        let insights = generate_insights(&[], &aggregate(&[]));
        assert_eq!(insights, vec!["Limited job market with 0 opportunities"]);
    }

    #[test]
    fn test_remote_share_full_coverage() {
        let records = vec![
            record(r#"{"location": "Remote"}"#),
            record(r#"{"location": "New York, NY (Remote)"}"#),
            record(r#"{"location": "Austin, TX", "job_type": "Remote"}"#),
        ];
        let insights = generate_insights(&records, &aggregate(&records));
        assert!(insights.contains(&"100.0% of jobs offer remote work options".to_string()));
    }

    #[test]
    fn test_remote_rule_silent_when_no_remote_jobs() {
        let records = vec![record(r#"{"location": "Boston, MA"}"#)];
        let insights = generate_insights(&records, &aggregate(&records));
        assert!(!insights.iter().any(|i| i.contains("remote work")));
    }

    #[test]
    fn test_rule_order_and_wording() {
        let records = vec![
            record(
                r#"{"title": "Python Developer", "location": "Remote",
                    "skills": ["Python", "SQL"], "salary": "$100k"}"#,
            ),
            record(
                r#"{"title": "Python Developer", "location": "New York, NY",
                    "skills": ["Python"]}"#,
            ),
        ];
        let insights = generate_insights(&records, &aggregate(&records));
        assert_eq!(insights.len(), 6);
        assert_eq!(insights[0], "Limited job market with 2 opportunities");
        assert_eq!(
            insights[1],
            "'Python Developer' is the most common position (100.0% of jobs)"
        );
        assert_eq!(
            insights[2],
            "'Python' is the most in-demand skill (100.0% of jobs)"
        );
        assert_eq!(
            insights[3],
            "'Remote' has the highest concentration of jobs (50.0%)"
        );
        assert_eq!(insights[4], "50.0% of jobs offer remote work options");
        assert_eq!(insights[5], "50.0% of jobs include salary information");
    }

    #[test]
    fn test_skill_rule_skipped_without_skills() {
        let records = vec![record(r#"{"title": "Analyst"}"#)];
        let insights = generate_insights(&records, &aggregate(&records));
        assert!(!insights.iter().any(|i| i.contains("in-demand skill")));
    }
}
