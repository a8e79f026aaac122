use std::collections::{BTreeMap, HashMap};

use crate::models::{JobRecord, RankedTable};

pub const TOP_TITLES: usize = 20;
pub const TOP_SKILLS: usize = 25;
pub const TOP_CITIES: usize = 15;
pub const TOP_COMPANIES: usize = 15;

/// Frequency tables over one batch of records. The top_* tables are
/// truncated to their fixed limits; sources, job types and posting
/// dates keep every key.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTables {
    pub top_jobs: RankedTable,
    pub top_skills: RankedTable,
    pub top_cities: RankedTable,
    pub top_companies: RankedTable,
    pub sources: RankedTable,
    pub posting_trends: BTreeMap<String, usize>,
    pub job_type_distribution: BTreeMap<String, usize>,
}

/// Count occurrences and rank them: count descending, ties broken by
/// first-encountered order. `limit` of None keeps the whole table.
fn count_ranked<I>(values: I, limit: Option<usize>) -> RankedTable
where
    I: IntoIterator<Item = String>,
{
    // (count, first-seen index) per label
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, value) in values.into_iter().enumerate() {
        let entry = counts.entry(value).or_insert((0, index));
        entry.0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, seen_a)), (_, (count_b, seen_b))| {
        count_b.cmp(count_a).then(seen_a.cmp(seen_b))
    });

    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked.into_iter().map(|(label, (count, _))| (label, count)).collect()
}

fn count_map<I>(values: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = String>,
{
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Build every frequency table for the batch. Keys are the exact field
/// strings as the source provided them; no case folding or trimming.
pub fn aggregate(records: &[JobRecord]) -> FrequencyTables {
    FrequencyTables {
        top_jobs: count_ranked(
            records.iter().map(|r| r.title.clone()),
            Some(TOP_TITLES),
        ),
        // Each record contributes one count per skill it lists.
        top_skills: count_ranked(
            records.iter().flat_map(|r| r.skills.iter().cloned()),
            Some(TOP_SKILLS),
        ),
        top_cities: count_ranked(
            records.iter().map(|r| r.location.clone()),
            Some(TOP_CITIES),
        ),
        top_companies: count_ranked(
            records.iter().map(|r| r.company.clone()),
            Some(TOP_COMPANIES),
        ),
        sources: count_ranked(records.iter().map(|r| r.source.clone()), None),
        posting_trends: count_map(records.iter().map(|r| r.date_posted.clone())),
        job_type_distribution: count_map(records.iter().map(|r| r.job_type.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> JobRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_count_ranked_descending_with_stable_ties() {
        let values = ["b", "a", "b", "c", "a", "d"].map(String::from);
        let ranked = count_ranked(values, None);
        // b and a tie at 2: b was seen first; c and d tie at 1: c first
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_count_ranked_truncates() {
        let values = (0..30).map(|i| format!("label{}", i));
        let ranked = count_ranked(values, Some(5));
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn test_counts_are_non_increasing() {
        let values = ["a", "b", "a", "c", "a", "b", "d", "d", "d", "d"].map(String::from);
        let ranked = count_ranked(values, None);
        for pair in ranked.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
    }

    #[test]
    fn test_skill_counts_sum_to_total_mentions() {
        let records = vec![
            record(r#"{"skills": ["Python", "Django", "SQL"]}"#),
            record(r#"{"skills": ["Python", "AWS"]}"#),
            record(r#"{"skills": []}"#),
        ];
        let tables = aggregate(&records);
        let mentions: usize = tables.top_skills.iter().map(|(_, count)| count).sum();
        assert_eq!(mentions, 5);
        assert_eq!(tables.top_skills[0], ("Python".to_string(), 2));
    }

    #[test]
    fn test_titles_keyed_on_exact_string() {
        let records = vec![
            record(r#"{"title": "Python Developer"}"#),
            record(r#"{"title": "python developer"}"#),
        ];
        let tables = aggregate(&records);
        assert_eq!(tables.top_jobs.len(), 2);
    }

    #[test]
    fn test_mappings_are_not_truncated() {
        let records: Vec<JobRecord> = (0..40)
            .map(|i| record(&format!(r#"{{"source": "site{}", "date_posted": "2024-01-{:02}"}}"#, i, i % 28 + 1)))
            .collect();
        let tables = aggregate(&records);
        assert_eq!(tables.sources.len(), 40);
        assert_eq!(tables.posting_trends.len(), 28);
    }

    #[test]
    fn test_empty_input_gives_empty_tables() {
        let tables = aggregate(&[]);
        assert!(tables.top_jobs.is_empty());
        assert!(tables.top_skills.is_empty());
        assert!(tables.sources.is_empty());
        assert!(tables.posting_trends.is_empty());
        assert!(tables.job_type_distribution.is_empty());
    }
}
