use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

fn default_unknown() -> String {
    "Unknown".to_string()
}

fn default_job_type() -> String {
    "Full-time".to_string()
}

fn default_date_posted() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Skills arrive either as a list or as a single ", "-joined string.
/// Both forms normalize to the same Vec here so nothing downstream
/// has to branch on the input shape.
fn deserialize_skills<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SkillsField {
        List(Vec<String>),
        Joined(String),
    }

    match SkillsField::deserialize(deserializer)? {
        SkillsField::List(skills) => Ok(skills),
        SkillsField::Joined(s) => Ok(s.split(", ").map(str::to_string).collect()),
    }
}

/// One job posting as delivered by a scraper or feed. Absent fields get
/// fixed defaults at deserialization; records are never mutated after that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default = "default_unknown")]
    pub title: String,
    #[serde(default = "default_unknown")]
    pub company: String,
    #[serde(default = "default_unknown")]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_skills")]
    pub skills: Vec<String>,
    #[serde(default = "default_date_posted")]
    pub date_posted: String, // YYYY-MM-DD
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default)]
    pub salary: Option<String>, // free text, any currency/format
    #[serde(default = "default_unknown")]
    pub source: String, // "LinkedIn", "Indeed", etc.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl JobRecord {
    /// An empty-string salary counts the same as a missing one.
    pub fn has_salary(&self) -> bool {
        self.salary.as_deref().is_some_and(|s| !s.is_empty())
    }
}

/// Frequency table entries: (label, count), count descending,
/// ties kept in first-encountered order.
pub type RankedTable = Vec<(String, usize)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBucket {
    Under50k,
    From50kTo100k,
    From100kTo150k,
    Over150k,
}

impl SalaryBucket {
    pub const ALL: [SalaryBucket; 4] = [
        SalaryBucket::Under50k,
        SalaryBucket::From50kTo100k,
        SalaryBucket::From100kTo150k,
        SalaryBucket::Over150k,
    ];

    /// Half-open boundaries: exactly 100000 lands in 100k_150k.
    pub fn for_estimate(estimate: f64) -> Self {
        if estimate < 50_000.0 {
            SalaryBucket::Under50k
        } else if estimate < 100_000.0 {
            SalaryBucket::From50kTo100k
        } else if estimate < 150_000.0 {
            SalaryBucket::From100kTo150k
        } else {
            SalaryBucket::Over150k
        }
    }

    /// Underscore-to-space form used in the text report
    /// ("under_50k" -> "Under 50k").
    pub fn human_label(self) -> &'static str {
        match self {
            SalaryBucket::Under50k => "Under 50k",
            SalaryBucket::From50kTo100k => "50k 100k",
            SalaryBucket::From100kTo150k => "100k 150k",
            SalaryBucket::Over150k => "Over 150k",
        }
    }
}

/// Counts per salary bucket, always all four keys.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SalaryRanges {
    pub under_50k: usize,
    #[serde(rename = "50k_100k")]
    pub from_50k_to_100k: usize,
    #[serde(rename = "100k_150k")]
    pub from_100k_to_150k: usize,
    pub over_150k: usize,
}

impl SalaryRanges {
    pub fn increment(&mut self, bucket: SalaryBucket) {
        match bucket {
            SalaryBucket::Under50k => self.under_50k += 1,
            SalaryBucket::From50kTo100k => self.from_50k_to_100k += 1,
            SalaryBucket::From100kTo150k => self.from_100k_to_150k += 1,
            SalaryBucket::Over150k => self.over_150k += 1,
        }
    }

    pub fn count(&self, bucket: SalaryBucket) -> usize {
        match bucket {
            SalaryBucket::Under50k => self.under_50k,
            SalaryBucket::From50kTo100k => self.from_50k_to_100k,
            SalaryBucket::From100kTo150k => self.from_100k_to_150k,
            SalaryBucket::Over150k => self.over_150k,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SalarySummary {
    pub total_with_salary: usize,
    /// First 10 raw salary strings encountered, input order.
    pub sample_salaries: Vec<String>,
    pub salary_ranges: SalaryRanges,
    /// Mean over every parsed estimate; None when nothing parsed.
    pub average_salary: Option<f64>,
    /// First 20 parsed estimates, input order (for visualization).
    pub salary_values: Vec<f64>,
}

/// Complete output of one analysis run. Built once, then read-only.
#[derive(Debug, Clone, Serialize)]
pub struct TrendsReport {
    pub total_jobs: usize,
    pub top_jobs: RankedTable,      // top 20
    pub top_skills: RankedTable,    // top 25
    pub top_cities: RankedTable,    // top 15
    pub top_companies: RankedTable, // top 15
    pub posting_trends: BTreeMap<String, usize>,
    pub job_type_distribution: BTreeMap<String, usize>,
    pub salary_info: SalarySummary,
    pub sources: RankedTable, // ranked but never truncated
    pub insights: Vec<String>,
    pub analysis_date: String,
}
