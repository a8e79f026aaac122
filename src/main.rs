mod aggregate;
mod analyzer;
mod export;
mod insights;
mod models;
mod report;
mod salary;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use models::JobRecord;
use report::ReportOptions;

#[derive(Parser)]
#[command(name = "trendscan")]
#[command(about = "Job trend analyzer - aggregate postings into market reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full text report for a batch of postings
    Report {
        /// JSON file with an array of job records
        input: PathBuf,

        /// Skill the batch was searched for (used in the report header)
        #[arg(short, long)]
        skill: String,

        /// Location the batch was searched in
        #[arg(short, long)]
        location: Option<String>,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Banner width for section separators
        #[arg(long, default_value = "80")]
        width: usize,
    },

    /// Dump the trends report as JSON
    Trends {
        /// JSON file with an array of job records
        input: PathBuf,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the raw records as CSV
    Csv {
        /// JSON file with an array of job records
        input: PathBuf,

        /// Destination CSV file
        output: PathBuf,
    },
}

/// Load a batch of records from a JSON array. Missing fields within a
/// record fall back to defaults; input that is not an array of objects
/// is an error, since treating it as empty would hide scraper bugs.
fn load_records(path: &Path) -> Result<Vec<JobRecord>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let records: Vec<JobRecord> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Not a valid job record array: {}", path.display()))?;
    Ok(records)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            skill,
            location,
            output,
            width,
        } => {
            let records = load_records(&input)?;
            println!("Analyzing {} job listings...", records.len());
            let trends = analyzer::analyze_trends(&records);

            let opts = ReportOptions {
                width,
                ..ReportOptions::default()
            };
            let text = report::render_report(&skill, location.as_deref(), &records, &trends, &opts);

            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write report to {}", path.display()))?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", text),
            }
        }

        Commands::Trends { input, output } => {
            let records = load_records(&input)?;
            println!("Analyzing {} job listings...", records.len());
            let trends = analyzer::analyze_trends(&records);
            let json = export::trends_to_json(&trends)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write trends to {}", path.display()))?;
                    println!("Trends written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Csv { input, output } => {
            let records = load_records(&input)?;
            let file = File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?;
            export::write_records_csv(&records, file)?;
            println!("Exported {} records to {}", records.len(), output.display());
        }
    }

    Ok(())
}
