use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use student_persona_dashboard::model::students_from_rows;
use student_persona_dashboard::query::{Direction, FieldFilter, QueryConfig, SortSpec};
use student_persona_dashboard::{dataset, report, server};

#[derive(Parser)]
#[command(name = "student-persona-dashboard")]
#[command(about = "Query and aggregation layer for the student persona dashboard", long_about = None)]
struct Cli {
    /// Path to the student metrics CSV
    #[arg(long, global = true, default_value = "students_processed.csv")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the parsed dataset over HTTP
    Serve {
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
    /// Print the roster, filtered and sorted
    Show {
        /// Substring match against student names
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "assessment_score")]
        sort_key: String,
        #[arg(long, value_enum, default_value_t = Direction::Descending)]
        direction: Direction,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Generate a markdown insights report
    Report {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value = "assessment_score")]
        sort_key: String,
        #[arg(long, value_enum, default_value_t = Direction::Descending)]
        direction: Direction,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write a small realistic dataset to the data path
    Seed,
}

const SAMPLE_DATA: &str = "\
student_id,name,assessment_score,predicted_score,attention,focus,retention,engagement_time,comprehension,cluster_name
stu-001,Avery Lee,92,88.40,81,77,85,52,90,High Performer
stu-002,Jules Moreno,68,71.10,64,59,62,38,66,Moderate Performer
stu-003,Kiara Patel,45,49.75,41,48,39,21,44,Needs Improvement
stu-004,Tomas Reyes,88,84.20,76,82,79,47,85,High Performer
stu-005,Noor Haddad,73,69.90,70,61,68,40,71,Moderate Performer
";

fn query_config(search: Option<&str>, sort_key: &str, direction: Direction) -> QueryConfig {
    QueryConfig {
        search: search.map(FieldFilter::name),
        sort: Some(SortSpec {
            key: sort_key.to_string(),
            direction,
        }),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            server::serve(cli.data, port).await;
        }
        Commands::Show {
            search,
            sort_key,
            direction,
            limit,
        } => {
            let table = dataset::load(&cli.data)?;
            let view = query_config(search.as_deref(), &sort_key, direction).apply(&table.rows);

            if view.is_empty() {
                println!("No students match this view.");
                return Ok(());
            }

            for student in students_from_rows(&view).into_iter().take(limit) {
                println!(
                    "- {} score {:.1}, predicted {:.2}, persona {}",
                    student.name,
                    student.assessment_score,
                    student.predicted_score,
                    student.cluster_name
                );
            }
        }
        Commands::Report {
            search,
            sort_key,
            direction,
            out,
        } => {
            let table = dataset::load(&cli.data)?;
            let view = query_config(search.as_deref(), &sort_key, direction).apply(&table.rows);
            let label = search.map(|s| format!("search \"{s}\""));
            let report = report::build_report(label.as_deref(), &view);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Seed => {
            std::fs::write(&cli.data, SAMPLE_DATA)
                .with_context(|| format!("failed to write {}", cli.data.display()))?;
            println!("Sample dataset written to {}.", cli.data.display());
        }
    }

    Ok(())
}
