use anyhow::Result;
use clap::{Parser, Subcommand};

mod schedule;

/// Exam scheduler CLI - run and inspect scheduling passes.
#[derive(Parser)]
#[command(name = "exam-scheduler")]
#[command(about = "Exam scheduling engine command line tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scheduling pass and persist the result.
    Schedule {
        /// Restrict the run to a single department.
        #[arg(long)]
        department: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = exam_scheduler_config::AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.log_level))
        .compact()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Schedule { department } => {
            let department_id = department.or(config.department_id);
            schedule::run(&config, department_id).await?;
        }
    }

    Ok(())
}
