use anyhow::Result;
use colored::*;
use exam_scheduler_config::AppConfig;
use exam_scheduler_core::{CancellationToken, ExamRepository, Scheduler};
use exam_scheduler_storage::{init_db, SqliteExamRepository};
use std::sync::Arc;

/// Runs one scheduling pass against the configured database and prints a
/// summary of the result.
pub async fn run(config: &AppConfig, department_id: Option<i64>) -> Result<()> {
    println!(
        "{}",
        "Running exam scheduling pass".bright_cyan().bold()
    );
    println!("   {}: {}", "Database".dimmed(), config.database_path.dimmed());
    if let Some(dept) = department_id {
        println!("   {}: {}", "Department".dimmed(), dept);
    }
    println!();

    let pool = init_db(&config.database_path).await?;
    let repository: Arc<dyn ExamRepository> = Arc::new(SqliteExamRepository::new(pool));

    let scheduler = Scheduler::new(repository);
    let cancel = CancellationToken::new();
    let report = scheduler.run(department_id, &cancel).await?;

    println!(
        "{} {} {}",
        "Scheduled".green().bold(),
        report.scheduled.to_string().green().bold(),
        "exams".green()
    );
    println!(
        "{} {} {}",
        "Failed".red().bold(),
        report.failed.to_string().red().bold(),
        "exams"
    );
    println!();

    if !report.failures.is_empty() {
        println!("   {:<10} {:<12} {}", "Request", "Course", "Reason");
        println!("   {}", "-".repeat(60));
        for failure in &report.failures {
            println!(
                "   {:<10} {:<12} {}",
                failure.exam_request_id,
                failure.course_code,
                failure.reason.to_string().yellow()
            );
        }
        println!();
    }

    if report.cancelled {
        println!("{}", "Run was cancelled before completion.".yellow().bold());
    }

    Ok(())
}
