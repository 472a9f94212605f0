use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use task_tracker::config::TrackerConfig;
use task_tracker::detect::CompletionMatcher;
use task_tracker::store::JsonFileStore;
use task_tracker::tasks::model::parse_scheduled_time;
use task_tracker::tracker::{CompleteOutcome, Tracker};

/// Sample messages exercised by `test-patterns`.
const PATTERN_SAMPLES: &[&str] = &[
    "listo",
    "ya está hecho",
    "completado",
    "terminé la tarea",
    "task completed",
    "no tiene nada que ver",
    "Hola como estas",
    "done with the task",
    "hecho!",
    "LISTO",
];

#[derive(Parser)]
#[command(name = "task-tracker")]
#[command(about = "Tracks reminder tasks and detects completion phrases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start tracking a reminder task
    MarkPending {
        job_id: String,
        task_name: String,
        /// Scheduled time (RFC 3339 or YYYY-MM-DDTHH:MM:SS)
        scheduled_time: String,
    },
    /// Mark a pending task as completed
    MarkCompleted { job_id: String },
    /// Check a chat message for completion phrases
    CheckMessage {
        message_text: String,
        /// Candidate job ids; omit to use recorded recent activity
        recent_job_ids: Vec<String>,
    },
    /// Print the daily pending-task summary
    DailySummary,
    /// List all pending tasks
    ListPending,
    /// Record a job execution for completion correlation
    AddJob { job_id: String },
    /// List recently executed job ids
    RecentJobs,
    /// Run the completion matcher against built-in sample messages
    TestPatterns,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = TrackerConfig::from_env();
    let store = Arc::new(JsonFileStore::new(&config.data_dir).await?);
    let tracker = Tracker::new(store, config);

    match cli.command {
        Commands::MarkPending {
            job_id,
            task_name,
            scheduled_time,
        } => {
            let scheduled = parse_scheduled_time(&scheduled_time)?;
            let message = tracker.mark_pending(&job_id, &task_name, scheduled).await?;
            println!("{}", message);
        }
        Commands::MarkCompleted { job_id } => {
            let outcome = tracker.mark_completed(&job_id).await?;
            println!("{}", outcome.render());
            if outcome == CompleteOutcome::NotFound {
                std::process::exit(1);
            }
        }
        Commands::CheckMessage {
            message_text,
            recent_job_ids,
        } => {
            let explicit = if recent_job_ids.is_empty() {
                None
            } else {
                Some(recent_job_ids.as_slice())
            };
            let outcome = tracker.check_message(&message_text, explicit).await?;
            for line in outcome.render_lines() {
                println!("{}", line);
            }
        }
        Commands::DailySummary => {
            println!("{}", tracker.daily_summary().await?);
        }
        Commands::ListPending => {
            let pending = tracker.list_pending().await?;
            if pending.is_empty() {
                println!("✅ No pending tasks");
            } else {
                println!("📋 Pending Tasks:");
                for (job_id, record) in &pending {
                    println!("  {}: {}", job_id, record.task_name);
                }
            }
        }
        Commands::AddJob { job_id } => {
            println!("{}", tracker.register_job(&job_id).await?);
        }
        Commands::RecentJobs => {
            let recent = tracker.recent_jobs().await?;
            if recent.is_empty() {
                println!("No recent jobs");
            } else {
                println!("Recent job IDs:");
                for job_id in &recent {
                    println!("  {}", job_id);
                }
            }
        }
        Commands::TestPatterns => run_test_patterns(),
    }

    Ok(())
}

fn run_test_patterns() {
    let matcher = CompletionMatcher::new();
    println!("🧪 Testing completion patterns...");
    for msg in PATTERN_SAMPLES {
        let status = if matcher.matches(msg) {
            "✅ MATCH"
        } else {
            "❌ NO MATCH"
        };
        println!("{}: '{}'", status, msg);
    }
}
