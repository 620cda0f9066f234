//! CLI administration tool for hit-stats.
//!
//! Reads the hit log directly from PostgreSQL, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Top URIs over the last 7 days
//! cargo run --bin admin -- stats
//!
//! # Unique visitors for two events in a fixed window
//! cargo run --bin admin -- stats --start "2024-01-01 00:00:00" --end "2024-02-01 00:00:00" \
//!     --uris /events/1,/events/2 --unique
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Hit count and time span of the log
//! cargo run --bin admin -- db info
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use hit_stats::domain::repositories::HitRepository;
use hit_stats::infrastructure::persistence::PgHitRepository;
use hit_stats::prelude::HitService;
use hit_stats::utils::timestamp;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting hit-stats data.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show grouped hit counts for a window
    Stats {
        /// Window start, "yyyy-MM-dd HH:mm:ss" (default: 7 days ago)
        #[arg(long, value_parser = parse_timestamp)]
        start: Option<NaiveDateTime>,

        /// Window end, "yyyy-MM-dd HH:mm:ss" (default: now)
        #[arg(long, value_parser = parse_timestamp)]
        end: Option<NaiveDateTime>,

        /// Comma-separated URIs to restrict to
        #[arg(long, value_delimiter = ',')]
        uris: Vec<String>,

        /// Count distinct IPs instead of hits
        #[arg(short, long)]
        unique: bool,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show hit log info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats {
            start,
            end,
            uris,
            unique,
            limit,
        } => handle_stats(&pool, start, end, uris, unique, limit).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    timestamp::parse(value).map_err(|e| format!("expected yyyy-MM-dd HH:mm:ss: {e}"))
}

/// Prints grouped hit counts, most hits first.
///
/// # Output Format
///
/// ```text
/// 📊 Hits 2024-01-01 00:00:00 .. 2024-01-08 00:00:00 (unique IPs)
///
///   Hits     App                  URI
///   ──────────────────────────────────────────────────────────────
///   12       ewm-main-service     /events/1
///   3        ewm-main-service     /events
/// ```
async fn handle_stats(
    pool: &PgPool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    uris: Vec<String>,
    unique: bool,
    limit: usize,
) -> Result<()> {
    let end = end.unwrap_or_else(timestamp::now);
    let start = start.unwrap_or(end - Duration::days(7));

    let repo = Arc::new(PgHitRepository::new(Arc::new(pool.clone())));
    let service = HitService::new(repo);

    let entries = service
        .get_stats(start, end, Some(uris), unique)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to query stats: {}", e))?;

    let mode = if unique { "unique IPs" } else { "all hits" };
    println!(
        "{} {} .. {} ({})",
        "📊 Hits".bright_blue().bold(),
        timestamp::format(&start),
        timestamp::format(&end),
        mode
    );
    println!();

    if entries.is_empty() {
        println!("{}", "  No hits in this window".yellow());
        return Ok(());
    }

    println!(
        "  {:<8} {:<20} {}",
        "Hits".bright_white().bold(),
        "App".bright_white().bold(),
        "URI".bright_white().bold()
    );
    println!("  {}", "─".repeat(62).bright_black());

    for entry in entries.iter().take(limit) {
        println!(
            "  {:<8} {:<20} {}",
            entry.hits.to_string().bright_green().bold(),
            entry.app.cyan(),
            entry.uri
        );
    }

    if entries.len() > limit {
        println!();
        println!(
            "  {} more entries not shown",
            (entries.len() - limit).to_string().bright_black()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgHitRepository::new(Arc::new(pool.clone()));
            if !repo.health_check().await {
                anyhow::bail!("Database did not answer");
            }

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Hit Log Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let repo = PgHitRepository::new(Arc::new(pool.clone()));
            let total = repo
                .count_all()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to count hits: {}", e))?;
            let range = repo
                .time_range()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read hit range: {}", e))?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Hits:       {}", total.to_string().bright_green().bold());
            match range {
                Some((first, last)) => {
                    println!("  First hit:  {}", timestamp::format(&first));
                    println!("  Last hit:   {}", timestamp::format(&last));
                }
                None => println!("  {}", "Log is empty".yellow()),
            }
            println!();
        }
    }

    Ok(())
}
