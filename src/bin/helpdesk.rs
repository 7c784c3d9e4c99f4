//! helpdesk CLI: queue and SLA reports over helpdesk records.

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use helpdesk_rs::config::Config;
use helpdesk_rs::config::secrets::ExposeSecret;
use helpdesk_rs::db::Db;
use helpdesk_rs::filter::{self, FilterParams, RecordFilter};
use helpdesk_rs::labels::{resolve_priority, resolve_status};
use helpdesk_rs::model::timestamp::parse_timestamp;
use helpdesk_rs::model::{Snapshot, TrackedRecord, UnifiedRequest};
use helpdesk_rs::sla::{classify_at, hours_until_due};
use helpdesk_rs::stats::{self, DashboardSummary, ReportMetrics};
use helpdesk_rs::telemetry::report::{record_report_result, record_sla_counts, start_report_span};
use helpdesk_rs::telemetry::{TelemetryConfig, init_telemetry};
use helpdesk_rs::views::ViewRegistry;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "helpdesk", about = "Queue and SLA reports over helpdesk records")]
struct Cli {
    /// Read records from a JSON snapshot instead of the database
    #[arg(long, global = true)]
    input: Option<PathBuf>,
    /// Evaluate SLAs at this instant (RFC 3339) instead of the current time
    #[arg(long, global = true)]
    now: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List tickets and service requests
    Requests {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum rows to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// List problems
    Problems {
        #[command(flatten)]
        filter: FilterArgs,
        /// Maximum rows to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Dashboard tiles, report metrics and breakdowns
    Stats,
    /// List saved views
    Views,
}

#[derive(Args)]
struct FilterArgs {
    /// Apply a saved view; explicit flags override its fields
    #[arg(long)]
    view: Option<String>,
    /// Lifecycle status code (e.g. open, in_progress)
    #[arg(long)]
    status: Option<String>,
    /// Priority code (urgent, high, medium, low)
    #[arg(long)]
    priority: Option<String>,
    /// Request type (ticket, service_request)
    #[arg(long = "type")]
    request_type: Option<String>,
    /// Assignee user id, or "unassigned"
    #[arg(long)]
    assignee: Option<String>,
    /// SLA state (breached, at_risk, on_track)
    #[arg(long)]
    sla: Option<String>,
    /// Case-insensitive text search over title, description and number
    #[arg(long)]
    search: Option<String>,
    /// Created at or after this instant
    #[arg(long)]
    from: Option<String>,
    /// Created before this instant
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    fn params(&self) -> FilterParams {
        FilterParams {
            status: self.status.clone(),
            priority: self.priority.clone(),
            request_type: self.request_type.clone(),
            assignee: self.assignee.clone(),
            sla: self.sla.clone(),
            search: self.search.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
        }
    }

    /// Resolve the saved view (if any) and overlay the explicit flags.
    fn resolve(&self, config: &Config) -> anyhow::Result<RecordFilter> {
        let params = match self.view {
            Some(ref name) => {
                let registry = ViewRegistry::load_from_dir(&config.views_dir)?;
                let view = registry
                    .get(name)
                    .ok_or_else(|| anyhow::anyhow!("no saved view named '{name}'"))?;
                view.params.clone().merged_with(self.params())
            }
            None => self.params(),
        };
        Ok(RecordFilter::from_params(&params)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "helpdesk".to_string(),
        log_level: config.log_level.clone(),
    })?;

    let now = match cli.now {
        Some(ref s) => parse_timestamp(s).ok_or_else(|| anyhow::anyhow!("invalid --now: {s}"))?,
        None => Utc::now(),
    };

    match cli.command {
        Command::Views => cmd_views(&config),
        Command::Requests { filter, limit } => {
            let filter = filter.resolve(&config)?;
            let snapshot = load_snapshot(&config, cli.input.as_deref()).await?;
            cmd_requests(&snapshot, &filter, limit, now)
        }
        Command::Problems { filter, limit } => {
            let filter = filter.resolve(&config)?;
            let snapshot = load_snapshot(&config, cli.input.as_deref()).await?;
            cmd_problems(&snapshot, &filter, limit, now)
        }
        Command::Stats => {
            let snapshot = load_snapshot(&config, cli.input.as_deref()).await?;
            cmd_stats(&snapshot, now)
        }
    }
}

async fn load_snapshot(config: &Config, input: Option<&Path>) -> anyhow::Result<Snapshot> {
    match input {
        Some(path) => Snapshot::load(path)
            .with_context(|| format!("failed to load snapshot {}", path.display())),
        None => {
            let db = Db::connect(config.database_url()?.expose_secret()).await?;
            Ok(db.fetch_snapshot().await?)
        }
    }
}

fn cmd_views(config: &Config) -> anyhow::Result<()> {
    let registry = ViewRegistry::load_from_dir(&config.views_dir)?;
    if registry.is_empty() {
        println!("No saved views in {}.", config.views_dir.display());
        return Ok(());
    }
    for view in registry.iter() {
        println!(
            "{:<24}  {}",
            view.name,
            view.description.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

fn cmd_requests(
    snapshot: &Snapshot,
    filter: &RecordFilter,
    limit: usize,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let requests = snapshot.requests();
    let span = start_report_span("requests", requests.len());
    let _enter = span.enter();

    let matched = filter::apply(&requests, filter, now);
    record_report_result(&span, requests.len(), matched.len());
    info!(total = requests.len(), matched = matched.len(), "requests filtered");

    print_table(&matched, limit, now);
    Ok(())
}

fn cmd_problems(
    snapshot: &Snapshot,
    filter: &RecordFilter,
    limit: usize,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let span = start_report_span("problems", snapshot.problems.len());
    let _enter = span.enter();

    let matched = filter::apply(&snapshot.problems, filter, now);
    record_report_result(&span, snapshot.problems.len(), matched.len());
    info!(total = snapshot.problems.len(), matched = matched.len(), "problems filtered");

    print_table(&matched, limit, now);
    Ok(())
}

fn print_table<R: TrackedRecord>(records: &[&R], limit: usize, now: DateTime<Utc>) {
    if records.is_empty() {
        println!("No matching records.");
        return;
    }

    println!(
        "{:<12}  {:<15}  {:<13}  {:<8}  {:<9}  {:>7}  {:<8}  {:<16}  TITLE",
        "NUMBER", "TYPE", "STATUS", "PRIORITY", "SLA", "DUE", "ASSIGNEE", "CREATED"
    );
    println!("{}", "-".repeat(119));

    for record in records.iter().take(limit) {
        let kind = record.request_type().map(|t| t.as_str()).unwrap_or("problem");
        let assignee = record
            .assigned_to()
            .map(|id| id.to_string()[..8].to_string())
            .unwrap_or_else(|| "-".to_string());
        // Signed hours to the due date; negative once overdue.
        let due = hours_until_due(*record, now)
            .map(|h| format!("{h:+.1}h"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12}  {:<15}  {:<13}  {:<8}  {:<9}  {:>7}  {:<8}  {:<16}  {}",
            truncate(record.number(), 12),
            kind,
            resolve_status(record.status().as_str()).label,
            resolve_priority(record.priority().as_str()).label,
            classify_at(*record, now).label,
            due,
            assignee,
            record.created_at().format("%Y-%m-%d %H:%M"),
            truncate(record.title(), 40),
        );
    }

    if records.len() > limit {
        println!("\n{} of {} record(s) shown", limit, records.len());
    } else {
        println!("\n{} record(s)", records.len());
    }
}

fn cmd_stats(snapshot: &Snapshot, now: DateTime<Utc>) -> anyhow::Result<()> {
    let requests = snapshot.requests();
    let span = start_report_span("stats", requests.len());
    let _enter = span.enter();

    let summary = DashboardSummary::compute(&requests, now);
    let metrics = ReportMetrics::compute(&requests, now);
    record_sla_counts(&stats::aggregate(
        &requests,
        stats::by_sla_status::<UnifiedRequest>(now),
    ));

    println!("Requests");
    println!("  Total:         {}", summary.total);
    println!("  Open:          {}", summary.open);
    println!("  Unassigned:    {}", summary.unassigned);
    println!("  At risk:       {}", summary.at_risk);
    println!("  Breached:      {}", summary.breached);
    println!();
    println!("  Resolution rate:      {}%", metrics.resolution_rate);
    println!("  SLA compliance:       {}%", metrics.sla_compliance);
    println!("  Mean resolution:      {:.1}h", metrics.mean_resolution_hours);
    println!("  Mean first response:  {:.1}h", metrics.mean_first_response_hours);

    println!("\nBy status");
    for (status, n) in &summary.by_status {
        println!("  {:<16} {n}", resolve_status(status.as_str()).label);
    }
    println!("\nBy priority");
    for (priority, n) in &summary.by_priority {
        println!("  {:<16} {n}", resolve_priority(priority.as_str()).label);
    }
    println!("\nBy type");
    for (kind, n) in stats::aggregate(&requests, stats::by_request_type) {
        let kind = kind.map(|k| k.as_str()).unwrap_or("-");
        println!("  {kind:<16} {n}");
    }
    println!("\nCreated per day");
    for (day, n) in stats::aggregate(&requests, stats::by_created_day) {
        println!("  {day}       {n}");
    }

    let problems = DashboardSummary::compute(&snapshot.problems, now);
    println!("\nProblems");
    println!("  Total:         {}", problems.total);
    println!("  Open:          {}", problems.open);
    println!("  Breached:      {}", problems.breached);

    println!("\nDevices by type");
    for (device_type, n) in stats::aggregate(&snapshot.devices, stats::by_device_type) {
        println!("  {device_type:<16} {n}");
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    } else {
        s.to_string()
    }
}
