use anyhow::{Context, Result, anyhow, bail};
use serde::Serialize;
use support_console::controller::{self as pages, EmptyState, PageState};
use support_console::models::StatusFilter;
use support_console::service::AiLogDetail;
use support_console::table::{RenderedTable, SortableTable, TableRow, format};
use support_console::{Console, EntityService};

use super::{Cli, Command};

pub async fn run(cli: Cli, console: &Console) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Command::Users { search, status } => list_users(console, search, status, json).await,
        Command::Apps => list_apps(console, json).await,
        Command::Dashboard { sort } => show_dashboard(console, &sort, json).await,
        Command::Logs { sort } => list_logs(console, &sort, json).await,
        Command::Log { id } => show_log(console, &id, json).await,
    }
}

async fn list_users(
    console: &Console,
    search: Option<String>,
    status: StatusFilter,
    json: bool,
) -> Result<()> {
    let page = console.users_page();
    page.set_status_filter(status).await;
    if let Some(term) = search {
        page.set_search_term(term).await;
    }
    let users = ready(page.state().await)?;

    if json {
        return print_json(&users);
    }
    if users.is_empty() {
        print_empty(pages::users::EMPTY);
        return Ok(());
    }

    let buttons: Vec<String> = page
        .status_buttons()
        .await
        .into_iter()
        .map(|b| {
            let label = match b.count {
                Some(n) => format!("{} ({n})", b.filter),
                None => b.filter.to_string(),
            };
            if b.selected { format!("[{label}]") } else { label }
        })
        .collect();
    println!("{}\n", buttons.join("  "));

    let table = support_console::UsersPage::table()?;
    print!("{}", table.render(&users).to_text());
    if let Some(summary) = page.summary().await {
        println!("\n{} users", summary.total);
    }
    Ok(())
}

async fn list_apps(console: &Console, json: bool) -> Result<()> {
    let page = console.apps_page();
    page.load().await;
    let apps = ready(page.state().await)?;

    if json {
        return print_json(&apps);
    }
    if apps.is_empty() {
        print_empty(pages::apps::EMPTY);
        return Ok(());
    }

    let table = support_console::AppsPage::table()?;
    print!("{}", table.render(&apps).to_text());
    if let Some(summary) = page.summary().await {
        println!(
            "\n{} apps, {} users",
            summary.app_count,
            grouped(summary.total_users)
        );
    }
    Ok(())
}

async fn show_dashboard(console: &Console, sort: &[String], json: bool) -> Result<()> {
    let page = console.dashboard_page();
    page.load().await;
    let apps = ready(page.state().await)?;

    if json {
        return print_json(&apps);
    }
    if let Some(summary) = page.summary().await {
        println!(
            "Total apps: {}   Total users: {}   Active apps: {}\n",
            summary.total_apps,
            grouped(summary.total_users),
            summary.active_apps
        );
    }
    if apps.is_empty() {
        print_empty(pages::dashboard::EMPTY);
        return Ok(());
    }

    let mut table = support_console::DashboardPage::table()?;
    print!("{}", sorted(&mut table, sort, &apps)?.to_text());
    Ok(())
}

async fn list_logs(console: &Console, sort: &[String], json: bool) -> Result<()> {
    let page = console.ai_logs_page();
    page.load().await;
    let logs = ready(page.state().await)?;

    if json {
        return print_json(&logs);
    }
    if let Some(tally) = page.tally().await {
        println!(
            "Errors: {}   Warnings: {}   Info: {}\n",
            tally.errors, tally.warnings, tally.info
        );
    }
    if logs.is_empty() {
        print_empty(pages::ai_logs::EMPTY);
        return Ok(());
    }

    let (mut table, _clicks) = support_console::AiLogsPage::table()?;
    print!("{}", sorted(&mut table, sort, &logs)?.to_text());
    Ok(())
}

async fn show_log(console: &Console, raw_id: &str, json: bool) -> Result<()> {
    let detail = console
        .ai_logs()
        .get_by_raw_id(raw_id)
        .await
        .with_context(|| format!("failed to load log '{raw_id}'"))?;

    if json {
        return print_json(&detail);
    }
    print_detail(&detail);
    Ok(())
}

fn ready<T>(state: PageState<T>) -> Result<T> {
    match state {
        PageState::Ready(data) => Ok(data),
        PageState::Failed(message) => Err(anyhow!(message)),
        PageState::Loading => bail!("page did not finish loading"),
    }
}

/// Replay header clicks in order, then render.
fn sorted<R: TableRow>(
    table: &mut SortableTable<R>,
    clicks: &[String],
    rows: &[R],
) -> Result<RenderedTable> {
    for key in clicks {
        table.click_header(key)?;
    }
    Ok(table.render(rows))
}

fn grouped(n: u64) -> String {
    format::group_digits(i64::try_from(n).unwrap_or(i64::MAX))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("failed to encode JSON")?;
    println!("{body}");
    Ok(())
}

fn print_empty(empty: EmptyState) {
    println!("{}", empty.title);
    println!("{}", empty.description);
}

fn print_detail(detail: &AiLogDetail) {
    let log = &detail.log;
    let meta = &detail.metadata;
    let info = &detail.contextual_info;

    println!("Log #{}  [{}]  {}", log.id, log.log_level, log.event_type);
    println!("{}\n", log.message);
    println!("Timestamp:     {}", log.timestamp.format("%b %d, %Y %H:%M:%S"));
    println!("User:          {}", log.user);
    println!("App:           {}", log.app);
    println!("Request ID:    {}", meta.request_id);
    println!("Session ID:    {}", meta.session_id);
    println!("IP address:    {}", meta.ip_address);
    println!("User agent:    {}", meta.user_agent);
    println!("Duration:      {} ms", info.duration_ms);
    println!("Response time: {} ms", info.response_time_ms);
    println!("Bytes:         {}", grouped(info.bytes_processed));
    println!("API version:   {}", info.api_version);

    if let Some(trace) = &detail.stack_trace {
        println!("\nStack trace:");
        for line in trace {
            println!("{line}");
        }
    }

    if !detail.related_events.is_empty() {
        println!("\nRelated events:");
        for event in &detail.related_events {
            println!(
                "  #{} {} [{}] {}: {}",
                event.id,
                event.timestamp.format("%H:%M:%S"),
                event.log_level,
                event.event_type,
                event.message
            );
        }
    }
}
