//! Statistics commands

use colored::Colorize;

use crate::interfaces::cli::{CliContext, CliError};
use crate::services::LinkStatus;

const USER_AGENT_PREVIEW: usize = 50;

pub fn show_stats(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let report = ctx.analytics.report();

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::CommandError(format!("Failed to render report: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    let summary = report.summary;
    println!("{}", "Statistics:".bold().green());
    println!("  Total URLs:   {}", summary.total_urls.to_string().cyan());
    println!("  Total clicks: {}", summary.total_clicks.to_string().cyan());
    println!("  Active:       {}", summary.active_urls.to_string().green());
    println!("  Expired:      {}", summary.expired_urls.to_string().red());

    if report.links.is_empty() {
        println!();
        println!("{} No short links found", "ℹ".bold().blue());
        return Ok(());
    }

    println!();
    for link in &report.links {
        let status = match link.status {
            LinkStatus::Active => link.status.to_string().green(),
            LinkStatus::Expired => link.status.to_string().red(),
        };
        println!(
            "  {} -> {} [{}] {}",
            link.record.shortcode.cyan(),
            link.record.long_url.blue().underline(),
            status,
            format!("(clicks: {})", link.click_count()).dimmed()
        );
    }
    Ok(())
}

pub fn list_clicks(ctx: &CliContext, shortcode: &str) -> Result<(), CliError> {
    let clicks = ctx.storage.get_clicks_for_url(shortcode);

    if clicks.is_empty() {
        println!("{} No clicks recorded for {}", "ℹ".bold().blue(), shortcode.cyan());
        return Ok(());
    }

    println!("{} {}", "Clicks for".bold().green(), shortcode.cyan());
    for click in &clicks {
        println!(
            "  {}  source: {}  browser: {}",
            click.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string().yellow(),
            click.source,
            preview(&click.user_agent).dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} clicks",
        "ℹ".bold().blue(),
        clicks.len().to_string().green()
    );
    Ok(())
}

fn preview(user_agent: &str) -> String {
    if user_agent.is_empty() {
        return "Unknown".to_string();
    }
    if user_agent.chars().count() <= USER_AGENT_PREVIEW {
        return user_agent.to_string();
    }
    let head: String = user_agent.chars().take(USER_AGENT_PREVIEW).collect();
    format!("{}...", head)
}
