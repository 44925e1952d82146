//! Shorten commands

use chrono::Utc;
use colored::Colorize;

use crate::interfaces::cli::{CliContext, CliError};
use crate::services::{CreateLinkRequest, LinkCreateResult};
use crate::utils::format_remaining;

pub fn shorten(
    ctx: &CliContext,
    long_url: String,
    code: Option<String>,
    validity: Option<String>,
) -> Result<(), CliError> {
    let request = CreateLinkRequest {
        long_url,
        shortcode: code.unwrap_or_default(),
        validity: validity.unwrap_or_default(),
    };

    let result = ctx.links.create_short_url(&request)?;
    print_created(&result);
    Ok(())
}

pub fn batch_shorten(ctx: &CliContext, file_path: &str) -> Result<(), CliError> {
    let content = std::fs::read_to_string(file_path)
        .map_err(|e| CliError::ParseError(format!("Failed to read {}: {}", file_path, e)))?;
    let requests: Vec<CreateLinkRequest> = serde_json::from_str(&content)
        .map_err(|e| CliError::ParseError(format!("Invalid batch file {}: {}", file_path, e)))?;

    let results = ctx.links.create_batch(&requests)?;
    for result in &results {
        print_created(result);
    }

    println!();
    println!(
        "{} Successfully shortened {} URL{}!",
        "✓".bold().green(),
        results.len().to_string().green(),
        if results.len() > 1 { "s" } else { "" }
    );
    Ok(())
}

fn print_created(result: &LinkCreateResult) {
    if result.generated_code {
        println!(
            "{} Generated random code: {}",
            "ℹ".bold().blue(),
            result.record.shortcode.magenta()
        );
    }

    println!(
        "{} {} -> {} (expires: {}, in {})",
        "✓".bold().green(),
        result.short_url.cyan(),
        result.record.long_url.blue().underline(),
        result
            .record
            .expires_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .yellow(),
        format_remaining(Utc::now(), result.record.expires_at)
    );
}
