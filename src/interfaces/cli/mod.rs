//! CLI interface module
//!
//! Drives the core services the way the web form, redirect page and
//! statistics page would.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::AppConfig;
use crate::errors::SnaplinkError;
use crate::services::{AnalyticsService, BatchCreateError, LinkService, RedirectService};
use crate::storage::{LinkStorage, StorageFactory};
use commands::{batch_shorten, config_generate, list_clicks, open_link, shorten, show_stats};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<SnaplinkError> for CliError {
    fn from(err: SnaplinkError) -> Self {
        match err {
            SnaplinkError::Storage(_) | SnaplinkError::Serialization(_) => {
                CliError::StorageError(err.message().to_string())
            }
            other => CliError::CommandError(other.format_simple()),
        }
    }
}

impl From<BatchCreateError> for CliError {
    fn from(err: BatchCreateError) -> Self {
        match err {
            BatchCreateError::Rejected(e) => e.into(),
            other => CliError::CommandError(other.to_string()),
        }
    }
}

/// Services wired over one storage backend.
pub struct CliContext {
    pub storage: Arc<LinkStorage>,
    pub links: LinkService,
    pub redirect: RedirectService,
    pub analytics: AnalyticsService,
}

impl CliContext {
    pub fn from_config(config: &AppConfig) -> Result<Self, CliError> {
        let store = StorageFactory::create(&config.storage)
            .map_err(|e| CliError::StorageError(e.message().to_string()))?;
        let storage = Arc::new(LinkStorage::new(store, config.redirect.user_agent.clone()));

        Ok(Self {
            links: LinkService::new(storage.clone(), &config.links),
            redirect: RedirectService::new(storage.clone(), &config.redirect),
            analytics: AnalyticsService::new(storage.clone()),
            storage,
        })
    }
}

/// Run a CLI command from clap-parsed input
///
/// Storage is only opened by commands that touch links.
pub fn run_cli_command(cmd: Commands, config: &AppConfig) -> Result<(), CliError> {
    let context = || CliContext::from_config(config);

    match cmd {
        Commands::Shorten {
            long_url,
            code,
            validity,
        } => shorten(&context()?, long_url, code, validity),
        Commands::Batch { file_path } => batch_shorten(&context()?, &file_path),
        Commands::Open {
            shortcode,
            referrer,
            wait,
        } => open_link(&context()?, &shortcode, referrer, wait),
        Commands::Stats { json } => show_stats(&context()?, json),
        Commands::Clicks { shortcode } => list_clicks(&context()?, &shortcode),
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force),
    }
}
