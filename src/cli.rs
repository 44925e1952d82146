//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Snaplink - shorten URLs, follow short codes and inspect click statistics
#[derive(Parser, Debug)]
#[command(name = "snaplink")]
#[command(version)]
#[command(about = "Shorten URLs and track their clicks", long_about = None)]
pub struct Cli {
    /// Configuration file (default: snaplink.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Shorten a single URL
    Shorten {
        /// Long URL; `https://` is assumed when no scheme is given
        long_url: String,

        /// Custom shortcode (3-20 letters, digits, '-' or '_')
        #[arg(long)]
        code: Option<String>,

        /// Validity in minutes (default 30, max 43200)
        #[arg(long)]
        validity: Option<String>,
    },

    /// Shorten several URLs from a JSON file, all or nothing
    ///
    /// The file holds an array of `{"longUrl", "shortcode"?, "validity"?}`.
    Batch {
        /// Input file path
        file_path: String,
    },

    /// Resolve a shortcode and record the click
    Open {
        shortcode: String,

        /// Referring page; omitted means a direct visit
        #[arg(long)]
        referrer: Option<String>,

        /// Wait for the display delay before reporting the redirect
        #[arg(long)]
        wait: bool,
    },

    /// Show link statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List click events of one shortcode
    Clicks { shortcode: String },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: snaplink.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shorten() {
        let cli = Cli::parse_from([
            "snaplink",
            "shorten",
            "example.com",
            "--code",
            "docs",
            "--validity",
            "10",
        ]);
        match cli.command {
            Commands::Shorten {
                long_url,
                code,
                validity,
            } => {
                assert_eq!(long_url, "example.com");
                assert_eq!(code.as_deref(), Some("docs"));
                assert_eq!(validity.as_deref(), Some("10"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::parse_from(["snaplink", "stats", "--json", "-c", "custom.toml"]);
        assert_eq!(cli.config.as_deref(), Some("custom.toml"));
        assert!(matches!(cli.command, Commands::Stats { json: true }));
    }

    #[test]
    fn test_open_defaults() {
        let cli = Cli::parse_from(["snaplink", "open", "abc123"]);
        match cli.command {
            Commands::Open {
                shortcode,
                referrer,
                wait,
            } => {
                assert_eq!(shortcode, "abc123");
                assert!(referrer.is_none());
                assert!(!wait);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
