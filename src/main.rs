use clap::Parser;

use snaplink::cli::Cli;
use snaplink::config::init_config;
use snaplink::interfaces::cli::run_cli_command;
use snaplink::system::init_logging;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    // 必须持有 guard，否则日志不会刷盘
    let guard = init_logging(&config.logging)?;
    let result = run_cli_command(cli.command, config);
    drop(guard);

    if let Err(e) = result {
        eprintln!("{}", e.format_simple());
        std::process::exit(1);
    }

    Ok(())
}
