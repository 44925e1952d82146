//! Open (resolve) command

use colored::Colorize;
use tracing::info;

use crate::interfaces::cli::{CliContext, CliError};
use crate::services::RedirectContext;

pub fn open_link(
    ctx: &CliContext,
    shortcode: &str,
    referrer: Option<String>,
    wait: bool,
) -> Result<(), CliError> {
    let context = RedirectContext {
        referrer,
        ..Default::default()
    };

    let target = ctx.redirect.resolve(shortcode, &context)?;

    println!("{} Taking you to: {}", "→".bold().green(), target.long_url.blue().underline());

    if wait {
        std::thread::sleep(target.display_delay);
        info!(shortcode, long_url = %target.long_url, "Redirect executed");
    } else {
        println!(
            "  {}",
            format!(
                "(a browser would follow after {} ms)",
                target.display_delay.as_millis()
            )
            .dimmed()
        );
    }
    Ok(())
}
