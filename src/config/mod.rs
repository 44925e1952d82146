//! Configuration management
//!
//! Priority: ENV (`SNAPLINK__SECTION__KEY`) > TOML file > defaults.

mod structs;

pub use structs::*;

use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Load configuration from `path` (or the default file) once.
///
/// Later calls return the already loaded instance.
pub fn init_config(path: Option<&str>) -> &'static AppConfig {
    CONFIG.get_or_init(|| AppConfig::load(path))
}

/// Get the global configuration, loading defaults on first use.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get_or_init(|| AppConfig::load(None))
}
