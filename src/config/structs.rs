use serde::{Deserialize, Serialize};

use crate::errors::{Result, SnaplinkError};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "snaplink.toml";
/// Environment variable prefix.
pub const ENV_PREFIX: &str = "SNAPLINK";

/// 应用配置
///
/// - storage: 键值存储后端
/// - links: 短链接生成
/// - redirect: 跳转与点击记录
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub redirect: RedirectConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > TOML 文件 > 默认值
    /// ENV 前缀：SNAPLINK，分隔符：__
    /// 示例：SNAPLINK__STORAGE__BACKEND=memory
    ///
    /// Falls back to defaults when the sources cannot be read.
    pub fn load(path: Option<&str>) -> Self {
        let path = path.unwrap_or(DEFAULT_CONFIG_FILE);
        match Self::try_load(path) {
            Ok(config) => {
                if std::path::Path::new(path).exists() {
                    eprintln!("[INFO] Configuration loaded from: {}", path);
                }
                config
            }
            Err(e) => {
                eprintln!("[ERROR] {}", e.format_simple());
                Self::default()
            }
        }
    }

    /// Strict variant of [`AppConfig::load`].
    pub fn try_load(path: &str) -> Result<Self> {
        use config::{Config, Environment, File};

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !matches!(self.storage.backend.as_str(), "file" | "memory") {
            return Err(SnaplinkError::config(format!(
                "storage.backend must be 'file' or 'memory', got '{}'",
                self.storage.backend
            )));
        }
        if self.links.max_batch_size == 0 {
            return Err(SnaplinkError::config("links.max_batch_size must be at least 1"));
        }
        if self.logging.buffer_trim == 0 || self.logging.buffer_trim > self.logging.buffer_capacity
        {
            return Err(SnaplinkError::config(
                "logging.buffer_trim must be between 1 and logging.buffer_capacity",
            ));
        }
        Ok(())
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// "file" or "memory"
    #[serde(default = "default_storage_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// Byte cap for the memory backend.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

/// 短链接配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinksConfig {
    /// Prefix for rendered short URLs: `<base_url>/<shortcode>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

/// 跳转配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RedirectConfig {
    /// Pause shown to the user before following the link.
    #[serde(default = "default_display_delay_ms")]
    pub display_delay_ms: u64,
    /// Stamped on click events.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    /// In-memory log store size before trimming.
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    /// Oldest entries dropped when the capacity is exceeded.
    #[serde(default = "default_buffer_trim")]
    pub buffer_trim: usize,
}

// ============================================================
// Default value functions
// ============================================================

fn default_storage_backend() -> String {
    "file".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_max_batch_size() -> usize {
    5
}

fn default_display_delay_ms() -> u64 {
    2000
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_enable_rotation() -> bool {
    true
}

fn default_max_backups() -> u32 {
    5
}

fn default_buffer_capacity() -> usize {
    1000
}

fn default_buffer_trim() -> usize {
    100
}

// ============================================================
// Default implementations
// ============================================================

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_storage_backend(),
            data_dir: default_data_dir(),
            quota_bytes: None,
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_batch_size: default_max_batch_size(),
        }
    }
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            display_delay_ms: default_display_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            enable_rotation: default_enable_rotation(),
            max_backups: default_max_backups(),
            buffer_capacity: default_buffer_capacity(),
            buffer_trim: default_buffer_trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, "file");
        assert_eq!(config.links.max_batch_size, 5);
        assert_eq!(config.redirect.display_delay_ms, 2000);
        assert_eq!(config.logging.buffer_capacity, 1000);
        assert_eq!(config.logging.buffer_trim, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sample_config_round_trips_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("snaplink.toml");

        AppConfig::default().save_to_file(&path).unwrap();
        let loaded = AppConfig::try_load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "[storage]\nbackend = \"memory\"\n\n[redirect]\ndisplay_delay_ms = 0\n",
        )
        .unwrap();

        let loaded = AppConfig::try_load(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.storage.backend, "memory");
        assert_eq!(loaded.storage.data_dir, "data");
        assert_eq!(loaded.redirect.display_delay_ms, 0);
        assert_eq!(loaded.links.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[storage]\nbackend = \"sqlite\"\n").unwrap();

        assert!(matches!(
            AppConfig::try_load(path.to_str().unwrap()),
            Err(SnaplinkError::Config(_))
        ));
    }

    #[test]
    fn test_sample_config_mentions_sections() {
        let sample = AppConfig::generate_sample_config();
        assert!(sample.contains("[storage]"));
        assert!(sample.contains("[logging]"));
    }
}
