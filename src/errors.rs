use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnaplinkError {
    InvalidUrl(String),
    InvalidShortcode(String),
    InvalidValidity(String),
    DuplicateShortcode(String),
    NotFound(String),
    Expired(String),
    Storage(String),
    Redirect(String),
    Serialization(String),
    Config(String),
}

impl SnaplinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "E001",
            SnaplinkError::InvalidShortcode(_) => "E002",
            SnaplinkError::InvalidValidity(_) => "E003",
            SnaplinkError::DuplicateShortcode(_) => "E004",
            SnaplinkError::NotFound(_) => "E005",
            SnaplinkError::Expired(_) => "E006",
            SnaplinkError::Storage(_) => "E007",
            SnaplinkError::Redirect(_) => "E008",
            SnaplinkError::Serialization(_) => "E009",
            SnaplinkError::Config(_) => "E010",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            SnaplinkError::InvalidUrl(_) => "Invalid URL",
            SnaplinkError::InvalidShortcode(_) => "Invalid Shortcode",
            SnaplinkError::InvalidValidity(_) => "Invalid Validity",
            SnaplinkError::DuplicateShortcode(_) => "Duplicate Shortcode",
            SnaplinkError::NotFound(_) => "Link Not Found",
            SnaplinkError::Expired(_) => "Link Expired",
            SnaplinkError::Storage(_) => "Storage Error",
            SnaplinkError::Redirect(_) => "Redirect Error",
            SnaplinkError::Serialization(_) => "Serialization Error",
            SnaplinkError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            SnaplinkError::InvalidUrl(msg)
            | SnaplinkError::InvalidShortcode(msg)
            | SnaplinkError::InvalidValidity(msg)
            | SnaplinkError::DuplicateShortcode(msg)
            | SnaplinkError::NotFound(msg)
            | SnaplinkError::Expired(msg)
            | SnaplinkError::Storage(msg)
            | SnaplinkError::Redirect(msg)
            | SnaplinkError::Serialization(msg)
            | SnaplinkError::Config(msg) => msg,
        }
    }

    /// Whether the error belongs to a single form field and can be shown inline.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SnaplinkError::InvalidUrl(_)
                | SnaplinkError::InvalidShortcode(_)
                | SnaplinkError::InvalidValidity(_)
        )
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SnaplinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SnaplinkError {}

// 便捷的构造函数
impl SnaplinkError {
    pub fn invalid_url<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidUrl(msg.into())
    }

    pub fn invalid_shortcode<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidShortcode(msg.into())
    }

    pub fn invalid_validity<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::InvalidValidity(msg.into())
    }

    pub fn duplicate_shortcode<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::DuplicateShortcode(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Expired(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Storage(msg.into())
    }

    pub fn redirect<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Redirect(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Serialization(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        SnaplinkError::Config(msg.into())
    }
}

impl From<std::io::Error> for SnaplinkError {
    fn from(err: std::io::Error) -> Self {
        SnaplinkError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SnaplinkError {
    fn from(err: serde_json::Error) -> Self {
        SnaplinkError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for SnaplinkError {
    fn from(err: config::ConfigError) -> Self {
        SnaplinkError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SnaplinkError>;
