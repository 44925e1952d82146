use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A stored short URL. Never updated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlRecord {
    pub id: String,
    pub long_url: String,
    pub shortcode: String,
    #[serde(alias = "validity")]
    pub validity_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    /// Informational only; click counts are derived from click events.
    #[serde(default)]
    pub click_count: u64,
}

impl ShortUrlRecord {
    pub fn new(
        long_url: impl Into<String>,
        shortcode: impl Into<String>,
        validity_minutes: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            long_url: long_url.into(),
            shortcode: shortcode.into(),
            validity_minutes,
            created_at: now,
            expires_at: now + Duration::minutes(validity_minutes as i64),
            click_count: 0,
        }
    }

    /// `expires_at` has not been reached yet.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// One successfully served redirect. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub shortcode: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    #[serde(default)]
    pub user_agent: String,
}

/// Caller-supplied part of a click event; missing values are stamped by storage.
#[derive(Debug, Clone, Default)]
pub struct ClickDetails {
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl ClickDetails {
    pub fn from_referrer(referrer: Option<&str>) -> Self {
        Self {
            source: referrer
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_string),
            ..Default::default()
        }
    }
}
