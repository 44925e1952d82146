//! Redirect resolution
//!
//! One attempt per call: look the code up, refuse expired links, record the
//! click and hand back the destination. Following the link, after
//! `display_delay`, is the caller's job.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::config::RedirectConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{ClickDetails, LinkStorage};

/// What the caller knows about the incoming navigation.
#[derive(Debug, Clone, Default)]
pub struct RedirectContext {
    /// Referring page; blank or missing counts as a direct visit.
    pub referrer: Option<String>,
    pub user_agent: Option<String>,
}

impl RedirectContext {
    pub fn direct() -> Self {
        Self::default()
    }

    pub fn with_referrer(referrer: impl Into<String>) -> Self {
        Self {
            referrer: Some(referrer.into()),
            ..Default::default()
        }
    }
}

/// A resolved link, ready to be followed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub shortcode: String,
    pub long_url: String,
    pub expires_at: DateTime<Utc>,
    /// Pause before navigating, so the user sees where they are going.
    pub display_delay: Duration,
}

pub struct RedirectService {
    storage: Arc<LinkStorage>,
    display_delay: Duration,
}

impl RedirectService {
    pub fn new(storage: Arc<LinkStorage>, config: &RedirectConfig) -> Self {
        Self {
            storage,
            display_delay: Duration::from_millis(config.display_delay_ms),
        }
    }

    pub fn display_delay(&self) -> Duration {
        self.display_delay
    }

    pub fn resolve(&self, code: &str, context: &RedirectContext) -> Result<RedirectTarget> {
        self.resolve_at(code, context, Utc::now())
    }

    /// Resolve `code` as of `now`.
    ///
    /// Yields exactly one of the target, `NotFound`, `Expired` or `Redirect`
    /// (storage trouble during lookup or click recording). No click is
    /// recorded unless the target is returned.
    pub fn resolve_at(
        &self,
        code: &str,
        context: &RedirectContext,
        now: DateTime<Utc>,
    ) -> Result<RedirectTarget> {
        info!(shortcode = code, "Redirect attempt");

        let record = match self.storage.try_get_url_by_shortcode(code) {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(shortcode = code, "URL not found for shortcode");
                return Err(SnaplinkError::not_found(
                    "URL not found. This short link may have been removed or never existed.",
                ));
            }
            Err(e) => return Err(Self::redirect_failure(code, e)),
        };

        if record.expires_at <= now {
            warn!(
                shortcode = code,
                expires_at = %record.expires_at.to_rfc3339(),
                "Attempted to access expired URL"
            );
            return Err(SnaplinkError::expired(
                "This link has expired and is no longer valid.",
            ));
        }

        let details = ClickDetails {
            user_agent: context.user_agent.clone(),
            timestamp: Some(now),
            ..ClickDetails::from_referrer(context.referrer.as_deref())
        };
        if let Err(e) = self.storage.try_record_click(code, details) {
            return Err(Self::redirect_failure(code, e));
        }

        info!(shortcode = code, long_url = %record.long_url, "Redirect ready");

        Ok(RedirectTarget {
            shortcode: record.shortcode,
            long_url: record.long_url,
            expires_at: record.expires_at,
            display_delay: self.display_delay,
        })
    }

    fn redirect_failure(code: &str, cause: SnaplinkError) -> SnaplinkError {
        error!(shortcode = code, error = %cause, "Redirect error");
        SnaplinkError::redirect(
            "An error occurred while processing the redirect. Please try again.",
        )
    }
}
