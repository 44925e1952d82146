//! URL and click collections on top of a [`KeyValueStore`].
//!
//! Both collections are stored as whole JSON arrays. Every write reads the
//! current array, appends, and rewrites it; there is no incremental update
//! and no cross-process locking, so concurrent writers are last-write-wins.
//!
//! Each operation comes in two forms: `try_*` returns the error, while the
//! plain form logs it and degrades to an empty result, `None` or `false`.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use super::KeyValueStore;
use super::models::{ClickDetails, ClickEvent, ShortUrlRecord};
use crate::errors::{Result, SnaplinkError};

pub const URLS_KEY: &str = "shortened_urls";
pub const CLICKS_KEY: &str = "url_clicks";

const DIRECT_SOURCE: &str = "direct";

pub struct LinkStorage {
    store: Arc<dyn KeyValueStore>,
    user_agent: String,
}

impl LinkStorage {
    pub fn new(store: Arc<dyn KeyValueStore>, user_agent: impl Into<String>) -> Self {
        Self {
            store,
            user_agent: user_agent.into(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                SnaplinkError::storage(format!("unreadable collection '{}': {}", key, e))
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items).map_err(|e| {
            SnaplinkError::storage(format!("failed to encode collection '{}': {}", key, e))
        })?;
        self.store.set_item(key, &json)
    }

    // ---------------------------------------------------------------------
    // URLs
    // ---------------------------------------------------------------------

    pub fn try_save_url(&self, record: &ShortUrlRecord) -> Result<()> {
        self.try_save_urls(std::slice::from_ref(record))
    }

    /// Append several records with a single rewrite of the collection.
    pub fn try_save_urls(&self, records: &[ShortUrlRecord]) -> Result<()> {
        let mut urls: Vec<ShortUrlRecord> = self.read_collection(URLS_KEY)?;
        urls.extend_from_slice(records);
        self.write_collection(URLS_KEY, &urls)?;
        for record in records {
            info!(shortcode = %record.shortcode, "URL saved to storage");
        }
        Ok(())
    }

    pub fn save_url(&self, record: &ShortUrlRecord) -> bool {
        match self.try_save_url(record) {
            Ok(()) => true,
            Err(e) => {
                error!(shortcode = %record.shortcode, error = %e, "Failed to save URL to storage");
                false
            }
        }
    }

    pub fn try_get_urls(&self) -> Result<Vec<ShortUrlRecord>> {
        self.read_collection(URLS_KEY)
    }

    pub fn get_urls(&self) -> Vec<ShortUrlRecord> {
        self.try_get_urls().unwrap_or_else(|e| {
            error!(error = %e, "Failed to retrieve URLs from storage");
            Vec::new()
        })
    }

    pub fn try_get_url_by_shortcode(&self, code: &str) -> Result<Option<ShortUrlRecord>> {
        let found = self
            .try_get_urls()?
            .into_iter()
            .find(|url| url.shortcode == code);
        debug!(shortcode = code, found = found.is_some(), "URL lookup by shortcode");
        Ok(found)
    }

    pub fn get_url_by_shortcode(&self, code: &str) -> Option<ShortUrlRecord> {
        self.try_get_url_by_shortcode(code).unwrap_or_else(|e| {
            error!(shortcode = code, error = %e, "Failed to look up URL by shortcode");
            None
        })
    }

    // ---------------------------------------------------------------------
    // Clicks
    // ---------------------------------------------------------------------

    /// Build a full click event from `details`, append it and persist.
    pub fn try_record_click(&self, code: &str, details: ClickDetails) -> Result<ClickEvent> {
        let event = ClickEvent {
            shortcode: code.to_string(),
            timestamp: details.timestamp.unwrap_or_else(Utc::now),
            source: details
                .source
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DIRECT_SOURCE.to_string()),
            user_agent: details.user_agent.unwrap_or_else(|| self.user_agent.clone()),
        };

        let mut clicks: Vec<ClickEvent> = self.read_collection(CLICKS_KEY)?;
        clicks.push(event.clone());
        self.write_collection(CLICKS_KEY, &clicks)?;

        info!(shortcode = code, source = %event.source, "Click recorded");
        Ok(event)
    }

    pub fn record_click(&self, code: &str, details: ClickDetails) -> bool {
        match self.try_record_click(code, details) {
            Ok(_) => true,
            Err(e) => {
                error!(shortcode = code, error = %e, "Failed to record click");
                false
            }
        }
    }

    pub fn try_get_clicks(&self) -> Result<Vec<ClickEvent>> {
        self.read_collection(CLICKS_KEY)
    }

    pub fn get_clicks(&self) -> Vec<ClickEvent> {
        self.try_get_clicks().unwrap_or_else(|e| {
            error!(error = %e, "Failed to retrieve clicks from storage");
            Vec::new()
        })
    }

    pub fn try_get_clicks_for_url(&self, code: &str) -> Result<Vec<ClickEvent>> {
        Ok(self
            .try_get_clicks()?
            .into_iter()
            .filter(|click| click.shortcode == code)
            .collect())
    }

    pub fn get_clicks_for_url(&self, code: &str) -> Vec<ClickEvent> {
        self.get_clicks()
            .into_iter()
            .filter(|click| click.shortcode == code)
            .collect()
    }
}
