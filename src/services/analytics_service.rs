//! Link statistics
//!
//! Pure aggregation over URL records and click events, plus a service that
//! loads both collections and assembles the per-link report.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::{AsRefStr, Display};
use tracing::info;

use crate::storage::{ClickEvent, LinkStorage, ShortUrlRecord};

/// Headline counts for the statistics page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlSummary {
    pub total_urls: usize,
    pub total_clicks: usize,
    pub active_urls: usize,
    pub expired_urls: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
pub enum LinkStatus {
    Active,
    Expired,
}

impl LinkStatus {
    /// `Active` while `expires_at` lies after `now`.
    pub fn at(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if expires_at > now {
            LinkStatus::Active
        } else {
            LinkStatus::Expired
        }
    }

    pub fn of(record: &ShortUrlRecord, now: DateTime<Utc>) -> Self {
        Self::at(record.expires_at, now)
    }
}

pub fn compute_summary(
    urls: &[ShortUrlRecord],
    clicks: &[ClickEvent],
    now: DateTime<Utc>,
) -> UrlSummary {
    let active_urls = urls.iter().filter(|url| url.is_active_at(now)).count();
    UrlSummary {
        total_urls: urls.len(),
        total_clicks: clicks.len(),
        active_urls,
        expired_urls: urls.len() - active_urls,
    }
}

/// Click events per shortcode, each list in recorded order.
pub fn group_clicks_by_shortcode(clicks: &[ClickEvent]) -> BTreeMap<String, Vec<ClickEvent>> {
    let mut groups: BTreeMap<String, Vec<ClickEvent>> = BTreeMap::new();
    for click in clicks {
        groups
            .entry(click.shortcode.clone())
            .or_default()
            .push(click.clone());
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkReport {
    pub record: ShortUrlRecord,
    pub status: LinkStatus,
    pub clicks: Vec<ClickEvent>,
}

impl LinkReport {
    /// Derived from click events, not from the record's counter.
    pub fn click_count(&self) -> usize {
        self.clicks.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub generated_at: DateTime<Utc>,
    pub summary: UrlSummary,
    /// One entry per stored URL, in creation order.
    pub links: Vec<LinkReport>,
}

pub struct AnalyticsService {
    storage: Arc<LinkStorage>,
}

impl AnalyticsService {
    pub fn new(storage: Arc<LinkStorage>) -> Self {
        Self { storage }
    }

    pub fn report(&self) -> StatisticsReport {
        self.report_at(Utc::now())
    }

    /// Storage failures show up as empty collections.
    pub fn report_at(&self, now: DateTime<Utc>) -> StatisticsReport {
        let urls = self.storage.get_urls();
        let clicks = self.storage.get_clicks();

        let summary = compute_summary(&urls, &clicks, now);
        let groups = group_clicks_by_shortcode(&clicks);

        let links = urls
            .into_iter()
            .map(|record| LinkReport {
                status: LinkStatus::of(&record, now),
                clicks: groups.get(&record.shortcode).cloned().unwrap_or_default(),
                record,
            })
            .collect();

        info!(
            total_urls = summary.total_urls,
            total_clicks = summary.total_clicks,
            active_urls = summary.active_urls,
            expired_urls = summary.expired_urls,
            "Statistics data loaded"
        );

        StatisticsReport {
            generated_at: now,
            summary,
            links,
        }
    }
}
