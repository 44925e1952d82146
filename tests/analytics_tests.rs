//! Statistics tests

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use snaplink::services::{
    AnalyticsService, LinkStatus, UrlSummary, compute_summary, group_clicks_by_shortcode,
};
use snaplink::storage::{
    ClickDetails, ClickEvent, KeyValueStore, LinkStorage, MemoryStore, ShortUrlRecord, URLS_KEY,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
}

fn record(code: &str, created_minutes_ago: i64, validity: u32) -> ShortUrlRecord {
    ShortUrlRecord::new(
        format!("https://{}.example.com", code),
        code,
        validity,
        now() - Duration::minutes(created_minutes_ago),
    )
}

fn click(code: &str, source: &str, seconds: i64) -> ClickEvent {
    ClickEvent {
        shortcode: code.to_string(),
        timestamp: now() + Duration::seconds(seconds),
        source: source.to_string(),
        user_agent: "test".to_string(),
    }
}

/// 2 active (a, b), 1 expired (c), 5 clicks
fn fixture() -> (Vec<ShortUrlRecord>, Vec<ClickEvent>) {
    let urls = vec![record("aaa", 5, 30), record("bbb", 0, 10), record("ccc", 120, 60)];
    let clicks = vec![
        click("aaa", "direct", 1),
        click("bbb", "direct", 2),
        click("aaa", "https://x.example.com", 3),
        click("ccc", "direct", 4),
        click("aaa", "direct", 5),
    ];
    (urls, clicks)
}

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let (urls, clicks) = fixture();

        let summary = compute_summary(&urls, &clicks, now());

        assert_eq!(
            summary,
            UrlSummary {
                total_urls: 3,
                total_clicks: 5,
                active_urls: 2,
                expired_urls: 1,
            }
        );
    }

    #[test]
    fn test_summary_is_pure() {
        let (urls, clicks) = fixture();
        let first = compute_summary(&urls, &clicks, now());
        let second = compute_summary(&urls, &clicks, now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(compute_summary(&[], &[], now()), UrlSummary::default());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let (urls, clicks) = fixture();
        let json = serde_json::to_value(compute_summary(&urls, &clicks, now())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalUrls": 3,
                "totalClicks": 5,
                "activeUrls": 2,
                "expiredUrls": 1
            })
        );
    }
}

#[cfg(test)]
mod grouping_tests {
    use super::*;

    #[test]
    fn test_groups_preserve_recorded_order() {
        let (_, clicks) = fixture();

        let groups = group_clicks_by_shortcode(&clicks);

        assert_eq!(groups.len(), 3);
        let aaa: Vec<&str> = groups["aaa"].iter().map(|c| c.source.as_str()).collect();
        assert_eq!(aaa, vec!["direct", "https://x.example.com", "direct"]);
        assert!(groups["aaa"].windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(groups["bbb"].len(), 1);
        assert_eq!(groups["ccc"].len(), 1);
    }

    #[test]
    fn test_no_clicks_no_groups() {
        assert!(group_clicks_by_shortcode(&[]).is_empty());
    }
}

#[cfg(test)]
mod status_tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(LinkStatus::Active.to_string(), "Active");
        assert_eq!(LinkStatus::Expired.as_ref(), "Expired");
    }

    #[test]
    fn test_status_at() {
        let t = now();
        assert_eq!(LinkStatus::at(t + Duration::seconds(1), t), LinkStatus::Active);
        assert_eq!(LinkStatus::at(t, t), LinkStatus::Expired);
        assert_eq!(LinkStatus::at(t - Duration::days(1), t), LinkStatus::Expired);
    }
}

#[cfg(test)]
mod report_tests {
    use super::*;

    fn service_with_fixture() -> (Arc<MemoryStore>, AnalyticsService) {
        let store = Arc::new(MemoryStore::new());
        let storage = Arc::new(LinkStorage::new(store.clone(), "test"));
        let (urls, clicks) = fixture();
        storage.try_save_urls(&urls).unwrap();
        for c in clicks {
            storage
                .try_record_click(
                    &c.shortcode,
                    ClickDetails {
                        source: Some(c.source),
                        user_agent: Some(c.user_agent),
                        timestamp: Some(c.timestamp),
                    },
                )
                .unwrap();
        }
        (store, AnalyticsService::new(storage))
    }

    #[test]
    fn test_report_per_link() {
        let (_, service) = service_with_fixture();

        let report = service.report_at(now());

        assert_eq!(report.generated_at, now());
        assert_eq!(report.summary.total_clicks, 5);
        let rows: Vec<(&str, LinkStatus, usize)> = report
            .links
            .iter()
            .map(|l| (l.record.shortcode.as_str(), l.status, l.click_count()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("aaa", LinkStatus::Active, 3),
                ("bbb", LinkStatus::Active, 1),
                ("ccc", LinkStatus::Expired, 1),
            ]
        );
    }

    #[test]
    fn test_report_degrades_on_corrupt_storage() {
        let (store, service) = service_with_fixture();
        store.set_item(URLS_KEY, "][").unwrap();

        let report = service.report_at(now());

        assert!(report.links.is_empty());
        assert_eq!(report.summary.total_urls, 0);
        assert_eq!(report.summary.total_clicks, 5);
    }
}
