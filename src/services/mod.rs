//! Core services: link creation, redirect resolution and statistics.

pub mod analytics_service;
pub mod link_service;
pub mod redirect;

pub use analytics_service::{
    AnalyticsService, LinkReport, LinkStatus, StatisticsReport, UrlSummary, compute_summary,
    group_clicks_by_shortcode,
};
pub use link_service::{
    BatchCreateError, BatchFailedItem, CreateLinkRequest, LinkCreateResult, LinkService,
    ValidatedLink,
};
pub use redirect::{RedirectContext, RedirectService, RedirectTarget};
