//! Link creation service
//!
//! Owns the submission flow: validate each form row, settle the shortcode,
//! check uniqueness and persist. The uniqueness check and the write happen
//! under one lock so two submissions in the same process cannot both claim
//! a code.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::config::LinksConfig;
use crate::errors::{Result, SnaplinkError};
use crate::storage::{LinkStorage, ShortUrlRecord};
use crate::utils::{generate_shortcode, validate_shortcode, validate_url, validate_validity};

/// Attempts at drawing a generated code that is not taken yet.
const MAX_GENERATE_ATTEMPTS: usize = 5;

// ============ Request/Response DTOs ============

/// One row of the submission form, as typed by the user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub long_url: String,
    /// Optional custom code; empty means generate one.
    #[serde(default)]
    pub shortcode: String,
    /// Minutes; empty means the default validity.
    #[serde(default, deserialize_with = "string_or_number")]
    pub validity: String,
}

impl CreateLinkRequest {
    pub fn new(long_url: impl Into<String>) -> Self {
        Self {
            long_url: long_url.into(),
            ..Default::default()
        }
    }

    pub fn with_shortcode(mut self, shortcode: impl Into<String>) -> Self {
        self.shortcode = shortcode.into();
        self
    }

    pub fn with_validity(mut self, validity: impl Into<String>) -> Self {
        self.validity = validity.into();
        self
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(s)) => s,
        Some(Raw::Number(n)) => n.to_string(),
        None => String::new(),
    })
}

/// A request that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLink {
    /// Normalized, always carries a scheme.
    pub long_url: String,
    pub shortcode: Option<String>,
    pub validity_minutes: u32,
}

/// Result of link creation
#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub record: ShortUrlRecord,
    /// `<base_url>/<shortcode>`
    pub short_url: String,
    /// Whether the code was auto-generated
    pub generated_code: bool,
}

/// Single failed batch row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailedItem {
    /// Position in the submitted rows.
    pub index: usize,
    pub error: SnaplinkError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchCreateError {
    /// No row carried a URL.
    Empty,
    TooManyEntries { max: usize, got: usize },
    /// Field validation failed on these rows; nothing was written.
    InvalidEntries(Vec<BatchFailedItem>),
    /// Uniqueness or storage failure for the batch as a whole.
    Rejected(SnaplinkError),
}

impl fmt::Display for BatchCreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchCreateError::Empty => write!(f, "No URLs to shorten"),
            BatchCreateError::TooManyEntries { max, .. } => {
                write!(f, "Maximum {} URLs allowed", max)
            }
            BatchCreateError::InvalidEntries(items) => {
                let rows: Vec<String> = items
                    .iter()
                    .map(|item| format!("row {}: {}", item.index + 1, item.error.message()))
                    .collect();
                write!(f, "Invalid entries: {}", rows.join("; "))
            }
            BatchCreateError::Rejected(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BatchCreateError {}

impl From<SnaplinkError> for BatchCreateError {
    fn from(err: SnaplinkError) -> Self {
        BatchCreateError::Rejected(err)
    }
}

// ============ LinkService Implementation ============

pub struct LinkService {
    storage: Arc<LinkStorage>,
    base_url: String,
    max_batch_size: usize,
    write_lock: Mutex<()>,
}

impl LinkService {
    pub fn new(storage: Arc<LinkStorage>, config: &LinksConfig) -> Self {
        Self {
            storage,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_batch_size: config.max_batch_size.max(1),
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &Arc<LinkStorage> {
        &self.storage
    }

    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Run the three field validators in form order, stopping at the first failure.
    pub fn validate_request(&self, request: &CreateLinkRequest) -> Result<ValidatedLink> {
        let long_url = validate_url(&request.long_url)?;
        validate_shortcode(&request.shortcode)?;
        let validity_minutes = validate_validity(&request.validity)?;

        let shortcode = Some(&request.shortcode)
            .filter(|c| !c.trim().is_empty())
            .cloned();

        Ok(ValidatedLink {
            long_url,
            shortcode,
            validity_minutes,
        })
    }

    pub fn create_short_url(&self, request: &CreateLinkRequest) -> Result<LinkCreateResult> {
        self.create_short_url_at(request, Utc::now())
    }

    pub fn create_short_url_at(
        &self,
        request: &CreateLinkRequest,
        now: DateTime<Utc>,
    ) -> Result<LinkCreateResult> {
        let validated = self.validate_request(request).inspect_err(|e| {
            warn!(error = %e, "Form validation failed");
        })?;

        let _guard = self.write_lock.lock();
        let taken = self.taken_codes()?;

        let (shortcode, generated_code) = match validated.shortcode {
            Some(code) => {
                if taken.contains(&code) {
                    error!(shortcode = %code, "Shortcode uniqueness check failed");
                    return Err(SnaplinkError::duplicate_shortcode(format!(
                        "Shortcode \"{}\" already exists",
                        code
                    )));
                }
                (code, false)
            }
            None => (Self::generate_unique_code(&taken)?, true),
        };

        let record = ShortUrlRecord::new(
            validated.long_url,
            shortcode,
            validated.validity_minutes,
            now,
        );
        self.storage.try_save_url(&record)?;

        info!(
            shortcode = %record.shortcode,
            validity_minutes = record.validity_minutes,
            generated = generated_code,
            "Short URL created"
        );

        Ok(self.to_result(record, generated_code))
    }

    pub fn create_batch(
        &self,
        requests: &[CreateLinkRequest],
    ) -> std::result::Result<Vec<LinkCreateResult>, BatchCreateError> {
        self.create_batch_at(requests, Utc::now())
    }

    /// Create several links at once, all or nothing.
    ///
    /// Rows with a blank URL are ignored. Every remaining row must validate
    /// and every code must be free, both in storage and within the batch,
    /// before anything is written.
    pub fn create_batch_at(
        &self,
        requests: &[CreateLinkRequest],
        now: DateTime<Utc>,
    ) -> std::result::Result<Vec<LinkCreateResult>, BatchCreateError> {
        let rows: Vec<(usize, &CreateLinkRequest)> = requests
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.long_url.trim().is_empty())
            .collect();

        if rows.is_empty() {
            return Err(BatchCreateError::Empty);
        }
        if rows.len() > self.max_batch_size {
            warn!(max = self.max_batch_size, got = rows.len(), "Batch exceeds the URL limit");
            return Err(BatchCreateError::TooManyEntries {
                max: self.max_batch_size,
                got: rows.len(),
            });
        }

        let mut validated = Vec::with_capacity(rows.len());
        let mut failed = Vec::new();
        for (index, request) in rows {
            match self.validate_request(request) {
                Ok(link) => validated.push(link),
                Err(error) => failed.push(BatchFailedItem { index, error }),
            }
        }
        if !failed.is_empty() {
            warn!(failed = failed.len(), "Form validation failed");
            return Err(BatchCreateError::InvalidEntries(failed));
        }

        let _guard = self.write_lock.lock();
        let existing = self.taken_codes()?;
        let mut in_batch: HashSet<String> = HashSet::new();
        let mut planned = Vec::with_capacity(validated.len());

        for link in validated {
            let (code, generated) = match link.shortcode.clone() {
                Some(code) => (code, false),
                None => {
                    let taken: HashSet<String> = existing.union(&in_batch).cloned().collect();
                    (Self::generate_unique_code(&taken)?, true)
                }
            };

            if existing.contains(&code) {
                let e = SnaplinkError::duplicate_shortcode(format!(
                    "Shortcode \"{}\" already exists",
                    code
                ));
                error!(error = %e, "Shortcode uniqueness check failed");
                return Err(e.into());
            }
            if !in_batch.insert(code.clone()) {
                let e = SnaplinkError::duplicate_shortcode(format!(
                    "Duplicate shortcode \"{}\" in current batch",
                    code
                ));
                error!(error = %e, "Shortcode uniqueness check failed");
                return Err(e.into());
            }

            planned.push((link, code, generated));
        }

        info!(url_count = planned.len(), "Starting URL shortening process");

        let mut results = Vec::with_capacity(planned.len());
        let mut records = Vec::with_capacity(planned.len());
        for (link, code, generated) in planned {
            let record = ShortUrlRecord::new(link.long_url, code, link.validity_minutes, now);
            records.push(record.clone());
            results.push(self.to_result(record, generated));
        }

        self.storage.try_save_urls(&records).inspect_err(|e| {
            error!(error = %e, "URL shortening failed");
        })?;

        info!(count = results.len(), "URLs shortened successfully");
        Ok(results)
    }

    fn taken_codes(&self) -> Result<HashSet<String>> {
        Ok(self
            .storage
            .try_get_urls()?
            .into_iter()
            .map(|url| url.shortcode)
            .collect())
    }

    fn generate_unique_code(taken: &HashSet<String>) -> Result<String> {
        for _ in 0..MAX_GENERATE_ATTEMPTS {
            let code = generate_shortcode();
            if !taken.contains(&code) {
                return Ok(code);
            }
            warn!(shortcode = %code, "Generated shortcode already taken, drawing again");
        }
        Err(SnaplinkError::duplicate_shortcode(
            "Could not generate an unused shortcode",
        ))
    }

    fn to_result(&self, record: ShortUrlRecord, generated_code: bool) -> LinkCreateResult {
        LinkCreateResult {
            short_url: self.short_url(&record.shortcode),
            record,
            generated_code,
        }
    }
}
