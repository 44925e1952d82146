//! Snaplink - a small URL shortener core
//!
//! Users submit long URLs, receive short codes, follow them and look at
//! click statistics. All state lives in a synchronous key-value store
//! holding two JSON collections (short URLs and click events).
//!
//! # Architecture
//! - `utils`: input validation and shortcode generation
//! - `storage`: models, key-value backends and the link collections
//! - `services`: link creation, redirect resolution, statistics
//! - `config`: configuration loading
//! - `system`: logging and the in-memory log store
//! - `interfaces`: command-line driver (feature `cli`)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
#[cfg(feature = "cli")]
pub mod interfaces;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
