//! Best-effort extraction of a country → most-common-personality-type
//! table from 16Personalities country profile pages.
//!
//! The pipeline discovers profile links on a single index page, fetches
//! each with a bounded worker pool and no retries, recovers a
//! (type, percentage) pair from the page text with a two-strategy
//! heuristic cascade, and normalizes country identity to ISO alpha-3
//! codes. Per-page failures are absorbed; only a run with zero usable
//! records fails, and [`DatasetProvider`] then substitutes a fixed
//! fallback table so callers always have renderable data.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod discover;
pub mod error;
pub mod export;
pub mod extract;
pub mod fallback;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod record;

pub use cache::ResultCache;
pub use config::ScrapeConfig;
pub use dataset::{Dataset, DatasetOrigin, DatasetProvider};
pub use error::{FetchError, ScrapeError};
pub use fallback::fallback_records;
pub use pipeline::Scraper;
pub use record::{CountryTypeRecord, RecordSource, TypeCode};
