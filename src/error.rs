use thiserror::Error;

/// Outcome classification for a single page fetch. One request, no retry;
/// every failure is represented as a value, nothing escapes past this
/// boundary.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("http status {0}")]
    Status(u16),
}

/// The only error the pipeline surfaces to its caller. Every variant means
/// the run produced no usable records; the caller's recovery policy is to
/// substitute the fallback dataset.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("index page fetch failed: {0}")]
    Index(#[source] FetchError),
    #[error("no country profile links found on index page")]
    NoLinks,
    #[error(
        "no usable records from {attempted} profile pages \
         ({fetch_failures} fetch failures, {no_match} without extractable data)"
    )]
    Empty {
        attempted: usize,
        fetch_failures: usize,
        no_match: usize,
    },
    #[error("scrape canceled before completion")]
    Canceled,
}
