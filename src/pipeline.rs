use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::task::JoinSet;

use crate::config::{ScrapeConfig, sanitize_fetch_concurrency};
use crate::discover::profile_links;
use crate::error::{FetchError, ScrapeError};
use crate::extract::{extract, page_text};
use crate::fetch::PageFetcher;
use crate::normalize::{CountryNormalizer, country_name_from_url};
use crate::record::{CountryTypeRecord, RecordSource};

enum PageOutcome {
    Record(CountryTypeRecord),
    FetchFailed,
    NoMatch,
}

/// The extraction pipeline: discover country profile links from the index
/// page, fetch and parse each with a bounded worker pool, and assemble the
/// record table.
///
/// Per-link failures are absorbed (logged and counted, never retried);
/// only a run that produces zero usable records surfaces an error. A run
/// is canceled by setting the shutdown flag: in-flight fetches are
/// abandoned and accumulated records discarded.
pub struct Scraper {
    config: ScrapeConfig,
    fetcher: PageFetcher,
    normalizer: CountryNormalizer,
}

impl Scraper {
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        let fetcher = PageFetcher::new(&config.user_agent)?;
        Ok(Self {
            config,
            fetcher,
            normalizer: CountryNormalizer::new(),
        })
    }

    pub async fn run(
        &self,
        shutdown: &AtomicBool,
    ) -> Result<Vec<CountryTypeRecord>, ScrapeError> {
        if shutdown.load(Ordering::Relaxed) {
            return Err(ScrapeError::Canceled);
        }

        let index_url = self.config.index_url();
        let html = self
            .fetcher
            .fetch(&index_url, self.config.index_timeout)
            .await
            .map_err(ScrapeError::Index)?;

        let links = profile_links(&html, &self.config);
        if links.is_empty() {
            return Err(ScrapeError::NoLinks);
        }
        info!("discovered {} country profile links", links.len());

        let attempted = links.len();
        let concurrency = sanitize_fetch_concurrency(self.config.fetch_concurrency);
        let page_timeout = self.config.page_timeout;
        let mut pending = links.into_iter().enumerate();
        let mut set: JoinSet<(usize, PageOutcome)> = JoinSet::new();

        for _ in 0..concurrency {
            if let Some((idx, url)) = pending.next() {
                set.spawn(process_profile_page(
                    idx,
                    url,
                    self.fetcher.clone(),
                    self.normalizer,
                    page_timeout,
                ));
            }
        }

        let mut collected: Vec<(usize, CountryTypeRecord)> = Vec::new();
        let mut fetch_failures = 0usize;
        let mut no_match = 0usize;

        while let Some(joined) = set.join_next().await {
            if shutdown.load(Ordering::Relaxed) {
                set.abort_all();
                while set.join_next().await.is_some() {}
                return Err(ScrapeError::Canceled);
            }

            match joined {
                Ok((idx, PageOutcome::Record(record))) => collected.push((idx, record)),
                Ok((_, PageOutcome::FetchFailed)) => fetch_failures += 1,
                Ok((_, PageOutcome::NoMatch)) => no_match += 1,
                Err(err) => {
                    warn!("profile worker failed: {err}");
                    fetch_failures += 1;
                }
            }

            if let Some((idx, url)) = pending.next() {
                set.spawn(process_profile_page(
                    idx,
                    url,
                    self.fetcher.clone(),
                    self.normalizer,
                    page_timeout,
                ));
            }
        }

        if collected.is_empty() {
            return Err(ScrapeError::Empty {
                attempted,
                fetch_failures,
                no_match,
            });
        }

        // Workers complete out of order; restore link discovery order so
        // the parallel run is indistinguishable from a sequential one.
        collected.sort_by_key(|(idx, _)| *idx);
        info!(
            "assembled {} records ({} fetch failures, {} without extractable data)",
            collected.len(),
            fetch_failures,
            no_match
        );
        Ok(collected.into_iter().map(|(_, record)| record).collect())
    }
}

async fn process_profile_page(
    idx: usize,
    url: String,
    fetcher: PageFetcher,
    normalizer: CountryNormalizer,
    timeout: Duration,
) -> (usize, PageOutcome) {
    let html = match fetcher.fetch(&url, timeout).await {
        Ok(html) => html,
        Err(err) => {
            debug!("skipping {url}: {err}");
            return (idx, PageOutcome::FetchFailed);
        }
    };

    let text = page_text(&html);
    let Some(extraction) = extract(&text) else {
        debug!("skipping {url}: no recognizable type/percentage pair");
        return (idx, PageOutcome::NoMatch);
    };

    let Some(country_name) = country_name_from_url(&url) else {
        debug!("skipping {url}: no country slug in path");
        return (idx, PageOutcome::NoMatch);
    };

    // An unresolved code is retained as absent, not treated as a skip.
    let country_code = normalizer.alpha3(&country_name);
    if country_code.is_none() {
        debug!("no canonical code for '{country_name}'");
    }

    (
        idx,
        PageOutcome::Record(CountryTypeRecord {
            country_name,
            country_code,
            type_code: extraction.type_code,
            percentage: extraction.percentage,
            source: RecordSource::Extracted,
        }),
    )
}
