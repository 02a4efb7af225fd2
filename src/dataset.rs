use std::sync::atomic::AtomicBool;

use log::warn;

use crate::cache::ResultCache;
use crate::config::ScrapeConfig;
use crate::error::FetchError;
use crate::fallback::fallback_records;
use crate::pipeline::Scraper;
use crate::record::CountryTypeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetOrigin {
    Scraped,
    Cached,
    Fallback,
}

impl DatasetOrigin {
    pub fn label(self) -> &'static str {
        match self {
            DatasetOrigin::Scraped => "scraped",
            DatasetOrigin::Cached => "cached",
            DatasetOrigin::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<CountryTypeRecord>,
    pub origin: DatasetOrigin,
}

/// The consumer-facing policy around the pipeline: serve the memoized
/// result when one exists, otherwise scrape, otherwise substitute the
/// fallback table. `load` always returns a non-empty, valid dataset.
pub struct DatasetProvider {
    scraper: Scraper,
    cache: ResultCache,
}

impl DatasetProvider {
    pub fn new(config: ScrapeConfig) -> Result<Self, FetchError> {
        Ok(Self {
            scraper: Scraper::new(config)?,
            cache: ResultCache::new(),
        })
    }

    pub async fn load(&self, shutdown: &AtomicBool) -> Dataset {
        if let Some(records) = self.cache.get().await {
            return Dataset {
                records: records.as_ref().clone(),
                origin: DatasetOrigin::Cached,
            };
        }

        match self.scraper.run(shutdown).await {
            Ok(records) => {
                let records = self.cache.store(records).await;
                Dataset {
                    records: records.as_ref().clone(),
                    origin: DatasetOrigin::Scraped,
                }
            }
            Err(err) => {
                warn!("scrape failed ({err}); substituting fallback dataset");
                Dataset {
                    records: fallback_records(),
                    origin: DatasetOrigin::Fallback,
                }
            }
        }
    }
}
