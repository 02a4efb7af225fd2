use std::sync::Arc;

use tokio::sync::Mutex;

use crate::record::CountryTypeRecord;

/// Capacity-one memoization of a successful pipeline run.
///
/// Keyed by nothing: the first stored result is served for the rest of the
/// process lifetime. Populated only on success, never invalidated, never
/// persisted.
#[derive(Debug, Default)]
pub struct ResultCache {
    slot: Mutex<Option<Arc<Vec<CountryTypeRecord>>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self) -> Option<Arc<Vec<CountryTypeRecord>>> {
        self.slot.lock().await.clone()
    }

    pub async fn store(&self, records: Vec<CountryTypeRecord>) -> Arc<Vec<CountryTypeRecord>> {
        let records = Arc::new(records);
        let mut slot = self.slot.lock().await;
        // First success wins; concurrent callers converge on one result.
        if let Some(existing) = slot.as_ref() {
            return existing.clone();
        }
        *slot = Some(records.clone());
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordSource, TypeCode};

    fn record(name: &str) -> CountryTypeRecord {
        CountryTypeRecord {
            country_name: name.to_string(),
            country_code: None,
            type_code: TypeCode::ISTJ,
            percentage: None,
            source: RecordSource::Extracted,
        }
    }

    #[tokio::test]
    async fn empty_cache_misses() {
        let cache = ResultCache::new();
        assert!(cache.get().await.is_none());
    }

    #[tokio::test]
    async fn stores_once_and_serves_from_then_on() {
        let cache = ResultCache::new();
        cache.store(vec![record("France")]).await;
        let first = cache.get().await.unwrap();
        assert_eq!(first[0].country_name, "France");

        // A later store does not replace the memoized result.
        let kept = cache.store(vec![record("Japan")]).await;
        assert_eq!(kept[0].country_name, "France");
        assert_eq!(cache.get().await.unwrap()[0].country_name, "France");
    }
}
