use std::time::Duration;

/// Upper bound on concurrent in-flight profile fetches, to bound load on
/// the remote service.
pub const MAX_FETCH_CONCURRENCY: usize = 16;

pub fn sanitize_fetch_concurrency(value: usize) -> usize {
    value.clamp(1, MAX_FETCH_CONCURRENCY)
}

/// Pipeline configuration. Defaults mirror the reference deployment: the
/// 16Personalities world index, a 15 s index fetch budget and a 10 s
/// per-profile budget, and a descriptive client-identifying User-Agent.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub index_path: String,
    /// A profile href starts with this prefix and contains at least
    /// `min_href_slashes` slashes (`/<profile-section>/<locale>/<slug>`).
    pub profile_prefix: String,
    pub min_href_slashes: usize,
    pub user_agent: String,
    pub index_timeout: Duration,
    pub page_timeout: Duration,
    pub fetch_concurrency: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.16personalities.com".to_string(),
            index_path: "/country-profiles/global/world".to_string(),
            profile_prefix: "/country-profiles/".to_string(),
            min_href_slashes: 2,
            user_agent: "typeatlas/0.1 (country profile dataset bot)".to_string(),
            index_timeout: Duration::from_secs(15),
            page_timeout: Duration::from_secs(10),
            fetch_concurrency: 12,
        }
    }
}

impl ScrapeConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_fetch_concurrency(mut self, value: usize) -> Self {
        self.fetch_concurrency = sanitize_fetch_concurrency(value);
        self
    }

    pub fn with_timeouts(mut self, index: Duration, page: Duration) -> Self {
        self.index_timeout = index;
        self.page_timeout = page;
        self
    }

    pub fn index_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.index_path)
    }
}
