#[derive(Clone, Debug)]
pub struct Config {
    /// Display name of the city to analyze on its own chart.
    pub city: String,
    pub api_base: String,
    /// Hard cap on listing pages fetched per city; discovery also stops
    /// early at the first empty page.
    pub max_pages: u32,
    pub per_page: u32,
    /// Width of the idea-detail fetch pool.
    pub fetch_concurrency: usize,
    pub city_chart_path: String,
    pub cohort_chart_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            city: "New Orleans".to_string(),
            api_base: "https://neighborland.com".to_string(),
            max_pages: 3,
            per_page: 500,
            fetch_concurrency: num_cpus::get().min(8),
            city_chart_path: "city_support.svg".to_string(),
            cohort_chart_path: "cohort_support.svg".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            city: std::env::var("CITY").unwrap_or(d.city),
            api_base: std::env::var("API_BASE").unwrap_or(d.api_base),
            max_pages: std::env::var("MAX_PAGES").ok().and_then(|v| v.parse().ok()).unwrap_or(d.max_pages),
            per_page: std::env::var("PER_PAGE").ok().and_then(|v| v.parse().ok()).unwrap_or(d.per_page),
            fetch_concurrency: std::env::var("FETCH_CONCURRENCY").ok().and_then(|v| v.parse().ok()).unwrap_or(d.fetch_concurrency),
            city_chart_path: std::env::var("CITY_CHART").unwrap_or(d.city_chart_path),
            cohort_chart_path: std::env::var("COHORT_CHART").unwrap_or(d.cohort_chart_path),
        }
    }
}
