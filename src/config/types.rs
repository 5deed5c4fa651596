use serde::Deserialize;

/// Main configuration structure for Sheria
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub fetch: FetchConfig,
    pub sites: SiteConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub listing: ListingConfig,
    #[serde(default)]
    pub index: Option<IndexConfig>,
}

/// Fetch engine behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Politeness delay before each request (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Upper bound of the random jitter added to the politeness delay
    /// (milliseconds)
    #[serde(rename = "jitter-ms", default = "default_jitter_ms")]
    pub jitter_ms: u64,

    /// Maximum attempts per URL on transient failures
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Maximum number of concurrent in-flight fetches
    #[serde(rename = "max-concurrency")]
    pub max_concurrency: u32,

    /// Cap on the exponential backoff delay (seconds)
    #[serde(rename = "backoff-cap-secs", default = "default_backoff_cap_secs")]
    pub backoff_cap_secs: u64,

    /// Optional batch-level timeout; pending fetches are abandoned on
    /// expiry and reported as failures (seconds)
    #[serde(rename = "batch-timeout-secs", default)]
    pub batch_timeout_secs: Option<u64>,

    /// Pool of User-Agent header values rotated per request
    #[serde(rename = "user-agents", default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

/// Primary/fallback site topology
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the primary site
    #[serde(rename = "primary-base-url")]
    pub primary_base_url: String,

    /// Base URL of the fallback mirror tried after the primary exhausts
    /// its retries
    #[serde(rename = "fallback-base-url")]
    pub fallback_base_url: String,

    /// Explicit primary-path to fallback-path prefix mapping. Paths with
    /// no entry are carried to the mirror unchanged.
    #[serde(rename = "path-map", default)]
    pub path_map: Vec<PathMapEntry>,
}

/// One entry of the primary-to-fallback path mapping table
#[derive(Debug, Clone, Deserialize)]
pub struct PathMapEntry {
    /// Path prefix on the primary site (e.g. "/judgments/")
    pub primary: String,

    /// Equivalent path prefix on the fallback mirror
    pub fallback: String,
}

/// Listing traversal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Maximum listing pages scanned per run; bounds pagination on
    /// malformed next-page links
    #[serde(rename = "max-page-scan", default = "default_max_page_scan")]
    pub max_page_scan: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_page_scan: default_max_page_scan(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory for CSV/JSON output files
    pub directory: String,
}

/// Search index configuration; the index sink is disabled when this
/// section is absent
#[derive(Debug, Clone, Deserialize)]
pub struct IndexConfig {
    /// Base URL of the index HTTP API (e.g. "http://localhost:9200")
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Name of the index all three record kinds are written to
    #[serde(rename = "index-name", default = "default_index_name")]
    pub index_name: String,
}

fn default_jitter_ms() -> u64 {
    500
}

fn default_backoff_cap_secs() -> u64 {
    60
}

fn default_max_page_scan() -> u32 {
    10
}

fn default_index_name() -> String {
    "legal_documents".to_string()
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:121.0) Gecko/20100101 Firefox/121.0",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
