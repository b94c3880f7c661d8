use crate::error::{CrawlError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// How profile markup is retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Plain HTTP GET requests
    #[default]
    Http,
    /// A WebDriver-controlled browser renders the page first
    WebDriver,
}

/// Configuration for a profile crawl and the frontends reading its snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Name the crawl starts from
    #[serde(default = "default_seed")]
    pub seed: String,

    /// Profile lookup endpoint; the name is passed as the `keyword` parameter
    #[serde(default = "default_profile_base_url")]
    pub profile_base_url: String,

    /// Directory holding `<name>.jpg` portraits
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Where the snapshot is written
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Markup retrieval backend
    #[serde(default)]
    pub backend: Backend,

    /// URL for the WebDriver instance (webdriver backend only)
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Regex patterns a discovered name must match to be crawled
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that exclude a discovered name
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Stop after this many profiles have been recorded
    #[serde(default)]
    pub max_profiles: Option<usize>,

    /// Address the web frontend listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// If set, the viewer writes each portrait into this directory
    #[serde(default)]
    pub portrait_dir: Option<String>,

    /// Show the portraits in a desktop window (`window` feature)
    #[serde(default)]
    pub show_window: bool,

    /// How long each portrait stays in the window, in milliseconds
    #[serde(default = "default_portrait_delay_ms")]
    pub portrait_delay_ms: u64,
}

impl CrawlerConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides (`WEBDRIVER_URL`)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    /// Check values that serde defaults cannot guard
    pub fn validate(&self) -> Result<()> {
        if self.seed.trim().is_empty() {
            return Err(CrawlError::Config("seed must not be empty".to_string()));
        }
        if self.max_profiles == Some(0) {
            return Err(CrawlError::Config(
                "max_profiles must be at least 1".to_string(),
            ));
        }
        url::Url::parse(&self.profile_base_url)
            .map_err(|e| CrawlError::Config(format!("profile_base_url: {e}")))?;
        url::Url::parse(&self.image_base_url)
            .map_err(|e| CrawlError::Config(format!("image_base_url: {e}")))?;
        Ok(())
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            profile_base_url: default_profile_base_url(),
            image_base_url: default_image_base_url(),
            snapshot_path: default_snapshot_path(),
            backend: Backend::default(),
            webdriver_url: default_webdriver_url(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            max_profiles: None,
            bind: default_bind(),
            portrait_dir: None,
            show_window: false,
            portrait_delay_ms: default_portrait_delay_ms(),
        }
    }
}

fn default_seed() -> String {
    "启功".to_string()
}

fn default_profile_base_url() -> String {
    "http://bnu.hiwis.com/People/People_Detail".to_string()
}

fn default_image_base_url() -> String {
    "http://bnu.hiwis.com/images".to_string()
}

fn default_snapshot_path() -> String {
    "people.json".to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_portrait_delay_ms() -> u64 {
    18
}
