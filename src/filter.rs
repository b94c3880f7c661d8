use crate::config::CrawlerConfig;
use regex::Regex;

/// Name filter deciding which discovered profiles are worth crawling
#[derive(Debug, Default)]
pub struct NameFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl NameFilter {
    /// Compile the include and exclude patterns
    pub fn new(include_patterns: &[String], exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut include_regexes = Vec::with_capacity(include_patterns.len());
        for pattern in include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Build the filter from the crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Result<Self, regex::Error> {
        Self::new(&config.include_patterns, &config.exclude_patterns)
    }

    /// Determine if a name should be crawled
    pub fn should_crawl(&self, name: &str) -> bool {
        if name.is_empty() {
            return false;
        }

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|regex| regex.is_match(name)) {
            return false;
        }

        // If include patterns are specified, at least one must match
        self.include_regexes.is_empty() || self.include_regexes.iter().any(|regex| regex.is_match(name))
    }
}
