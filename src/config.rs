use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for a crawl run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// Search page URL that catalogue discovery starts from
    pub search_url: String,

    /// How many times to trigger the "load more" control on the search page
    #[serde(default = "default_load_more_repetitions")]
    pub load_more_repetitions: u32,

    /// URL of the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// CSS selectors for the site being crawled
    #[serde(default)]
    pub selectors: Selectors,

    /// Wait budgets and pauses
    #[serde(default)]
    pub timing: Timing,
}

impl CrawlConfig {
    /// Create a configuration with default values for the given search URL
    pub fn new(search_url: &str) -> Self {
        Self {
            search_url: search_url.to_string(),
            load_more_repetitions: default_load_more_repetitions(),
            webdriver_url: default_webdriver_url(),
            selectors: Selectors::default(),
            timing: Timing::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

/// CSS selectors and attribute names the extractors read from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Selectors {
    /// "Load more" control on the search page
    #[serde(default = "default_load_more_trigger")]
    pub load_more_trigger: String,

    /// Catalogue links on the search page
    #[serde(default = "default_catalogue_link")]
    pub catalogue_link: String,

    /// Movie tiles on a catalogue page
    #[serde(default = "default_movie_tile")]
    pub movie_tile: String,

    /// Attribute on a tile carrying the `name (year) rating` title text
    #[serde(default = "default_tile_title_attribute")]
    pub tile_title_attribute: String,

    /// Control advancing to the following page of a paginated listing
    #[serde(default = "default_next_control")]
    pub next_control: String,

    /// Per-review "reveal full text" control
    #[serde(default = "default_review_expander")]
    pub review_expander: String,

    /// Review body element
    #[serde(default = "default_review_body")]
    pub review_body: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            load_more_trigger: default_load_more_trigger(),
            catalogue_link: default_catalogue_link(),
            movie_tile: default_movie_tile(),
            tile_title_attribute: default_tile_title_attribute(),
            next_control: default_next_control(),
            review_expander: default_review_expander(),
            review_body: default_review_body(),
        }
    }
}

/// Wait budgets, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timing {
    /// Settle time after navigation, before network activity is halted
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Pause around scrolls and review expansions, for lazy-loaded content
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Budget for the post-click "more items loaded" wait
    #[serde(default = "default_load_more_timeout_ms")]
    pub load_more_timeout_ms: u64,

    /// Budget for the next-page probe; expiry means "no more pages"
    #[serde(default = "default_next_timeout_ms")]
    pub next_timeout_ms: u64,

    /// Interval between condition re-checks
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            pause_ms: default_pause_ms(),
            load_more_timeout_ms: default_load_more_timeout_ms(),
            next_timeout_ms: default_next_timeout_ms(),
            poll_ms: default_poll_ms(),
        }
    }
}

impl Timing {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn load_more_timeout(&self) -> Duration {
        Duration::from_millis(self.load_more_timeout_ms)
    }

    pub fn next_timeout(&self) -> Duration {
        Duration::from_millis(self.next_timeout_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }

    /// Millisecond-scale budgets for scripted-renderer tests
    #[cfg(test)]
    pub(crate) fn fast() -> Self {
        Self {
            settle_ms: 0,
            pause_ms: 0,
            load_more_timeout_ms: 200,
            next_timeout_ms: 40,
            poll_ms: 5,
        }
    }
}

fn default_load_more_repetitions() -> u32 {
    1
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_load_more_trigger() -> String {
    ".load-more-search".to_string()
}

fn default_catalogue_link() -> String {
    ".list-link".to_string()
}

fn default_movie_tile() -> String {
    ".frame".to_string()
}

fn default_tile_title_attribute() -> String {
    "data-original-title".to_string()
}

fn default_next_control() -> String {
    ".next".to_string()
}

fn default_review_expander() -> String {
    ".reveal.js-reveal".to_string()
}

fn default_review_body() -> String {
    ".body-text".to_string()
}

fn default_settle_ms() -> u64 {
    8000
}

fn default_pause_ms() -> u64 {
    3000
}

fn default_load_more_timeout_ms() -> u64 {
    10000
}

fn default_next_timeout_ms() -> u64 {
    3000
}

fn default_poll_ms() -> u64 {
    250
}
