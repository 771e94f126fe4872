// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod records;
pub mod renderer;
pub mod wait;

// Re-export commonly used types for convenience
pub use config::CrawlConfig;
pub use crawlers::pipeline::{CrawlOutput, CrawlPipeline};
pub use error::CrawlError;
pub use records::{CatalogueRef, MovieRecord, MovieReviewBundle};
pub use renderer::{Renderer, WebPage};

/// Builder for a crawl against a live WebDriver session
pub struct Crawl {
    config: CrawlConfig,
}

impl Crawl {
    /// Create a builder with default configuration for the given search URL
    pub fn new(search_url: &str) -> Self {
        Self {
            config: CrawlConfig::new(search_url),
        }
    }

    /// Create a builder from a prepared configuration
    pub fn with_config(config: CrawlConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            config: CrawlConfig::from_file(path)?,
        })
    }

    /// Set how many times the search page's load-more control is triggered
    pub fn with_load_more_repetitions(mut self, repetitions: u32) -> Self {
        self.config.load_more_repetitions = repetitions;
        self
    }

    /// Set the WebDriver endpoint
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Connect the rendering session and run the whole crawl.
    ///
    /// The session is released on every exit path, including faults.
    pub async fn run(mut self) -> Result<CrawlOutput, Box<dyn std::error::Error>> {
        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.config.webdriver_url = webdriver_url;
            }
        }

        let page = WebPage::connect(&self.config.webdriver_url).await?;
        let output = CrawlPipeline::crawl(page, self.config).await?;
        Ok(output)
    }
}
