use clap::Parser;
use reel_crawl::{Crawl, CrawlConfig};

mod args;
use args::Args;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    ::log::info!("Starting crawl from search page: {}", args.search_url);

    println!("Note: crawling requires a WebDriver server (e.g., ChromeDriver or geckodriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let start_time = std::time::Instant::now();
    let output = match Crawl::with_config(config).run().await {
        Ok(output) => output,
        Err(e) => {
            ::log::error!("Crawl failed: {}", e);
            return;
        }
    };

    ::log::info!(
        "Crawl complete - {} movies, {} review bundles in {:.2} seconds",
        output.movies.len(),
        output.reviews.len(),
        start_time.elapsed().as_secs_f64()
    );

    // Hand the structured results to whatever consumes them downstream
    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => ::log::error!("Failed to serialize crawl output: {}", e),
    }
}

/// Merge the optional config file with command-line overrides
fn build_config(args: &Args) -> Result<CrawlConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = CrawlConfig::from_file(path)?;
            config.search_url = args.search_url.clone();
            config
        }
        None => CrawlConfig::new(&args.search_url),
    };

    if let Some(repetitions) = args.load_more {
        config.load_more_repetitions = repetitions;
    }
    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }

    Ok(config)
}
