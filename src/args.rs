use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reel-crawl")]
#[command(about = "Crawls a film-catalogue site for movie records and their reviews")]
#[command(version)]
pub struct Args {
    /// Search page URL to discover catalogues from
    pub search_url: String,

    /// Number of paginated catalogue results to load on the search page
    #[arg(short = 'l', long)]
    pub load_more: Option<u32>,

    /// URL of the WebDriver instance
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
