use crate::config::CrawlConfig;
use crate::crawlers::navigator::Navigator;
use crate::crawlers::{catalogues, movies, reviews};
use crate::error::CrawlError;
use crate::parsers::TileParser;
use crate::records::{MovieRecord, MovieReviewBundle};
use crate::renderer::Renderer;
use serde::{Deserialize, Serialize};
use url::Url;

/// Everything a crawl produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlOutput {
    pub movies: Vec<MovieRecord>,
    pub reviews: Vec<MovieReviewBundle>,
}

/// Orchestrates discovery, movie extraction and review collection over one
/// rendering session.
///
/// The session is acquired when the pipeline is built and released exactly
/// once by [`CrawlPipeline::shutdown`]; [`CrawlPipeline::crawl`] guarantees
/// the release on every exit path, including faults mid-extraction.
pub struct CrawlPipeline<R: Renderer> {
    nav: Navigator<R>,
    config: CrawlConfig,
    parser: TileParser,
    closed: bool,
}

impl<R: Renderer> CrawlPipeline<R> {
    pub fn new(page: R, config: CrawlConfig) -> Self {
        let nav = Navigator::new(page, config.timing.clone());
        Self {
            nav,
            config,
            parser: TileParser::new(),
            closed: false,
        }
    }

    /// Run the whole crawl with the session released on all exit paths
    pub async fn crawl(page: R, config: CrawlConfig) -> Result<CrawlOutput, CrawlError> {
        let mut pipeline = Self::new(page, config);
        let result = pipeline.crawl_inner().await;
        pipeline.shutdown().await;
        result
    }

    async fn crawl_inner(&mut self) -> Result<CrawlOutput, CrawlError> {
        let movies = self.run().await?;
        let reviews = self.collect_reviews(&movies).await?;
        Ok(CrawlOutput { movies, reviews })
    }

    /// Discover catalogues, then extract movies from each in discovery order
    pub async fn run(&mut self) -> Result<Vec<MovieRecord>, CrawlError> {
        let catalogues = catalogues::discover(
            &mut self.nav,
            &self.config.selectors,
            &self.config.search_url,
            self.config.load_more_repetitions,
        )
        .await?;

        let mut movies = Vec::new();
        for catalogue in &catalogues {
            movies::extract_from_catalogue(
                &mut self.nav,
                &self.config.selectors,
                &self.parser,
                catalogue,
                &mut movies,
            )
            .await?;
        }

        ::log::info!("extracted {} movie records", movies.len());
        Ok(movies)
    }

    /// Collect the reviews of each movie, in input order.
    ///
    /// Every movie gets a fresh review buffer, so reviews can never leak
    /// from one bundle into the next.
    pub async fn collect_reviews(
        &mut self,
        movies: &[MovieRecord],
    ) -> Result<Vec<MovieReviewBundle>, CrawlError> {
        let mut bundles = Vec::with_capacity(movies.len());
        for movie in movies {
            let review_url = review_listing_url(&movie.url)?;

            let mut buffer = Vec::new();
            reviews::extract_reviews(
                &mut self.nav,
                &self.config.selectors,
                &review_url,
                &mut buffer,
            )
            .await?;

            ::log::info!("collected {} reviews for {}", buffer.len(), movie.name);
            bundles.push(MovieReviewBundle::new(movie.name.clone(), buffer));
        }
        Ok(bundles)
    }

    /// Release the rendering session. Safe to call any number of times,
    /// including after a failed extraction step.
    pub async fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.nav.close().await {
            ::log::warn!("failed to close the rendering session: {}", e);
        }
    }
}

/// Review-listing URL for a movie page.
///
/// The listing lives under the movie URL; the URL must parse and is
/// slash-normalised before the suffix is appended.
fn review_listing_url(movie_url: &str) -> Result<String, CrawlError> {
    if Url::parse(movie_url).is_err() {
        return Err(CrawlError::BadMovieUrl(movie_url.to_string()));
    }

    let mut url = movie_url.to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str("reviews/by/activity/");
    Ok(url)
}
