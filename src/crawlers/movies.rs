use crate::config::Selectors;
use crate::crawlers::navigator::Navigator;
use crate::error::CrawlError;
use crate::parsers::TileParser;
use crate::records::MovieRecord;
use crate::renderer::Renderer;

/// Extract movie records from a catalogue and all of its following pages.
///
/// Tiles whose title text does not parse are skipped silently; duplicates
/// across page boundaries are kept as-is. Appends to `out` in page order.
pub async fn extract_from_catalogue<R: Renderer>(
    nav: &mut Navigator<R>,
    selectors: &Selectors,
    parser: &TileParser,
    catalogue_url: &str,
    out: &mut Vec<MovieRecord>,
) -> Result<(), CrawlError> {
    let mut url = catalogue_url.to_string();
    loop {
        nav.load(&url).await?;
        nav.reveal_more().await?;

        let tiles = nav.page().find_all(&selectors.movie_tile).await?;
        for tile in &tiles {
            let href = nav.page().attribute(tile, "href").await?;
            let title = nav
                .page()
                .attribute(tile, &selectors.tile_title_attribute)
                .await?;

            if let (Some(href), Some(title)) = (href, title) {
                if let Some(info) = parser.parse(&title) {
                    ::log::info!("found movie: {}", info.name);
                    out.push(info.into_record(href));
                }
            }
        }

        match nav.next_page_url(&selectors.next_control).await? {
            Some(next) => url = next,
            None => break,
        }
    }
    Ok(())
}
