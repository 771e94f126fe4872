use crate::config::Selectors;
use crate::crawlers::navigator::Navigator;
use crate::error::CrawlError;
use crate::records::CatalogueRef;
use crate::renderer::Renderer;

/// Collect catalogue URLs from a search page.
///
/// Loads the search page, triggers the load-more control `repetitions`
/// times, then reads every catalogue link. There is no partial-failure
/// recovery: a missing trigger or an expired load wait aborts discovery.
pub async fn discover<R: Renderer>(
    nav: &mut Navigator<R>,
    selectors: &Selectors,
    search_url: &str,
    repetitions: u32,
) -> Result<Vec<CatalogueRef>, CrawlError> {
    nav.load(search_url).await?;
    nav.load_more_via_button(
        &selectors.load_more_trigger,
        &selectors.catalogue_link,
        repetitions,
    )
    .await?;

    let mut catalogues = Vec::new();
    let links = nav.page().find_all(&selectors.catalogue_link).await?;
    for link in &links {
        if let Some(href) = nav.page().attribute(link, "href").await? {
            catalogues.push(href);
        }
    }

    ::log::info!("discovered {} catalogues on {}", catalogues.len(), search_url);
    Ok(catalogues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timing;
    use crate::renderer::fake::{FakeElement, FakeRenderer};

    fn link(href: &str) -> FakeElement {
        FakeElement::new().with_attr("href", href)
    }

    #[tokio::test]
    async fn discover_returns_links_in_page_order() {
        let mut fake = FakeRenderer::new();
        fake.page("search")
            .put(".list-link", link("https://example.com/list/one/"))
            .put(
                ".load-more-search",
                FakeElement::new().appending_on_click(
                    ".list-link",
                    vec![link("https://example.com/list/two/")],
                ),
            );

        let mut nav = Navigator::new(fake, Timing::fast());
        let catalogues = discover(&mut nav, &Selectors::default(), "search", 1)
            .await
            .unwrap();

        assert_eq!(
            catalogues,
            vec![
                "https://example.com/list/one/".to_string(),
                "https://example.com/list/two/".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn discover_propagates_a_missing_trigger_with_zero_items() {
        let mut fake = FakeRenderer::new();
        fake.page("search")
            .put(".list-link", link("https://example.com/list/one/"));

        let mut nav = Navigator::new(fake, Timing::fast());
        let result = discover(&mut nav, &Selectors::default(), "search", 1).await;

        // The fault surfaces before any link is read
        assert!(matches!(
            result,
            Err(CrawlError::MissingElement { ref selector }) if selector == ".load-more-search"
        ));
    }
}
