use crate::config::Selectors;
use crate::crawlers::navigator::Navigator;
use crate::error::CrawlError;
use crate::renderer::Renderer;
use tokio::time::sleep;

/// Collect review bodies from a review listing and all of its following
/// pages, appending to `out` in page order.
pub async fn extract_reviews<R: Renderer>(
    nav: &mut Navigator<R>,
    selectors: &Selectors,
    review_url: &str,
    out: &mut Vec<String>,
) -> Result<(), CrawlError> {
    let mut url = review_url.to_string();
    loop {
        nav.load(&url).await?;
        expand_truncated_reviews(nav, selectors).await?;

        let bodies = nav.page().find_all(&selectors.review_body).await?;
        for body in &bodies {
            out.push(nav.page().text(body).await?);
        }

        match nav.next_page_url(&selectors.next_control).await? {
            Some(next) => url = next,
            None => break,
        }
    }
    Ok(())
}

/// Click every "reveal full text" control on the current page.
///
/// A control that fails to expand is logged and skipped; one broken review
/// must not abort collection of the rest of the page.
async fn expand_truncated_reviews<R: Renderer>(
    nav: &mut Navigator<R>,
    selectors: &Selectors,
) -> Result<(), CrawlError> {
    let toggles = nav.page().find_all(&selectors.review_expander).await?;
    for toggle in &toggles {
        if let Err(e) = expand_one(nav, toggle).await {
            ::log::warn!("skipping review that failed to expand: {}", e);
        }
    }
    Ok(())
}

async fn expand_one<R: Renderer>(
    nav: &mut Navigator<R>,
    toggle: &R::Element,
) -> Result<(), CrawlError> {
    nav.page().scroll_into_view(toggle).await?;
    nav.page().click(toggle).await?;
    sleep(nav.timing().pause()).await;
    Ok(())
}
