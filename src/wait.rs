use crate::error::CrawlError;
use crate::renderer::Renderer;
use std::time::Duration;
use tokio::time::{Instant, sleep};

/// Block until `selector` matches more than `baseline` elements.
///
/// Polls the rendered DOM every `poll` interval; expiry of `timeout` is an
/// extraction fault here, not a terminal state.
pub async fn element_count_above<R: Renderer>(
    page: &mut R,
    selector: &str,
    baseline: usize,
    timeout: Duration,
    poll: Duration,
) -> Result<(), CrawlError> {
    let deadline = Instant::now() + timeout;
    loop {
        if page.find_all(selector).await?.len() > baseline {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(CrawlError::WaitTimeout {
                what: format!("more than {} `{}` elements", baseline, selector),
                waited: timeout,
            });
        }
        sleep(poll).await;
    }
}

/// Block until an enabled element matches `selector`, returning it.
///
/// Callers decide whether expiry is a fault: for the next-page probe it is
/// the designed "no more pages" signal.
pub async fn clickable<R: Renderer>(
    page: &mut R,
    selector: &str,
    timeout: Duration,
    poll: Duration,
) -> Result<R::Element, CrawlError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(element) = page.find_first(selector).await? {
            if page.is_enabled(&element).await? {
                return Ok(element);
            }
        }
        if Instant::now() >= deadline {
            return Err(CrawlError::WaitTimeout {
                what: format!("clickable `{}`", selector),
                waited: timeout,
            });
        }
        sleep(poll).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::fake::{FakeElement, FakeRenderer};

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[tokio::test]
    async fn count_wait_passes_once_threshold_is_crossed() {
        let mut page = FakeRenderer::new();
        page.page("page").put(".item", FakeElement::new());
        page.navigate_to("page").await.unwrap();

        // One element already present: above baseline 0, not above baseline 1
        let ok = element_count_above(&mut page, ".item", 0, millis(50), millis(5)).await;
        assert!(ok.is_ok());

        let err = element_count_above(&mut page, ".item", 1, millis(50), millis(5))
            .await
            .unwrap_err();
        assert!(err.is_wait_timeout());
    }

    #[tokio::test]
    async fn clickable_wait_skips_disabled_elements() {
        let mut page = FakeRenderer::new();
        page.page("page").put(".next", FakeElement::new().disabled());
        page.navigate_to("page").await.unwrap();

        let err = clickable(&mut page, ".next", millis(50), millis(5))
            .await
            .unwrap_err();
        assert!(err.is_wait_timeout());
    }

    #[tokio::test]
    async fn clickable_wait_returns_enabled_element() {
        let mut page = FakeRenderer::new();
        page.page("page")
            .put(".next", FakeElement::new().with_attr("href", "page2"));
        page.navigate_to("page").await.unwrap();

        let element = clickable(&mut page, ".next", millis(50), millis(5))
            .await
            .unwrap();
        let href = page.attribute(&element, "href").await.unwrap();
        assert_eq!(href.as_deref(), Some("page2"));
    }
}
