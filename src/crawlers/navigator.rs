use crate::config::Timing;
use crate::error::CrawlError;
use crate::renderer::Renderer;
use crate::wait;
use tokio::time::sleep;

/// Page-transition primitives shared by every extractor.
///
/// Pagination runs through [`Navigator::next_page_url`]: each listing loop
/// stays in HAS_NEXT while the probe keeps yielding a URL and terminates on
/// NO_NEXT (`Ok(None)`). The loop lives in the extractors, never as
/// recursion, so deep catalogues cannot grow the call stack.
pub struct Navigator<R: Renderer> {
    page: R,
    timing: Timing,
}

impl<R: Renderer> Navigator<R> {
    pub fn new(page: R, timing: Timing) -> Self {
        Self { page, timing }
    }

    /// Direct access to the rendered page, for element reads
    pub fn page(&mut self) -> &mut R {
        &mut self.page
    }

    /// Timing budgets in effect for this navigator
    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// Navigate to `url`, give scripts a bounded settle time, then halt any
    /// remaining network activity.
    ///
    /// There is no DOM-ready signal on the target site; the page counts as
    /// rendered once the settle budget has passed.
    pub async fn load(&mut self, url: &str) -> Result<(), CrawlError> {
        ::log::debug!("loading {}", url);
        self.page.navigate_to(url).await?;
        sleep(self.timing.settle()).await;
        self.page.stop_loading().await
    }

    /// Scroll partway down the document, pausing so lazy-loaded tiles can
    /// populate before they are read.
    pub async fn reveal_more(&mut self) -> Result<(), CrawlError> {
        sleep(self.timing.pause()).await;
        self.page.scroll_by(0.5).await?;
        sleep(self.timing.pause()).await;
        Ok(())
    }

    /// Click the load-more control `repetitions` times, blocking after each
    /// click until the `item_selector` count has grown.
    ///
    /// A missing trigger or an expired count wait is an extraction fault and
    /// propagates to the caller uncaught.
    pub async fn load_more_via_button(
        &mut self,
        trigger_selector: &str,
        item_selector: &str,
        repetitions: u32,
    ) -> Result<(), CrawlError> {
        for _ in 0..repetitions {
            let baseline = self.page.find_all(item_selector).await?.len();

            let trigger = self.page.find_first(trigger_selector).await?.ok_or_else(|| {
                CrawlError::MissingElement {
                    selector: trigger_selector.to_string(),
                }
            })?;
            self.page.scroll_into_view(&trigger).await?;
            self.page.click(&trigger).await?;

            wait::element_count_above(
                &mut self.page,
                item_selector,
                baseline,
                self.timing.load_more_timeout(),
                self.timing.poll(),
            )
            .await?;
        }
        Ok(())
    }

    /// Probe for an enabled next-page control and read its target URL.
    ///
    /// `Ok(None)` is the designed terminal state: the control never became
    /// clickable within the (short) probe budget, so pagination is done. Only
    /// renderer failures are errors here.
    pub async fn next_page_url(&mut self, next_selector: &str) -> Result<Option<String>, CrawlError> {
        let probe = wait::clickable(
            &mut self.page,
            next_selector,
            self.timing.next_timeout(),
            self.timing.poll(),
        )
        .await;

        match probe {
            Ok(control) => match self.page.attribute(&control, "href").await? {
                Some(href) => {
                    ::log::info!("navigating to the next page: {}", href);
                    Ok(Some(href))
                }
                None => {
                    ::log::debug!("next control `{}` has no target", next_selector);
                    Ok(None)
                }
            },
            Err(e) if e.is_wait_timeout() => {
                ::log::info!("no more pages to load");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Release the rendering session
    pub async fn close(&mut self) -> Result<(), CrawlError> {
        self.page.close().await
    }
}
