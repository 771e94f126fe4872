use crate::error::CrawlError;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};

/// Capability the crawler needs from the rendering engine.
///
/// The crawl logic is generic over this trait: production runs drive a
/// WebDriver session through [`WebPage`], tests drive a scripted in-memory
/// page. Element handles stay opaque to callers.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    type Element: Clone;

    /// Replace the current page state by navigating to `url`
    async fn navigate_to(&mut self, url: &str) -> Result<(), CrawlError>;

    /// Halt any network activity still in flight on the current page
    async fn stop_loading(&mut self) -> Result<(), CrawlError>;

    /// Scroll the document down by a fraction of its full height
    async fn scroll_by(&mut self, fraction: f64) -> Result<(), CrawlError>;

    /// Bring an element into the viewport
    async fn scroll_into_view(&mut self, element: &Self::Element) -> Result<(), CrawlError>;

    /// Click an element
    async fn click(&mut self, element: &Self::Element) -> Result<(), CrawlError>;

    /// All elements currently matching a CSS selector
    async fn find_all(&mut self, selector: &str) -> Result<Vec<Self::Element>, CrawlError>;

    /// First element matching a CSS selector, if any
    async fn find_first(&mut self, selector: &str) -> Result<Option<Self::Element>, CrawlError>;

    /// Value of an attribute on an element, if present
    async fn attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, CrawlError>;

    /// Visible text of an element
    async fn text(&mut self, element: &Self::Element) -> Result<String, CrawlError>;

    /// Whether an element is currently enabled
    async fn is_enabled(&mut self, element: &Self::Element) -> Result<bool, CrawlError>;

    /// End the rendering session. Must be safe to call more than once.
    async fn close(&mut self) -> Result<(), CrawlError>;
}

/// WebDriver-backed renderer over a fantoccini session
pub struct WebPage {
    client: Option<Client>,
}

impl WebPage {
    /// Connect to a WebDriver server, trying common fallback endpoints if the
    /// configured one is not reachable
    pub async fn connect(webdriver_url: &str) -> Result<Self, CrawlError> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("connected to WebDriver at {}", webdriver_url);
                return Ok(Self {
                    client: Some(client),
                });
            }
            Err(e) => {
                ::log::warn!("failed to connect to WebDriver at {}: {}", webdriver_url, e);
            }
        }

        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://127.0.0.1:4444", // geckodriver default, by IP
        ];

        for url in fallback_urls.iter().copied().filter(|u| *u != webdriver_url) {
            ::log::info!("trying fallback WebDriver endpoint {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("connected to WebDriver at {}", url);
                return Ok(Self {
                    client: Some(client),
                });
            }
        }

        Err(CrawlError::Session(format!(
            "no WebDriver server reachable at {} or fallback endpoints",
            webdriver_url
        )))
    }

    fn session(&self) -> Result<&Client, CrawlError> {
        self.client.as_ref().ok_or(CrawlError::RendererClosed)
    }

    fn cmd_err(e: fantoccini::error::CmdError) -> CrawlError {
        CrawlError::Renderer(e.to_string())
    }

    fn element_arg(element: &Element) -> Result<serde_json::Value, CrawlError> {
        serde_json::to_value(element).map_err(|e| CrawlError::Renderer(e.to_string()))
    }
}

impl Renderer for WebPage {
    type Element = Element;

    async fn navigate_to(&mut self, url: &str) -> Result<(), CrawlError> {
        self.session()?.goto(url).await.map_err(Self::cmd_err)
    }

    async fn stop_loading(&mut self) -> Result<(), CrawlError> {
        self.session()?
            .execute("window.stop();", vec![])
            .await
            .map(|_| ())
            .map_err(Self::cmd_err)
    }

    async fn scroll_by(&mut self, fraction: f64) -> Result<(), CrawlError> {
        self.session()?
            .execute(
                "window.scrollTo(0, document.body.scrollHeight * arguments[0]);",
                vec![serde_json::json!(fraction)],
            )
            .await
            .map(|_| ())
            .map_err(Self::cmd_err)
    }

    async fn scroll_into_view(&mut self, element: &Element) -> Result<(), CrawlError> {
        self.session()?
            .execute(
                "arguments[0].scrollIntoView(true);",
                vec![Self::element_arg(element)?],
            )
            .await
            .map(|_| ())
            .map_err(Self::cmd_err)
    }

    async fn click(&mut self, element: &Element) -> Result<(), CrawlError> {
        self.session()?;
        element.click().await.map_err(Self::cmd_err)
    }

    async fn find_all(&mut self, selector: &str) -> Result<Vec<Element>, CrawlError> {
        self.session()?
            .find_all(Locator::Css(selector))
            .await
            .map_err(Self::cmd_err)
    }

    async fn find_first(&mut self, selector: &str) -> Result<Option<Element>, CrawlError> {
        match self.session()?.find(Locator::Css(selector)).await {
            Ok(element) => Ok(Some(element)),
            Err(e) if e.is_no_such_element() => Ok(None),
            Err(e) => Err(Self::cmd_err(e)),
        }
    }

    async fn attribute(
        &mut self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, CrawlError> {
        self.session()?;
        element.attr(name).await.map_err(Self::cmd_err)
    }

    async fn text(&mut self, element: &Element) -> Result<String, CrawlError> {
        self.session()?;
        element.text().await.map_err(Self::cmd_err)
    }

    async fn is_enabled(&mut self, element: &Element) -> Result<bool, CrawlError> {
        self.session()?;
        element.is_enabled().await.map_err(Self::cmd_err)
    }

    async fn close(&mut self) -> Result<(), CrawlError> {
        // Second close is a no-op so shutdown stays idempotent
        match self.client.take() {
            Some(client) => client.close().await.map_err(Self::cmd_err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::Renderer;
    use crate::error::CrawlError;
    use std::cell::Cell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// What clicking a fake element does to the current page
    #[derive(Clone, Debug)]
    pub(crate) enum ClickEffect {
        Noop,
        /// Append elements to a selector bucket on the current page
        Append {
            selector: String,
            items: Vec<FakeElement>,
        },
        /// Simulate an intercepted/failed click
        Reject,
    }

    #[derive(Clone, Debug)]
    pub(crate) struct FakeElement {
        attrs: HashMap<String, String>,
        text: String,
        enabled: bool,
        on_click: ClickEffect,
    }

    impl FakeElement {
        pub(crate) fn new() -> Self {
            Self {
                attrs: HashMap::new(),
                text: String::new(),
                enabled: true,
                on_click: ClickEffect::Noop,
            }
        }

        pub(crate) fn with_attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.insert(name.to_string(), value.to_string());
            self
        }

        pub(crate) fn with_text(mut self, text: &str) -> Self {
            self.text = text.to_string();
            self
        }

        pub(crate) fn disabled(mut self) -> Self {
            self.enabled = false;
            self
        }

        pub(crate) fn rejecting_clicks(mut self) -> Self {
            self.on_click = ClickEffect::Reject;
            self
        }

        pub(crate) fn appending_on_click(
            mut self,
            selector: &str,
            items: Vec<FakeElement>,
        ) -> Self {
            self.on_click = ClickEffect::Append {
                selector: selector.to_string(),
                items,
            };
            self
        }
    }

    #[derive(Default)]
    pub(crate) struct FakePage {
        buckets: HashMap<String, Vec<FakeElement>>,
    }

    impl FakePage {
        pub(crate) fn put(&mut self, selector: &str, element: FakeElement) -> &mut Self {
            self.buckets
                .entry(selector.to_string())
                .or_default()
                .push(element);
            self
        }
    }

    /// Scripted renderer: a set of fake pages keyed by URL
    pub(crate) struct FakeRenderer {
        pages: HashMap<String, FakePage>,
        current: Option<String>,
        closed: bool,
        close_count: Rc<Cell<usize>>,
    }

    impl FakeRenderer {
        pub(crate) fn new() -> Self {
            Self {
                pages: HashMap::new(),
                current: None,
                closed: false,
                close_count: Rc::new(Cell::new(0)),
            }
        }

        /// Page under construction for `url`; created empty if missing
        pub(crate) fn page(&mut self, url: &str) -> &mut FakePage {
            self.pages.entry(url.to_string()).or_default()
        }

        /// Shared counter of close calls, for release assertions
        pub(crate) fn close_count(&self) -> Rc<Cell<usize>> {
            Rc::clone(&self.close_count)
        }

        fn guard(&self) -> Result<(), CrawlError> {
            if self.closed {
                Err(CrawlError::RendererClosed)
            } else {
                Ok(())
            }
        }

        fn current_page(&mut self) -> &mut FakePage {
            let url = self.current.clone().unwrap_or_default();
            self.pages.entry(url).or_default()
        }
    }

    impl Renderer for FakeRenderer {
        type Element = FakeElement;

        async fn navigate_to(&mut self, url: &str) -> Result<(), CrawlError> {
            self.guard()?;
            self.current = Some(url.to_string());
            self.pages.entry(url.to_string()).or_default();
            Ok(())
        }

        async fn stop_loading(&mut self) -> Result<(), CrawlError> {
            self.guard()
        }

        async fn scroll_by(&mut self, _fraction: f64) -> Result<(), CrawlError> {
            self.guard()
        }

        async fn scroll_into_view(&mut self, _element: &FakeElement) -> Result<(), CrawlError> {
            self.guard()
        }

        async fn click(&mut self, element: &FakeElement) -> Result<(), CrawlError> {
            self.guard()?;
            match element.on_click.clone() {
                ClickEffect::Noop => Ok(()),
                ClickEffect::Reject => {
                    Err(CrawlError::Renderer("element click was intercepted".into()))
                }
                ClickEffect::Append { selector, items } => {
                    self.current_page()
                        .buckets
                        .entry(selector)
                        .or_default()
                        .extend(items);
                    Ok(())
                }
            }
        }

        async fn find_all(&mut self, selector: &str) -> Result<Vec<FakeElement>, CrawlError> {
            self.guard()?;
            Ok(self
                .current_page()
                .buckets
                .get(selector)
                .cloned()
                .unwrap_or_default())
        }

        async fn find_first(&mut self, selector: &str) -> Result<Option<FakeElement>, CrawlError> {
            self.guard()?;
            Ok(self
                .current_page()
                .buckets
                .get(selector)
                .and_then(|bucket| bucket.first())
                .cloned())
        }

        async fn attribute(
            &mut self,
            element: &FakeElement,
            name: &str,
        ) -> Result<Option<String>, CrawlError> {
            self.guard()?;
            Ok(element.attrs.get(name).cloned())
        }

        async fn text(&mut self, element: &FakeElement) -> Result<String, CrawlError> {
            self.guard()?;
            Ok(element.text.clone())
        }

        async fn is_enabled(&mut self, element: &FakeElement) -> Result<bool, CrawlError> {
            self.guard()?;
            Ok(element.enabled)
        }

        async fn close(&mut self) -> Result<(), CrawlError> {
            self.close_count.set(self.close_count.get() + 1);
            self.closed = true;
            Ok(())
        }
    }
}
