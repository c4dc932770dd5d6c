/// Browser automation seam for the chapter scraper
use crate::config::BrowserConfig;
use crate::error::Result;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// One live browser session. Every element lookup waits up to the
/// session's timeout before failing.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate to a URL
    async fn open(&mut self, url: &str) -> Result<()>;

    /// Wait for an element to become clickable, then click it
    async fn click(&mut self, xpath: &str) -> Result<()>;

    /// Wait for at least one match, then return the text of every match
    async fn texts(&mut self, xpath: &str) -> Result<Vec<String>>;

    /// Whether the control exists and can be clicked right now. Absence is
    /// `Ok(false)`, not an error.
    async fn can_activate(&mut self, xpath: &str) -> Result<bool>;

    /// End the session and release the browser
    async fn quit(&mut self) -> Result<()>;
}

/// Opens fresh browser sessions
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>>;
}

/// Launches sessions on a WebDriver server (chromedriver, geckodriver,
/// selenium) with `fantoccini`.
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    webdriver_url: String,
    headless: bool,
    wait_timeout: Duration,
}

impl WebDriverLauncher {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            wait_timeout: Duration::from_secs(config.wait_timeout_seconds),
        }
    }

    fn capabilities(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();
        if self.headless {
            caps.insert(
                "goog:chromeOptions".to_string(),
                json!({ "args": ["--headless=new", "--window-size=1920,1080"] }),
            );
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({ "args": ["-headless"] }),
            );
        }
        caps
    }
}

#[async_trait]
impl BrowserLauncher for WebDriverLauncher {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>> {
        info!("Initializing WebDriver session...");

        let mut builder = ClientBuilder::native();
        builder.capabilities(self.capabilities());
        let client = builder.connect(&self.webdriver_url).await?;

        if !self.headless {
            if let Err(e) = client.maximize_window().await {
                debug!("Could not maximize browser window: {}", e);
            }
        }

        info!("WebDriver session initialized successfully!");
        Ok(Box::new(WebDriverSession {
            client,
            wait_timeout: self.wait_timeout,
        }))
    }
}

struct WebDriverSession {
    client: Client,
    wait_timeout: Duration,
}

const CLICKABLE_POLL: Duration = Duration::from_millis(250);

impl WebDriverSession {
    async fn wait_for(&self, xpath: &str) -> std::result::Result<Element, CmdError> {
        self.client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(Locator::XPath(xpath))
            .await
    }

    /// Wait until the element is present, displayed and enabled. A control
    /// that is still animating in is polled until the timeout runs out.
    async fn wait_clickable(&self, xpath: &str) -> std::result::Result<Element, CmdError> {
        let deadline = Instant::now() + self.wait_timeout;
        self.wait_for(xpath).await?;
        loop {
            // the carousel may re-render the control between polls
            match self.client.find(Locator::XPath(xpath)).await {
                Ok(element) => {
                    if element.is_displayed().await? && element.is_enabled().await? {
                        return Ok(element);
                    }
                }
                Err(e) if e.is_no_such_element() => {}
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(CmdError::WaitTimeout);
            }
            tokio::time::sleep(CLICKABLE_POLL).await;
        }
    }
}

/// An absent or never-clickable control is a normal answer, not an error.
fn clickable_or_absent<T>(waited: std::result::Result<T, CmdError>) -> Result<bool> {
    match waited {
        Ok(_) => Ok(true),
        Err(CmdError::WaitTimeout) => Ok(false),
        Err(e) if e.is_no_such_element() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn open(&mut self, url: &str) -> Result<()> {
        self.client.goto(url).await?;
        Ok(())
    }

    async fn click(&mut self, xpath: &str) -> Result<()> {
        let element = self.wait_clickable(xpath).await?;
        element.click().await?;
        Ok(())
    }

    async fn texts(&mut self, xpath: &str) -> Result<Vec<String>> {
        self.wait_for(xpath).await?;

        let elements = self.client.find_all(Locator::XPath(xpath)).await?;
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            texts.push(element.text().await?);
        }
        Ok(texts)
    }

    async fn can_activate(&mut self, xpath: &str) -> Result<bool> {
        clickable_or_absent(self.wait_clickable(xpath).await)
    }

    async fn quit(&mut self) -> Result<()> {
        self.client.clone().close().await?;
        info!("WebDriver session closed successfully!");
        Ok(())
    }
}
