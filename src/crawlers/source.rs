use crate::config::{Backend, CrawlerConfig};
use crate::error::FetchError;
use fantoccini::{Client, ClientBuilder};
use std::future::Future;
use tokio::sync::OnceCell;
use url::Url;

/// Where profile pages and portraits come from
pub trait PageSource {
    /// Retrieve the markup of a page
    fn fetch_markup(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>>;

    /// Retrieve a binary resource
    fn fetch_bytes(&self, url: &Url) -> impl Future<Output = Result<Vec<u8>, FetchError>>;
}

/// Plain HTTP source
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageSource for HttpSource {
    async fn fetch_markup(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            // Profiles without a portrait are common; keep the record
            ::log::warn!("{} returned status {}, storing no image", url, status.as_u16());
            return Ok(Vec::new());
        }
        Ok(response.bytes().await?.to_vec())
    }
}

/// Source that renders markup in a WebDriver session.
///
/// Binary resources are still fetched over plain HTTP.
#[derive(Debug)]
pub struct WebDriverSource {
    webdriver_url: String,
    client: OnceCell<Client>,
    http: HttpSource,
}

impl WebDriverSource {
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            client: OnceCell::new(),
            http: HttpSource::new(),
        }
    }

    /// Connects to the WebDriver instance on first use
    async fn client(&self) -> Result<&Client, FetchError> {
        self.client
            .get_or_try_init(|| async move {
                let client = ClientBuilder::native().connect(&self.webdriver_url).await?;
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                Ok::<_, FetchError>(client)
            })
            .await
    }

    /// Ends the WebDriver session if one was opened
    pub async fn close(self) {
        if let Some(client) = self.client.into_inner() {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver client: {}", e);
            }
        }
    }
}

impl PageSource for WebDriverSource {
    async fn fetch_markup(&self, url: &Url) -> Result<String, FetchError> {
        let client = self.client().await?;
        client.goto(url.as_str()).await?;
        Ok(client.source().await?)
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.http.fetch_bytes(url).await
    }
}

/// Source selected by configuration
#[derive(Debug)]
pub enum Source {
    Http(HttpSource),
    WebDriver(WebDriverSource),
}

impl Source {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        match config.backend {
            Backend::Http => Source::Http(HttpSource::new()),
            Backend::WebDriver => Source::WebDriver(WebDriverSource::new(&config.webdriver_url)),
        }
    }

    /// Releases backend resources
    pub async fn close(self) {
        if let Source::WebDriver(source) = self {
            source.close().await;
        }
    }
}

impl PageSource for Source {
    async fn fetch_markup(&self, url: &Url) -> Result<String, FetchError> {
        match self {
            Source::Http(source) => source.fetch_markup(url).await,
            Source::WebDriver(source) => source.fetch_markup(url).await,
        }
    }

    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        match self {
            Source::Http(source) => source.fetch_bytes(url).await,
            Source::WebDriver(source) => source.fetch_bytes(url).await,
        }
    }
}
