//! Minimal client for the Telegraph publishing API.

use std::time::Duration;

use quill_shared::api::TelegraphAccount;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Public host serving published pages.
const PAGE_BASE_URL: &str = "https://telegra.ph";

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Telegraph API error: {0}")]
    Api(String),

    #[error("Network or API error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Page submitted to `createPage`. `content` is HTML.
#[derive(Debug, Serialize)]
pub struct PageRequest<'a> {
    pub access_token: &'a str,
    pub title: &'a str,
    pub author_name: &'a str,
    pub author_url: &'a str,
    pub content: &'a str,
    pub return_content: bool,
}

/// Every Telegraph response is `{ok, result?, error?}`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    ok: bool,
    result: Option<T>,
    error: Option<String>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<T, PublishError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(PublishError::Api(
                self.error.unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Page {
    path: String,
}

#[derive(Debug, Deserialize)]
struct Account {
    short_name: String,
    #[serde(default)]
    author_name: Option<String>,
    access_token: String,
}

#[derive(Clone)]
pub struct TelegraphClient {
    client: Client,
    base_url: String,
}

impl TelegraphClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Publish a page and return its public URL.
    pub async fn create_page(&self, page: &PageRequest<'_>) -> Result<String, PublishError> {
        let url = format!("{}/createPage", self.base_url);

        let envelope: Envelope<Page> = self
            .client
            .post(&url)
            .json(page)
            .send()
            .await?
            .json()
            .await?;

        let page = envelope.into_result()?;
        Ok(format!("{}/{}", PAGE_BASE_URL, page.path))
    }

    pub async fn create_account(&self, short_name: &str) -> Result<TelegraphAccount, PublishError> {
        let url = format!("{}/createAccount", self.base_url);

        let envelope: Envelope<Account> = self
            .client
            .get(&url)
            .query(&[("short_name", short_name)])
            .send()
            .await?
            .json()
            .await?;

        let account = envelope.into_result()?;
        Ok(TelegraphAccount {
            short_name: account.short_name,
            author_name: account.author_name.filter(|name| !name.is_empty()),
            access_token: account.access_token,
        })
    }
}
