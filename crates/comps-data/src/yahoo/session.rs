//! Cookie/crumb session handling for Yahoo Finance.
//!
//! Yahoo's unofficial API requires:
//! 1. A session cookie, set by visiting the consent host (`fc.yahoo.com`)
//! 2. A crumb token from `/v1/test/getcrumb`, sent as a query parameter
//!
//! The cookie lives in the client's cookie jar; the crumb is cached here.

use crate::error::{DataError, Result};
use tokio::sync::Mutex;
use tracing::debug;

const REFERER: &str = "https://finance.yahoo.com/";

/// Base URLs for the Yahoo Finance hosts.
///
/// Overridable so the client can be pointed at a local mock server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooEndpoints {
    /// Host that sets the session cookie
    pub cookie: String,
    /// Primary API host
    pub query1: String,
    /// Secondary API host
    pub query2: String,
}

impl YahooEndpoints {
    /// Route every host to the same base URL.
    pub fn single(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            cookie: base.clone(),
            query1: base.clone(),
            query2: base,
        }
    }
}

impl Default for YahooEndpoints {
    fn default() -> Self {
        Self {
            cookie: "https://fc.yahoo.com".to_string(),
            query1: "https://query1.finance.yahoo.com".to_string(),
            query2: "https://query2.finance.yahoo.com".to_string(),
        }
    }
}

/// Cached crumb for one provider instance.
#[derive(Debug, Default)]
pub(crate) struct YahooSession {
    crumb: Mutex<Option<String>>,
}

impl YahooSession {
    /// Current crumb, performing the cookie/crumb handshake if needed.
    pub(crate) async fn crumb(
        &self,
        client: &reqwest::Client,
        endpoints: &YahooEndpoints,
    ) -> Result<String> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        let crumb = Self::handshake(client, endpoints).await?;
        *cached = Some(crumb.clone());
        Ok(crumb)
    }

    /// Drop the cached crumb so the next call performs a fresh handshake.
    pub(crate) async fn invalidate(&self) {
        *self.crumb.lock().await = None;
    }

    async fn handshake(client: &reqwest::Client, endpoints: &YahooEndpoints) -> Result<String> {
        // The consent host answers 404 but still sets the cookie.
        client
            .get(&endpoints.cookie)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await
            .map_err(|e| DataError::Auth(format!("failed to fetch Yahoo cookie: {e}")))?;

        for host in [&endpoints.query1, &endpoints.query2] {
            let url = format!("{host}/v1/test/getcrumb");
            let response = match client
                .get(&url)
                .header(reqwest::header::REFERER, REFERER)
                .send()
                .await
            {
                Ok(response) if response.status().is_success() => response,
                Ok(response) => {
                    debug!(url = %url, status = %response.status(), "crumb request rejected");
                    continue;
                }
                Err(e) => {
                    debug!(url = %url, error = %e, "crumb request failed");
                    continue;
                }
            };

            let body = response.text().await?;
            let body = body.trim();

            if body.to_lowercase().contains("too many requests") {
                return Err(DataError::Auth(
                    "Yahoo rate limited while fetching crumb".to_string(),
                ));
            }
            if is_valid_crumb(body) {
                return Ok(body.to_string());
            }
            debug!(url = %url, "crumb response was not a token");
        }

        Err(DataError::Auth(
            "failed to fetch Yahoo crumb from all endpoints".to_string(),
        ))
    }
}

/// A crumb is a short token: no markup, no whitespace.
fn is_valid_crumb(body: &str) -> bool {
    !body.is_empty()
        && body.len() < 100
        && !body.contains(char::is_whitespace)
        && !body.contains("<html")
        && !body.contains("<!DOCTYPE")
}
