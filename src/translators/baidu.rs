//! Baidu (fanyi.baidu.com) translator implementation.
//!
//! Talks to the endpoints the Baidu translation web page itself uses. Each
//! `v2transapi` request must carry the page's `token` and a `sign` derived
//! from the page's `gtk`; both are scraped from the HTML of the front page.

use super::{TranslationResult, Translator, create_http_client, generate_sign, parse_result};
use crate::config::HttpConfig;
use crate::console::Console;
use crate::error::TranslationError;
use crate::languages::{BAIDU, LanguageTable};
use crate::utils::{check_response_status, retry_with_refresh};
use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::sync::{LazyLock, Mutex, PoisonError};
use url::Url;

/// Regex for the request token embedded in the front page.
static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"token: '(.*?)',").unwrap());

/// Regex for the signing seed embedded in the front page.
static GTK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"window\.gtk = '(.*?)'").unwrap());

/// Credentials scraped from the front page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Credentials {
    token: String,
    gtk: String,
}

impl Credentials {
    /// Extracts token and gtk from the front page HTML.
    fn from_page(html: &str) -> Result<Self, TranslationError> {
        Ok(Self {
            token: capture(&TOKEN_REGEX, html, "token")?,
            gtk: capture(&GTK_REGEX, html, "gtk")?,
        })
    }
}

fn capture(regex: &Regex, html: &str, what: &str) -> Result<String, TranslationError> {
    regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| TranslationError::ParseError(format!("{} not found in page", what)))
}

/// Baidu translator for fanyi.baidu.com.
pub struct BaiduTranslator {
    client: reqwest::Client,
    host: Url,
    headers: HeaderMap,
    max_retry: u32,
    debug: bool,
    languages: &'static LanguageTable,
    credentials: Mutex<Option<Credentials>>,
    console: Console,
}

impl BaiduTranslator {
    /// Creates a new Baidu translator with the given configuration.
    pub fn new(config: &HttpConfig) -> Result<Self, TranslationError> {
        let mut host = Url::parse(&config.host)
            .map_err(|e| TranslationError::InvalidConfig(format!("{}: {}", config.host, e)))?;
        // Endpoints are joined onto the host, which drops a last segment
        // without a trailing slash.
        if !host.path().ends_with('/') {
            let path = format!("{}/", host.path());
            host.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "Accept-Language",
            HeaderValue::from_static(
                "en,zh;q=0.9,en-GB;q=0.8,en-CA;q=0.7,en-AU;q=0.6,en-ZA;q=0.5,en-NZ;q=0.4,en-IN;q=0.3,zh-CN;q=0.2",
            ),
        );
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );

        Ok(Self {
            client: create_http_client(config)?,
            host,
            headers,
            max_retry: config.max_retry,
            debug: config.debug,
            languages: &BAIDU,
            credentials: Mutex::new(None),
            console: Console::new(),
        })
    }

    fn debug(&self, message: &str) {
        if self.debug {
            self.console.debug(&format!("[Baidu] {}", message));
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, TranslationError> {
        self.host
            .join(path)
            .map_err(|e| TranslationError::InvalidConfig(e.to_string()))
    }

    fn cached_credentials(&self) -> Option<Credentials> {
        self.credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_credentials(&self, credentials: Credentials) {
        *self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(credentials);
    }

    /// Maps a language name to a Baidu code.
    fn code_for(&self, lan: &str) -> Result<&'static str, TranslationError> {
        self.languages
            .to_code(lan)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(lan.to_string()))
    }

    /// Fetches the front page and stores the token and gtk it carries.
    async fn fetch_credentials(&self) -> Result<(), TranslationError> {
        let response = self.client.get(self.host.clone()).send().await?;
        let response = check_response_status(response).await?;
        let html = response.text().await?;

        let credentials = Credentials::from_page(&html)?;
        self.debug(&format!("token {} gtk {}", credentials.token, credentials.gtk));
        self.store_credentials(credentials);
        Ok(())
    }

    /// Refreshes token and gtk.
    ///
    /// The page is loaded twice: the first load only sets cookies, and a
    /// token taken from it is rejected with errno 997.
    async fn refresh_credentials(&self) -> Result<(), TranslationError> {
        self.debug("refreshing token");
        self.fetch_credentials().await?;
        self.fetch_credentials().await
    }

    /// Sends one `v2transapi` request with the cached credentials.
    async fn send_translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<TranslationResult, TranslationError> {
        let credentials = self
            .cached_credentials()
            .ok_or_else(|| TranslationError::InvalidConfig("no token".to_string()))?;
        let sign = generate_sign(text, &credentials.gtk);

        let mut url = self.endpoint("v2transapi")?;
        url.query_pairs_mut()
            .append_pair("from", from)
            .append_pair("to", to);

        let form = [
            ("from", from),
            ("to", to),
            ("query", text),
            ("transtype", "realtime"),
            ("simple_means_flag", "3"),
            ("sign", sign.as_str()),
            ("token", credentials.token.as_str()),
            ("domain", "common"),
        ];

        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .form(&form)
            .send()
            .await?;
        let response = check_response_status(response).await?;
        let body: JsonValue = response.json().await?;

        if let Some(err) = backend_error(&body) {
            self.debug(&err.to_string());
            return Err(err);
        }

        parse_result(&body)
    }
}

/// Non-zero `errno` in a response body, typically a stale token.
fn backend_error(body: &JsonValue) -> Option<TranslationError> {
    let errno = body.get("errno").and_then(JsonValue::as_i64)?;
    if errno == 0 {
        return None;
    }

    let message = body
        .get("errmsg")
        .or_else(|| body.get("error"))
        .and_then(JsonValue::as_str)
        .unwrap_or("unknown error")
        .to_string();

    Some(TranslationError::Backend { errno, message })
}

#[async_trait]
impl Translator for BaiduTranslator {
    fn id(&self) -> &'static str {
        "BaiduTranslate"
    }

    fn supported_languages(&self) -> BTreeSet<&'static str> {
        self.languages.languages()
    }

    async fn detect(&self, text: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(self.endpoint("langdetect")?)
            .headers(self.headers.clone())
            .form(&[("query", text)])
            .send()
            .await?;
        let response = check_response_status(response).await?;
        let body: JsonValue = response.json().await?;

        if body.get("msg").and_then(JsonValue::as_str) != Some("success") {
            return Err(TranslationError::ApiError(body.to_string()));
        }

        let code = body
            .get("lan")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| TranslationError::ParseError("missing detected language".to_string()))?;

        self.languages
            .from_code(code)
            .map(str::to_string)
            .ok_or_else(|| TranslationError::UnsupportedLanguage(code.to_string()))
    }

    async fn translate(
        &self,
        text: &str,
        from: &str,
        to: &str,
    ) -> Result<TranslationResult, TranslationError> {
        let from = self.code_for(from)?;
        let to = self.code_for(to)?;

        if self.cached_credentials().is_none() {
            self.refresh_credentials().await?;
        }

        retry_with_refresh(
            self.max_retry,
            move |attempt| {
                if attempt > 0 {
                    self.debug(&format!("resending, attempt {}/{}", attempt, self.max_retry));
                }
                self.send_translate(text, from, to)
            },
            move || self.refresh_credentials(),
        )
        .await
    }
}
