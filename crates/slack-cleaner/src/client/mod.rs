use crate::error::{ApiError, Error, HttpApiError};
use crate::resources::files::Files;
use crate::types::shared::envelope;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client as HttpClient, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

pub const DEFAULT_BASE_URL: &str = "https://slack.com/api/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const QUERY_TOKEN: &str = "token";

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub token: String,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl ClientOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: None,
            timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct SlackClient {
    pub files: Files,
}

impl SlackClient {
    pub fn new(options: ClientOptions) -> Result<Self, Error> {
        let inner = Arc::new(Inner::new(options)?);
        Ok(Self {
            files: Files::new(inner),
        })
    }
}

pub(crate) struct Inner {
    http: HttpClient,
    base_url: Url,
    timeout: Duration,
    token: String,
}

impl Inner {
    fn new(options: ClientOptions) -> Result<Self, Error> {
        if options.token.is_empty() {
            return Err(Error::MissingCredential);
        }

        let base_url_str = options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        // A base without a trailing slash would have its last segment replaced by `join`.
        let base_url = if base_url_str.ends_with('/') {
            Url::parse(base_url_str)?
        } else {
            Url::parse(&format!("{base_url_str}/"))?
        };

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("slack-cleaner/{}", env!("CARGO_PKG_VERSION")))?,
        );
        let http = HttpClient::builder()
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            timeout: options.timeout.unwrap_or(DEFAULT_TIMEOUT),
            token: options.token,
        })
    }

    pub fn build_url(&self, method_name: &str, query: &[(&str, String)]) -> Result<Url, Error> {
        let mut url = self.base_url.join(method_name.trim_start_matches('/'))?;
        {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query {
                qp.append_pair(k, v);
            }
            qp.append_pair(QUERY_TOKEN, &self.token);
        }
        Ok(url)
    }

    /// Sends one request and decodes the JSON body.
    ///
    /// Non-2xx statuses and `"ok": false` envelopes both come back as errors.
    pub async fn request_json<T>(
        &self,
        method: Method,
        method_name: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(method_name, query)?;
        trace!(%method, endpoint = method_name, "sending request");

        let req = self.http.request(method, url);
        let resp = match tokio::time::timeout(self.timeout, req.send()).await {
            Err(_) => return Err(Error::Timeout),
            Ok(Err(err)) if err.is_timeout() => return Err(Error::Timeout),
            Ok(Err(err)) => return Err(Error::Transport(err)),
            Ok(Ok(resp)) => resp,
        };

        let status = resp.status();
        if !status.is_success() {
            let body_bytes = tokio::time::timeout(self.timeout, resp.bytes())
                .await
                .map_err(|_| Error::Timeout)?
                .unwrap_or_default();
            let json = serde_json::from_slice::<Value>(&body_bytes).ok();
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            let message = extract_error_message(json.as_ref(), &text);
            let api_err = ApiError::new(Some(status), json, message);
            return Err(Error::Http(HttpApiError::from_status(Some(status), api_err)));
        }

        let bytes = match tokio::time::timeout(self.timeout, resp.bytes()).await {
            Err(_) => return Err(Error::Timeout),
            Ok(bytes) => bytes?,
        };
        let json = serde_json::from_slice::<Value>(&bytes)?;

        if let Some(message) = envelope::error_message(&json) {
            return Err(Error::Api(ApiError::new(Some(status), Some(json), Some(message))));
        }
        if let Some(warning) = envelope::warning(&json) {
            trace!(endpoint = method_name, warning = %warning, "Slack API warning");
        }

        Ok(serde_json::from_value::<T>(json)?)
    }
}

fn extract_error_message(json: Option<&Value>, fallback_text: &str) -> Option<String> {
    let json_msg = json
        .and_then(|v| v.as_object())
        .and_then(|obj| obj.get("error"))
        .and_then(|e| e.as_str())
        .map(|s| s.to_string())
        .or_else(|| {
            json.and_then(|v| v.as_object())
                .and_then(|obj| obj.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        });

    if json_msg.is_some() {
        return json_msg;
    }
    if fallback_text.is_empty() {
        return None;
    }
    Some(fallback_text.to_string())
}
