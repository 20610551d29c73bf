//! Web-session authentication
//!
//! The service's web login is cookie-based: a CSRF token is embedded in the
//! login form, the login POST sets session cookies, and the post-login
//! redirect page embeds an `initData` JSON blob describing every base and
//! table the account can see. The login endpoint answers 200 either way, so
//! the redirect marker in the response body is the only success signal.

use regex::Regex;
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};

/// Body substring that marks a successful login
const LOGIN_SUCCESS_MARKER: &str = "redirectAfterSuccessfulLogin";

/// Hidden-input CSRF token on the login form
const CSRF_PATTERN: &str = r#"name="_csrf"\s*value="([^"]+)""#;

/// `initData` assignment on the post-login redirect page; the capture runs
/// from the first `{` to the last `}` on the assignment's line
const INIT_DATA_PATTERN: &str = r"initData.+?(\{.*\})";

/// An authenticated web session
///
/// Owns the cookie-bearing HTTP client and the `initData` blob captured at
/// login. Read-only after construction; clones share the underlying client
/// and cookie jar.
#[derive(Clone, Debug)]
pub struct Session {
    client: reqwest::Client,
    web_base_url: String,
    init_data: Value,
}

impl Session {
    /// Log in to the web front end and capture the account's `initData`.
    ///
    /// Three requests: GET the login form and extract its CSRF token, POST
    /// the credentials, then GET the post-login redirect target whose HTML
    /// embeds `initData`. Session cookies accumulate in the client as a
    /// side effect and authenticate every later call made through
    /// [`Session::get_page`].
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the login form carries no CSRF token or the
    /// redirect page carries no `initData`; [`Error::Authentication`] if
    /// the login response body lacks the success marker.
    pub async fn login(config: &Config, email: &str, password: &str) -> Result<Self> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        let web_base_url = config.web_base_url.trim_end_matches('/').to_string();

        let login_form = client
            .get(format!("{web_base_url}/login"))
            .send()
            .await?
            .text()
            .await?;
        let csrf = capture(CSRF_PATTERN, &login_form)?.ok_or(Error::Parse { what: "CSRF token" })?;

        let login_body = client
            .post(format!("{web_base_url}/auth/login"))
            .json(&serde_json::json!({
                "_csrf": csrf,
                "email": email,
                "password": password,
            }))
            .send()
            .await?
            .text()
            .await?;
        if !login_body.contains(LOGIN_SUCCESS_MARKER) {
            return Err(Error::Authentication);
        }

        let app_page = client
            .get(format!("{web_base_url}/auth/{LOGIN_SUCCESS_MARKER}"))
            .send()
            .await?
            .text()
            .await?;
        let init_data = capture(INIT_DATA_PATTERN, &app_page)?
            .ok_or(Error::Parse { what: "embedded initData" })?;
        let init_data: Value = serde_json::from_str(&init_data)?;

        tracing::debug!(email, "Web session established");

        Ok(Self {
            client,
            web_base_url,
            init_data,
        })
    }

    /// The `initData` blob captured at login
    pub fn init_data(&self) -> &Value {
        &self.init_data
    }

    /// Fetch an HTML page under the web base URL with the session cookies.
    pub(crate) async fn get_page(&self, path: &str) -> Result<String> {
        let body = self
            .client
            .get(format!("{}/{}", self.web_base_url, path))
            .send()
            .await?
            .text()
            .await?;
        Ok(body)
    }
}

/// First capture group of `pattern` in `haystack`, if any.
pub(crate) fn capture(pattern: &str, haystack: &str) -> Result<Option<String>> {
    let re = Regex::new(pattern)?;
    Ok(re
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string()))
}
