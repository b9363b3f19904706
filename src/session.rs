use reqwest::{header::HeaderValue, Client};

use crate::{info_time, Error, Result, COOKIE_PATH};

/// Cookies handed out by the API's cookie endpoint.
/// Replaced as a whole on refresh, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    cookies: Vec<(String, String)>,
}

impl Credential {
    pub fn new(cookies: Vec<(String, String)>) -> Self {
        Self { cookies }
    }

    pub fn cookies(&self) -> &[(String, String)] {
        &self.cookies
    }

    /// Renders the credential as a `Cookie` request header value.
    pub fn header_value(&self) -> Result<HeaderValue> {
        let joined = self
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&joined).map_err(|e| Error::UnexpectedPayload {
            url: COOKIE_PATH.into(),
            reason: format!("cookie is not a valid header value: {e}"),
        })
    }
}

/// Owns the HTTP client and the API credential for one run.
/// Passed by `&mut` to everything that talks to the network.
#[derive(Debug)]
pub struct Session {
    client: Client,
    base_url: String,
    credential: Option<Credential>,
    refreshes: usize,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client uses Arc internally, so sharing one across API and encyclopedia hosts is cheap.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            credential: None,
            refreshes: 0,
        }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` joined with an API path such as `/countries`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Number of times the credential was replaced after the first fetch.
    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    /// Returns the held credential, fetching one first if there is none yet.
    pub async fn credential(&mut self) -> Result<Credential> {
        match &self.credential {
            Some(credential) => Ok(credential.clone()),
            None => self.fetch_credential().await,
        }
    }

    /// Unconditionally fetches a new credential and drops the old one.
    pub async fn refresh_credential(&mut self) -> Result<Credential> {
        info_time!("Refreshing API cookie");
        let credential = self.fetch_credential().await?;
        self.refreshes += 1;
        Ok(credential)
    }

    async fn fetch_credential(&mut self) -> Result<Credential> {
        let url = self.endpoint(COOKIE_PATH);
        let res = self.client.get(&url).send().await?.error_for_status()?;

        let cookies = res
            .cookies()
            .map(|c| (c.name().to_string(), c.value().to_string()))
            .collect::<Vec<_>>();
        if cookies.is_empty() {
            return Err(Error::MissingCookie(url));
        }

        let credential = Credential::new(cookies);
        self.credential = Some(credential.clone());
        Ok(credential)
    }
}
