use reqwest::{header::COOKIE, Response, StatusCode};
use serde_json::Value;

use crate::dataset::{Country, LeaderRecord};
use crate::session::{Credential, Session};
use crate::{info_time, warn_time, Error, Result, COUNTRIES_PATH, LEADERS_PATH};

/// Leaders of one country together with the status of the response they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadersResponse {
    pub leaders: Vec<LeaderRecord>,
    pub status: StatusCode,
    /// Whether the first attempt was rejected and the cookie had to be refreshed.
    pub refreshed: bool,
}

/// Requests the list of country identifiers with the current credential.
pub async fn fetch_countries(session: &mut Session) -> Result<Vec<Country>> {
    let credential = session.credential().await?;
    let url = session.endpoint(COUNTRIES_PATH);
    let res = session
        .client()
        .get(&url)
        .header(COOKIE, credential.header_value()?)
        .send()
        .await?
        .error_for_status()?;

    let body: Value = res.json().await?;
    let Value::Array(items) = body else {
        return Err(unexpected(&url, "expected a JSON array of countries"));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(country) => Ok(country),
            other => Err(unexpected(&url, format!("country is not a string: {other}"))),
        })
        .collect()
}

/// Requests the leaders of `country`.
/// A non-success answer is taken as an expired cookie: the credential is refreshed and the
/// request issued exactly once more. If that second answer is not a success either the
/// country fails with `Error::CredentialRejected` instead of passing the error body on as data.
pub async fn fetch_leaders_for_country(
    session: &mut Session,
    country: &str,
) -> Result<LeadersResponse> {
    let credential = session.credential().await?;
    let res = request_leaders(session, country, &credential).await?;
    if res.status().is_success() {
        let status = res.status();
        let leaders = parse_leaders(res).await?;
        return Ok(LeadersResponse { leaders, status, refreshed: false });
    }

    warn_time!("Leaders of '{}' answered {}, cookie probably expired", country, res.status());
    let credential = session.refresh_credential().await?;
    let res = request_leaders(session, country, &credential).await?;
    let status = res.status();
    if !status.is_success() {
        return Err(Error::CredentialRejected { country: country.to_string(), status });
    }
    info_time!("Leaders of '{}' fetched with a fresh cookie", country);

    let leaders = parse_leaders(res).await?;
    Ok(LeadersResponse { leaders, status, refreshed: true })
}

async fn request_leaders(
    session: &Session,
    country: &str,
    credential: &Credential,
) -> Result<Response> {
    let res = session
        .client()
        .get(session.endpoint(LEADERS_PATH))
        .query(&[("country", country)])
        .header(COOKIE, credential.header_value()?)
        .send()
        .await?;
    Ok(res)
}

async fn parse_leaders(res: Response) -> Result<Vec<LeaderRecord>> {
    let url = res.url().to_string();
    let body: Value = res.json().await?;
    let Value::Array(items) = body else {
        return Err(unexpected(&url, "expected a JSON array of leaders"));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(fields) => Ok(LeaderRecord::new(fields)),
            other => Err(unexpected(&url, format!("leader is not an object: {other}"))),
        })
        .collect()
}

fn unexpected(url: &str, reason: impl Into<String>) -> Error {
    Error::UnexpectedPayload { url: url.to_string(), reason: reason.into() }
}
