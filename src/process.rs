use chrono::Local;

use crate::config::{Config, FailurePolicy};
use crate::dataset::{Dataset, LeaderRecord};
use crate::output::{write_dataset, Verification};
use crate::parse::extract_first_paragraph;
use crate::request::{fetch_countries, fetch_leaders_for_country};
use crate::session::Session;
use crate::{info_time, warn_time, Error, Result, REFERENCE_URL_FIELD};

/// Runs the whole pipeline: fetch, enrich, then write and verify the output file once.
pub async fn process_site(config: &Config) -> Result<Verification> {
    let start_time = Local::now();
    info_time!("Started scraping {}", config.base_url);

    let mut session = Session::new(config.base_url.as_str());
    let dataset = collect_dataset(&mut session, config.policy).await?;
    info_time!(
        start_time,
        "Finished scraping {} leaders from {} countries ({} cookie refreshes).",
        dataset.leader_count(),
        dataset.country_count(),
        session.refreshes()
    );

    write_dataset(&dataset, config.format, &config.output)
}

/// Fetches every country and its leaders, one request at a time, and attaches biographies.
/// Nothing is written here; on a fatal error everything collected so far is dropped.
pub async fn collect_dataset(session: &mut Session, policy: FailurePolicy) -> Result<Dataset> {
    let countries = fetch_countries(session).await?;
    let total = countries.len();
    info_time!("Found {} countries", total);

    let mut dataset = Dataset::new();
    for (i, country) in countries.into_iter().enumerate() {
        let country_time = Local::now();
        let response = match fetch_leaders_for_country(session, &country).await {
            Ok(response) => response,
            Err(e @ Error::CredentialRejected { .. }) if policy == FailurePolicy::BestEffort => {
                warn_time!("Skipping '{}': {}", country, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut leaders = response.leaders;
        for leader in leaders.iter_mut() {
            enrich_leader(session, &country, leader, policy).await?;
        }
        info_time!(country_time, "Processed country {} ({}/{})", country, i + 1, total);
        dataset.insert(country, leaders);
    }
    Ok(dataset)
}

/// Sets the biography field of `leader`. Under `BestEffort` a failure leaves it `null`.
async fn enrich_leader(
    session: &Session,
    country: &str,
    leader: &mut LeaderRecord,
    policy: FailurePolicy,
) -> Result<()> {
    let biography = match lookup_biography(session, country, leader).await {
        Ok(biography) => biography,
        Err(e) if policy == FailurePolicy::BestEffort => {
            warn_time!("No biography for a leader of '{}': {}", country, e);
            None
        }
        Err(e) => return Err(e),
    };

    if biography.is_none() {
        info_time!("No lead paragraph for {}", leader.reference_url().unwrap_or("<no url>"));
    }
    leader.set_biography(biography);
    Ok(())
}

async fn lookup_biography(
    session: &Session,
    country: &str,
    leader: &LeaderRecord,
) -> Result<Option<String>> {
    let url = leader.reference_url().ok_or_else(|| Error::MissingField {
        country: country.to_string(),
        field: REFERENCE_URL_FIELD,
    })?;
    extract_first_paragraph(url, session.client()).await
}
