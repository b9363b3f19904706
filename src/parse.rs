use reqwest::Client;
use scraper::{Html, Selector};
use tokio::task::spawn_blocking;

use crate::clean::clean_paragraph;
use crate::{Error, Result};

/// Fetches an encyclopedia page and returns its cleaned lead paragraph,
/// or `None` when no paragraph on the page has bold text in it.
pub async fn extract_first_paragraph(url: &str, client: &Client) -> Result<Option<String>> {
    let html = client.get(url).send().await?.text().await?;

    // `Html` isn't `Send`, parse off the async workers.
    let paragraph = spawn_blocking(move || first_bold_paragraph(&html)).await??;
    Ok(paragraph.map(|text| clean_paragraph(&text)))
}

/// Text of the first `<p>` containing a `<b>`, uncleaned.
/// Encyclopedia lead paragraphs bold the subject's name, which is what this keys on.
pub fn first_bold_paragraph(html: &str) -> Result<Option<String>> {
    let doc = Html::parse_document(html);

    let paragraph_selector = create_selector("p")?;
    let bold_selector = create_selector("b")?;

    let paragraph = doc
        .select(&paragraph_selector)
        .find(|p| p.select(&bold_selector).next().is_some())
        .map(|p| p.text().collect::<String>());
    Ok(paragraph)
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}
