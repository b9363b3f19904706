//! Country leaders scraper.
//! Pulls every country's leaders from the country-leaders API, attaches the cleaned
//! lead paragraph of each leader's encyclopedia page and writes the result as JSON or CSV.

mod error;
mod macros;

pub mod clean;
pub mod config;
pub mod dataset;
pub mod output;
pub mod parse;
pub mod process;
pub mod request;
pub mod session;

pub use error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://country-leaders.onrender.com";
pub const COOKIE_PATH: &str = "/cookie";
pub const COUNTRIES_PATH: &str = "/countries";
pub const LEADERS_PATH: &str = "/leaders";

/// Field of a leader record holding its encyclopedia page.
pub const REFERENCE_URL_FIELD: &str = "wikipedia_url";
/// Field added to every leader record; a string or `null`.
pub const BIOGRAPHY_FIELD: &str = "wiki_paragraph";
/// Extra column carried by every CSV row.
pub const COUNTRY_COLUMN: &str = "country";
