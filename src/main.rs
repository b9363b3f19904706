use chrono::Local;
use clap::Parser;
use leaders_scrap::{
    config::{Cli, Config},
    info_time,
    process::process_site,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = Config::from(Cli::parse());

    // A failed verification is reported by `process_site`, the run itself still succeeded.
    process_site(&config).await?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
