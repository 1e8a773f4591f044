// src/cli/fetch.rs — One-off report fetch

use crate::infra::config::Config;
use crate::service::{DataService, FetchParameters, SoapClient};

/// Call the service once and print the payload. Errors are returned, not collapsed.
pub async fn run_fetch(
    config: &Config,
    sbs: Option<String>,
    logged_user_id: Option<String>,
) -> anyhow::Result<()> {
    let params = FetchParameters::new(
        sbs.unwrap_or_else(|| config.service.default_sbs.clone()),
        logged_user_id.unwrap_or_else(|| config.service.default_logged_user_id.clone()),
    );

    let client = SoapClient::new(&config.service)?;
    let payload = client.fetch(&params).await?;
    println!("{}", payload.to_pretty_text());
    Ok(())
}
