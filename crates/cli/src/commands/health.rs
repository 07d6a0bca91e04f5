//! Commerce API health probe.

use std::time::{Duration, Instant};

use super::CliError;

/// Probe the commerce API base URL and report the HTTP status.
pub async fn check() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let base_url = std::env::var("VOIDWEAR_API_BASE_URL")
        .map_err(|_| CliError::MissingEnvVar("VOIDWEAR_API_BASE_URL"))?;
    let url = format!("{}/", base_url.trim_end_matches('/'));

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()?;

    let started = Instant::now();
    let response = client.get(&url).send().await?;
    let elapsed = started.elapsed();

    #[allow(clippy::print_stdout)]
    {
        println!("{url} -> {} in {elapsed:?}", response.status());
    }

    Ok(())
}
