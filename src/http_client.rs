use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::config::ScrapeConfig;
use crate::error::Result;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client. Built from the first config it sees; later calls reuse it.
pub fn http_client(config: &ScrapeConfig) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(client)
    })
}
