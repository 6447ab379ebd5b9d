//! Command handlers.

pub mod catalog;
pub mod copy;

use anyhow::Result;

use crate::api::{GraphClient, TokenCache};
use crate::config::Config;

/// Builds an authenticated Graph client from the resolved configuration.
pub fn build_client(config: &Config) -> Result<GraphClient> {
    let token_cache = TokenCache::new(config.credentials.clone(), &config.graph_url);
    let client = GraphClient::new(token_cache, config.graph_url.clone())?;
    Ok(client)
}
