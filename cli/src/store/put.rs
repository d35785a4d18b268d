use clap::Args;

use crate::algorithm::AlgorithmArgs;
use crate::error::{Error, Result};
use crate::store::StoreArgs;
use crate::utils::{parse_json, read_input};

#[derive(Args)]
pub(crate) struct Config {
    key: String,

    /// JSON value to store. If not specified, reads from stdin
    value: Option<String>,

    #[command(flatten)]
    store: StoreArgs,

    #[command(flatten)]
    algorithm: AlgorithmArgs,
}

impl Config {
    #[cfg(test)]
    pub(crate) fn key(&self) -> &str {
        &self.key
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.value.as_deref())?;
    let value = parse_json(&input)?;

    let mut prefs = config.store.preferences(&config.algorithm)?;
    if !prefs.put(&config.key, &value) {
        return Err(Error::Message(format!("failed to store {}", config.key)));
    }
    prefs.store_mut().flush()?;

    tracing::info!(key = %config.key, "value stored");
    Ok(())
}
