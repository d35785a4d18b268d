use clap::Args;
use serde_json::Value;

use crate::algorithm::AlgorithmArgs;
use crate::error::Result;
use crate::output::{OutputFormat, print_value};
use crate::store::StoreArgs;
use crate::utils::parse_default;

#[derive(Args)]
pub(crate) struct Config {
    key: String,

    /// JSON value printed when the key is missing or unreadable (default: null)
    #[arg(short, long)]
    default: Option<String>,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,

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
    let default = parse_default(config.default.as_deref())?;
    let prefs = config.store.preferences(&config.algorithm)?;
    let value: Value = prefs.get(&config.key, default);
    print_value(&value, config.output)
}
