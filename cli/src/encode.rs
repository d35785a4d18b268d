use clap::Args;

use crate::algorithm::AlgorithmArgs;
use crate::error::{Error, Result};
use crate::utils::{parse_json, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// JSON value to encode. If not specified, reads from stdin
    value: Option<String>,

    #[command(flatten)]
    algorithm: AlgorithmArgs,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.value.as_deref())?;
    let value = parse_json(&input)?;

    let pipeline = config.algorithm.pipeline()?;
    let encoded = pipeline
        .encode_value(&value)
        .ok_or_else(|| Error::Message("failed to encode value".to_string()))?;

    println!("{encoded}");
    Ok(())
}
