use clap::Args;
use serde_json::Value;

use crate::algorithm::AlgorithmArgs;
use crate::error::Result;
use crate::output::{OutputFormat, print_value};
use crate::utils::{parse_default, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Encoded string. If not specified, reads from stdin
    encoded: Option<String>,

    /// JSON value printed when decoding fails (default: null)
    #[arg(short, long)]
    default: Option<String>,

    /// Fail with the pipeline error instead of printing the default
    #[arg(long)]
    strict: bool,

    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,

    #[command(flatten)]
    algorithm: AlgorithmArgs,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.encoded.as_deref())?;
    let encoded = input.trim();
    let pipeline = config.algorithm.pipeline()?;

    let value = if config.strict {
        pipeline.try_decode::<Value>(encoded)?
    } else {
        let default = parse_default(config.default.as_deref())?;
        pipeline.decode(Some(encoded), default)
    };

    print_value(&value, config.output)
}
