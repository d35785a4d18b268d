use serde_json::Value;

use crate::error::Result;

#[derive(Clone, Copy, Default, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Compact single line JSON
    #[default]
    Json,
    /// Indented JSON
    Pretty,
}

pub(crate) fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    println!("{rendered}");
    Ok(())
}
