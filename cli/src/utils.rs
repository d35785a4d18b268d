use std::io::{self, Read};

use serde_json::Value;

use crate::error::{Error, Result};

/// Read input from the argument or stdin
///
/// If `arg` is `Some`, it is used as is.
/// If `arg` is `None`, reads all of stdin.
pub(crate) fn read_input(arg: Option<&str>) -> Result<String> {
    match arg {
        Some(s) => Ok(s.to_string()),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parse a JSON document given on the command line.
pub(crate) fn parse_json(input: &str) -> Result<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("empty value".to_string()));
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Parse the `--default` option; absent means JSON `null`.
pub(crate) fn parse_default(input: Option<&str>) -> Result<Value> {
    input.map(parse_json).transpose().map(Option::unwrap_or_default)
}
