use clap::Args;
use secpref::PreferenceEditor;

use crate::error::Result;
use crate::store::StoreArgs;

#[derive(Args)]
pub(crate) struct Config {
    key: String,

    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let mut store = config.store.open()?;
    if store.remove(&config.key).is_none() {
        tracing::warn!(key = %config.key, "key not present");
    }
    store.flush()?;
    Ok(())
}
