use clap::Args;
use secpref::PreferenceEditor;

use crate::error::Result;
use crate::store::StoreArgs;

#[derive(Args)]
pub(crate) struct Config {
    #[command(flatten)]
    store: StoreArgs,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let store = config.store.open()?;
    let mut keys = store.keys();
    keys.sort();
    for key in keys {
        println!("{key}");
    }
    Ok(())
}
