pub mod get;
pub mod keys;
pub mod put;
pub mod remove;

use std::path::PathBuf;

use clap::{Args, Subcommand};
use secpref_pipeline::{JsonFileStore, SecurePreferences};

use crate::algorithm::AlgorithmArgs;
use crate::error::Result;

#[derive(Subcommand)]
pub enum StoreCommands {
    /// Encrypt a JSON value and write it under a key
    Put {
        #[command(flatten)]
        config: put::Config,
    },
    /// Read and decrypt the value of a key
    Get {
        #[command(flatten)]
        config: get::Config,
    },
    /// Delete a key
    Remove {
        #[command(flatten)]
        config: remove::Config,
    },
    /// List the keys present in the store
    Keys {
        #[command(flatten)]
        config: keys::Config,
    },
}

#[derive(Args)]
pub(crate) struct StoreArgs {
    /// Path to the JSON preference file
    #[arg(short, long, env = "SECPREF_STORE")]
    store: PathBuf,
}

impl StoreArgs {
    pub(crate) fn open(&self) -> Result<JsonFileStore> {
        Ok(JsonFileStore::open(&self.store)?)
    }

    pub(crate) fn preferences(
        &self,
        algorithm: &AlgorithmArgs,
    ) -> Result<SecurePreferences<JsonFileStore>> {
        Ok(SecurePreferences::new(algorithm.pipeline()?, self.open()?))
    }
}
