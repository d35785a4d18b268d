use secpref::{PreferenceEditor, ValueCodec};
use serde::{Serialize, de::DeserializeOwned};

use crate::{json::JsonCodec, pipeline::EncodingPipeline};

/// Typed, encrypted view over a [`PreferenceEditor`].
///
/// Every value is run through the owned [`EncodingPipeline`] before it
/// reaches the store. Keys are stored as given.
#[derive(Debug)]
pub struct SecurePreferences<S, C = JsonCodec> {
    pipeline: EncodingPipeline<C>,
    store: S,
}

impl<S: PreferenceEditor, C: ValueCodec> SecurePreferences<S, C> {
    pub fn new(pipeline: EncodingPipeline<C>, store: S) -> Self {
        SecurePreferences { pipeline, store }
    }

    /// Encodes `value` and stores it under `key`.
    ///
    /// Returns `false`, leaving any previous entry untouched, when the
    /// value could not be encoded.
    pub fn put<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        match self.pipeline.encode_value(value) {
            Some(encoded) => {
                self.store.put_string(key, encoded);
                true
            }
            None => {
                tracing::warn!(key, "value not stored");
                false
            }
        }
    }

    /// Reads and decodes `key`, falling back to `default`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.pipeline.read_and_decode(&self.store, key, default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.store.contains(key)
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.store.remove(key).is_some()
    }

    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    pub fn pipeline(&self) -> &EncodingPipeline<C> {
        &self.pipeline
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
