//! String-keyed preference store capabilities.
//!
//! The encoding pipeline only ever reads through [`PreferenceStore`].
//! Writing is the caller's business and goes through [`PreferenceEditor`].

use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

/// Read access to a string-keyed store of string values.
pub trait PreferenceStore {
    /// Returns the string stored under `key`, or `None` when it is unset.
    fn get_string(&self, key: &str) -> Option<String>;

    fn contains(&self, key: &str) -> bool {
        self.get_string(key).is_some()
    }
}

/// Write access on top of [`PreferenceStore`].
pub trait PreferenceEditor: PreferenceStore {
    /// Stores `value` under `key`, replacing any previous entry.
    fn put_string(&mut self, key: &str, value: String);

    /// Removes `key`. Returns the previous value, if any.
    fn remove(&mut self, key: &str) -> Option<String>;

    /// All keys currently set, in no particular order.
    fn keys(&self) -> Vec<String>;
}

impl<P: PreferenceStore + ?Sized> PreferenceStore for &P {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }
}

impl<S: BuildHasher> PreferenceStore for HashMap<String, String, S> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<S: BuildHasher> PreferenceEditor for HashMap<String, String, S> {
    fn put_string(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        HashMap::remove(self, key)
    }

    fn keys(&self) -> Vec<String> {
        HashMap::keys(self).cloned().collect()
    }
}

impl PreferenceStore for BTreeMap<String, String> {
    fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl PreferenceEditor for BTreeMap<String, String> {
    fn put_string(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        BTreeMap::remove(self, key)
    }

    fn keys(&self) -> Vec<String> {
        BTreeMap::keys(self).cloned().collect()
    }
}
