use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// In-memory memoization of backend results, keyed by the exact source text.
///
/// Lives for one run only. Keys are inserted at most once; a second `put` for
/// the same text keeps the first value.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: Mutex<HashMap<String, String>>,
}

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str) -> Option<String> {
        self.entries.lock().get(text).cloned()
    }

    /// Stores a translation and returns the value now held for `text`.
    pub fn put(&self, text: &str, translated: String) -> String {
        match self.entries.lock().entry(text.to_string()) {
            Entry::Occupied(existing) => existing.get().clone(),
            Entry::Vacant(slot) => slot.insert(translated).clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
