// Profanity censoring applied to post text before word-frequency analysis

use regex::Regex;
use std::sync::Mutex;
use tracing::debug;

use crate::infrastructure::Cache;

/// Replacement written over every censored word
pub const MASK: &str = "****";

/// Opaque text transform; must be deterministic and idempotent
pub trait Censor: Send + Sync {
    fn censor(&self, text: &str) -> String;
}

/// Censors whole words from a dictionary compiled once into a single pattern.
/// Matching ignores case.
#[derive(Debug, Clone)]
pub struct WordListCensor {
    pattern: Option<Regex>,
    words: usize,
}

impl WordListCensor {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut escaped: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_string())
            .filter(|w| !w.is_empty())
            .map(|w| regex::escape(&w))
            .collect();
        // Longest first so "fucking" wins over "fuck"
        escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        escaped.dedup();

        let words = escaped.len();
        let pattern = if escaped.is_empty() {
            None
        } else {
            // Escaped literals always form a valid pattern
            Regex::new(&format!(r"(?i)\b(?:{})\b", escaped.join("|"))).ok()
        };
        debug!(words, "censor dictionary loaded");
        Self { pattern, words }
    }

    /// Small built-in dictionary
    pub fn with_default_dictionary() -> Self {
        Self::new(DEFAULT_DICTIONARY)
    }

    pub fn word_count(&self) -> usize {
        self.words
    }
}

impl Default for WordListCensor {
    fn default() -> Self {
        Self::with_default_dictionary()
    }
}

impl Censor for WordListCensor {
    fn censor(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, MASK).into_owned(),
            None => text.to_string(),
        }
    }
}

const DEFAULT_DICTIONARY: &[&str] = &[
    "damn", "hell", "fuck", "fucking", "shit", "crap", "bastard", "bitch", "ass", "asshole",
];

/// Memoizes another censor's output in a bounded LRU cache
#[derive(Debug)]
pub struct CachedCensor<C> {
    inner: C,
    cache: Mutex<Cache<String, String>>,
}

impl<C: Censor> CachedCensor<C> {
    pub fn new(inner: C, capacity: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(Cache::new(capacity)),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl<C: Censor> Censor for CachedCensor<C> {
    fn censor(&self, text: &str) -> String {
        let Ok(mut cache) = self.cache.lock() else {
            return self.inner.censor(text);
        };
        if let Some(hit) = cache.get(text) {
            return hit.clone();
        }
        let censored = self.inner.censor(text);
        cache.insert(text.to_string(), censored.clone());
        censored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_whole_words_ignoring_case() {
        let censor = WordListCensor::new(["hell", "damn"]);
        assert_eq!(censor.censor("What the Hell"), "What the ****");
        assert_eq!(censor.censor("What a damn good day!"), "What a **** good day!");
        assert_eq!(censor.censor("hello shell"), "hello shell");
        assert_eq!(censor.word_count(), 2);
    }

    #[test]
    fn test_prefers_longest_word() {
        let censor = WordListCensor::new(["fuck", "fucking"]);
        assert_eq!(censor.censor("Learning Python is fucking fun!"), "Learning Python is **** fun!");
    }

    #[test]
    fn test_is_idempotent() {
        let censor = WordListCensor::with_default_dictionary();
        let once = censor.censor("This island is amazing, hell yeah!");
        assert_eq!(censor.censor(&once), once);
    }

    #[test]
    fn test_empty_dictionary_passes_text_through() {
        let censor = WordListCensor::new(Vec::<String>::new());
        assert_eq!(censor.censor("damn"), "damn");
        assert_eq!(censor.word_count(), 0);
    }

    #[test]
    fn test_cached_censor_matches_inner() {
        let censor = CachedCensor::new(WordListCensor::new(["damn"]), 2);
        assert_eq!(censor.censor("damn it"), "**** it");
        assert_eq!(censor.censor("damn it"), "**** it");
        assert_eq!(censor.cached_entries(), 1);

        censor.censor("a");
        censor.censor("b");
        assert_eq!(censor.cached_entries(), 2);
    }
}
