use std::num::NonZeroUsize;

use lru::LruCache;
use tiktoken_rs::CoreBPE;

use crate::error::{Result, SplitError};

/// Number of distinct texts whose token counts are memoized per counter.
/// Fragments and sentences recur across packing passes, so the cache
/// absorbs the dominant cost of re-measuring them.
const TOKEN_CACHE_CAPACITY: usize = 4096;

/// Token counter bound to one tokenizer model.
///
/// Counting is deterministic and memoized with a bounded LRU cache that
/// lives exactly as long as the counter.
pub struct TokenCounter {
    bpe: CoreBPE,
    cache: LruCache<String, usize>,
}

impl TokenCounter {
    /// Create a counter for a model identifier.
    ///
    /// Fails when the tokenizer has no encoding for the model; this is
    /// checked once at construction, before any splitting happens.
    pub fn new(model: &str) -> Result<Self> {
        let bpe = tiktoken_rs::get_bpe_from_model(model)
            .map_err(|_| SplitError::unknown_model(model))?;
        Ok(Self {
            bpe,
            cache: LruCache::new(
                NonZeroUsize::new(TOKEN_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            ),
        })
    }

    /// Number of tokens in `text`
    pub fn count(&mut self, text: &str) -> usize {
        if let Some(&tokens) = self.cache.get(text) {
            return tokens;
        }

        let tokens = self.bpe.encode_ordinary(text).len();
        self.cache.put(text.to_string(), tokens);
        tokens
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("cached_texts", &self.cache.len())
            .finish()
    }
}
