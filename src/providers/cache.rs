/*!
 * Director lookup caching.
 *
 * Every `(title, year)` pair is resolved at most once per run. Failed lookups
 * are stored as empty results so a flaky service is not hammered.
 */

use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::answerline::make_curly;
use crate::providers::DirectorLookup;

/// Cache key: work title plus optional release year
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    title: String,
    year: Option<i32>,
}

impl CacheKey {
    fn new(title: &str, year: Option<i32>) -> Self {
        Self {
            title: title.to_string(),
            year,
        }
    }
}

/// Memo of resolved director credits
#[derive(Debug, Default)]
pub struct DirectorCache {
    cache: Arc<RwLock<HashMap<CacheKey, Vec<String>>>>,
    hits: Arc<RwLock<usize>>,
    misses: Arc<RwLock<usize>>,
}

impl DirectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached directors for a work, if it was looked up before
    pub fn get(&self, title: &str, year: Option<i32>) -> Option<Vec<String>> {
        let cache = self.cache.read();
        match cache.get(&CacheKey::new(title, year)) {
            Some(directors) => {
                *self.hits.write() += 1;
                debug!("Cache hit for '{}' ({:?})", title, year);
                Some(directors.clone())
            }
            None => {
                *self.misses.write() += 1;
                None
            }
        }
    }

    pub fn store(&self, title: &str, year: Option<i32>, directors: &[String]) {
        self.cache
            .write()
            .insert(CacheKey::new(title, year), directors.to_vec());
    }

    /// (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    pub fn clear(&self) {
        self.cache.write().clear();
        *self.hits.write() = 0;
        *self.misses.write() = 0;
    }

    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

/// A director lookup service fronted by a [`DirectorCache`].
#[derive(Debug, Clone)]
pub struct CachedLookup {
    inner: Arc<dyn DirectorLookup>,
    cache: Arc<DirectorCache>,
}

impl CachedLookup {
    pub fn new(inner: Arc<dyn DirectorLookup>) -> Self {
        Self {
            inner,
            cache: Arc::new(DirectorCache::new()),
        }
    }

    pub fn cache(&self) -> &DirectorCache {
        &self.cache
    }

    /// Director credit for a work, formatted as a comma-joined name list.
    ///
    /// Lookup errors are logged and treated as "no result".
    pub async fn director_credit(&self, title: &str, year: Option<i32>) -> Option<String> {
        let directors = match self.cache.get(title, year) {
            Some(directors) => directors,
            None => {
                let directors = match self.inner.find_directors(title, year).await {
                    Ok(directors) => directors,
                    Err(e) => {
                        warn!("Director lookup failed for '{}' ({:?}): {}", title, year, e);
                        Vec::new()
                    }
                };
                self.cache.store(title, year, &directors);
                directors
            }
        };

        if directors.is_empty() {
            None
        } else {
            Some(make_curly(&directors.join(", ")))
        }
    }
}
