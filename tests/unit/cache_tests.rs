/*!
 * Tests for director lookup caching
 */

use std::sync::Arc;
use storyboard::providers::{CachedLookup, DirectorCache, MockLookup};

#[test]
fn test_cache_withDifferentYears_shouldKeepSeparateEntries() {
    let cache = DirectorCache::new();
    cache.store("Dune", Some(1984), &["David Lynch".to_string()]);
    cache.store("Dune", Some(2021), &["Denis Villeneuve".to_string()]);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("Dune", Some(1984)), Some(vec!["David Lynch".to_string()]));
    assert_eq!(cache.get("Dune", Some(2021)), Some(vec!["Denis Villeneuve".to_string()]));
}

#[test]
fn test_cache_clear_shouldResetEntriesAndStats() {
    let cache = DirectorCache::new();
    cache.store("Heat", None, &["Michael Mann".to_string()]);
    let _ = cache.get("Heat", None);

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.stats(), (0, 0, 0.0));
}

#[tokio::test]
async fn test_cachedLookup_withIntermittentService_shouldNotRetryFailedTitle() {
    let mock = Arc::new(MockLookup::intermittent(1).with_directors("Heat", &["Michael Mann"]));
    let lookup = CachedLookup::new(mock.clone());

    assert_eq!(lookup.director_credit("Heat", None).await, None);
    assert_eq!(lookup.director_credit("Heat", None).await, None);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_cachedLookup_shouldCurlQuotesInNames() {
    let mock = Arc::new(MockLookup::working().with_directors("Ran", &["Akira Kurosawa", "O'Brien"]));
    let lookup = CachedLookup::new(mock);

    assert_eq!(
        lookup.director_credit("Ran", Some(1985)).await.as_deref(),
        Some("Akira Kurosawa, O’Brien")
    );
}

#[test]
fn test_cachedLookup_withRepeatedTitle_shouldHitCache() {
    let mock = Arc::new(MockLookup::working().with_directors("Heat", &["Michael Mann"]));
    let lookup = CachedLookup::new(mock.clone());

    let (first, second) = tokio_test::block_on(async {
        (
            lookup.director_credit("Heat", Some(1995)).await,
            lookup.director_credit("Heat", Some(1995)).await,
        )
    });

    assert_eq!(first.as_deref(), Some("Michael Mann"));
    assert_eq!(first, second);
    assert_eq!(mock.call_count(), 1);
    assert_eq!(lookup.cache().stats().0, 1);
}
