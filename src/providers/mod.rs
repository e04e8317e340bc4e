/*!
 * Movie-metadata providers.
 *
 * The formatter only needs one capability from a metadata service: given a
 * film title (and optionally its year), name its directors. This module holds
 * that interface and its implementations:
 * - `tmdb`: The Movie Database HTTP API
 * - `cache`: per-run memoization in front of any provider
 * - `mock`: scripted provider for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Looks up the directors of a film
#[async_trait]
pub trait DirectorLookup: Send + Sync + Debug {
    /// Find the directors of `title`, narrowed to `year` when given.
    ///
    /// # Returns
    /// * `Ok(names)` - Director names of the best match, empty when nothing matched
    /// * `Err(ProviderError)` - The service could not be queried
    async fn find_directors(&self, title: &str, year: Option<i32>) -> Result<Vec<String>, ProviderError>;
}

pub mod cache;
pub mod mock;
pub mod tmdb;

pub use cache::{CachedLookup, DirectorCache};
pub use mock::MockLookup;
pub use tmdb::Tmdb;
