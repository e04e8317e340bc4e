/*!
 * Mock director lookup for testing.
 *
 * - `MockLookup::working()` answers from a fixed title table
 * - `MockLookup::intermittent(n)` fails every nth call
 * - `MockLookup::failing()` always errors
 */

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::DirectorLookup;

/// Behavior mode for the mock lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Answers from the title table; unknown titles yield no directors
    Working,
    /// Fails on every nth call
    Intermittent { fail_every: usize },
    /// Always fails with an error
    Failing,
}

/// In-memory director lookup
#[derive(Debug, Clone)]
pub struct MockLookup {
    behavior: MockBehavior,
    directors: HashMap<String, Vec<String>>,
    /// Shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockLookup {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            directors: HashMap::new(),
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent {
            fail_every: fail_every.max(1),
        })
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Register the directors returned for `title`
    pub fn with_directors(mut self, title: &str, names: &[&str]) -> Self {
        self.directors
            .insert(title.to_string(), names.iter().map(|n| n.to_string()).collect());
        self
    }

    /// Number of lookups performed so far
    pub fn call_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn answer(&self, title: &str) -> Vec<String> {
        self.directors.get(title).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl DirectorLookup for MockLookup {
    async fn find_directors(&self, title: &str, _year: Option<i32>) -> Result<Vec<String>, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.answer(title)),
            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.answer(title))
                }
            }
            MockBehavior::Failing => Err(ProviderError::RequestFailed(
                "Simulated lookup failure".to_string(),
            )),
        }
    }
}
