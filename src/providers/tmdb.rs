use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::providers::DirectorLookup;

/// TMDB client for resolving film directors
#[derive(Debug)]
pub struct Tmdb {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API base URL, e.g. `https://api.themoviedb.org/3`
    endpoint: String,
}

/// Movie search response
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Total number of matching movies
    #[serde(default)]
    pub total_results: u64,
    /// Matches on the first page, best first
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// Single movie search hit
#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
}

/// Movie credits response
#[derive(Debug, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// One crew credit
#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

impl CreditsResponse {
    /// Names of crew members credited as director, in credit order
    pub fn directors(&self) -> Vec<String> {
        self.crew
            .iter()
            .filter(|c| c.job == "Director")
            .map(|c| c.name.clone())
            .collect()
    }
}

impl Tmdb {
    /// Create a new TMDB client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Build an API URL for `path` with the key and extra query parameters
    pub fn api_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ProviderError> {
        let base = format!("{}/{}", self.endpoint.trim_end_matches('/'), path.trim_start_matches('/'));
        let mut url = Url::parse(&base)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid TMDB URL {}: {}", base, e)))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: Url) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProviderError::AuthenticationError(
                "TMDB rejected the API key".to_string(),
            ));
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("TMDB API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Search movies by title and optional release year
    pub async fn search_movie(&self, title: &str, year: Option<i32>) -> Result<SearchResponse, ProviderError> {
        let mut params = vec![("query", title.to_string())];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }
        let url = self.api_url("search/movie", &params)?;
        self.get_json(url).await
    }

    /// Fetch the credits of a movie
    pub async fn movie_credits(&self, movie_id: u64) -> Result<CreditsResponse, ProviderError> {
        let url = self.api_url(&format!("movie/{}/credits", movie_id), &[])?;
        self.get_json(url).await
    }
}

#[async_trait]
impl DirectorLookup for Tmdb {
    async fn find_directors(&self, title: &str, year: Option<i32>) -> Result<Vec<String>, ProviderError> {
        let search = self.search_movie(title, year).await?;
        let Some(best) = search.results.first() else {
            debug!("TMDB: no match for '{}' ({:?})", title, year);
            return Ok(Vec::new());
        };

        debug!(
            "TMDB: '{}' matched '{}' (id {}, {} results)",
            title,
            best.title.as_deref().unwrap_or("?"),
            best.id,
            search.total_results
        );
        Ok(self.movie_credits(best.id).await?.directors())
    }
}
