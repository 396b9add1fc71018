//! Places scraper client — wraps the hosted Apify actor-task endpoint that
//! crawls Google Maps for partner-business candidates.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::Connection;

const APIFY_BASE_URL: &str = "https://api.apify.com/v2";
/// Hard cap on places per search term, enforced server-side by the actor task.
const MAX_CRAWLED_PLACES: u32 = 5;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct RunTaskRequest {
    #[serde(rename = "searchStringsArray")]
    search_strings_array: Vec<String>,
    #[serde(rename = "maxCrawledPlaces")]
    max_crawled_places: u32,
}

/// A source of place records for a search term in a location.
///
/// Carried in `AppState` as `Arc<dyn PlacesSource>`.
#[async_trait]
pub trait PlacesSource: Send + Sync {
    async fn search(&self, term: &str, location: &str) -> Result<Vec<Connection>, ScrapeError>;
}

/// Production client for the Apify run-sync-get-dataset-items endpoint.
#[derive(Clone)]
pub struct ApifyPlacesClient {
    client: Client,
    token: String,
    task_id: String,
}

impl ApifyPlacesClient {
    pub fn new(token: String, task_id: String) -> Self {
        Self {
            client: Client::new(),
            token,
            task_id,
        }
    }
}

#[async_trait]
impl PlacesSource for ApifyPlacesClient {
    async fn search(&self, term: &str, location: &str) -> Result<Vec<Connection>, ScrapeError> {
        let url = format!(
            "{APIFY_BASE_URL}/actor-tasks/{}/run-sync-get-dataset-items",
            self.task_id
        );
        let body = RunTaskRequest {
            search_strings_array: vec![format!("{term} in {location}")],
            max_crawled_places: MAX_CRAWLED_PLACES,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("token", self.token.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let items: Vec<Value> = response.json().await?;
        let connections = connections_from_items(items);
        debug!("scrape '{term}' returned {} places", connections.len());
        Ok(connections)
    }
}

/// Maps raw dataset items to `Connection` records.
///
/// Non-object items and items without a non-empty `title` are dropped.
fn connections_from_items(items: Vec<Value>) -> Vec<Connection> {
    items
        .into_iter()
        .filter_map(|item| {
            let obj = item.as_object()?;
            let title = obj.get("title")?.as_str()?;
            if title.is_empty() {
                return None;
            }
            Some(Connection {
                name: Some(title.to_string()),
                address: obj
                    .get("address")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                website: obj
                    .get("website")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                rating: obj.get("totalScore").and_then(Value::as_f64),
            })
        })
        .collect()
}
