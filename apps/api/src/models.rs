//! Core domain records: the incoming profile, a scraped connection, and the
//! assembled brief.

use serde::{Deserialize, Serialize};

/// A single form submission. Immutable once received.
#[derive(Debug, Clone, Deserialize)]
pub struct BriefRequest {
    pub business_name: String,
    /// Collected on the form but not used downstream.
    #[allow(dead_code)]
    pub website: String,
    pub category: String,
    pub location: String,
    pub goal: String,
}

/// A candidate partner business discovered via the places scraper.
///
/// All fields are optional — the scraping service omits what it cannot find,
/// and a failed scrape is represented by a record whose `name` carries the
/// error text (observed behavior, preserved).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Connection {
    pub name: Option<String>,
    pub address: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
}

impl Connection {
    /// Placeholder record standing in for a failed scrape call.
    pub fn scrape_failed(reason: &str) -> Self {
        Connection {
            name: Some(format!("Scrape failed: {reason}")),
            ..Connection::default()
        }
    }
}

/// The assembled output: generated summary plus scraped connections.
///
/// At most one instance is live per process, overwritten on every generate
/// call and read by the JSON and PDF endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brief {
    pub business: String,
    pub category: String,
    pub location: String,
    pub goal: String,
    pub summary: String,
    pub connections: Vec<Connection>,
}
