use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::core::ResolveError;
use crate::models::{Business, Point};
use crate::services::EnrichmentClient;

/// Errors that can occur when talking to the business search API
#[derive(Debug, Error)]
pub enum YelpError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("No business found near {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<YelpError> for ResolveError {
    fn from(err: YelpError) -> Self {
        match err {
            YelpError::NotFound(location) => ResolveError::NoResultFound(location),
            other => ResolveError::UpstreamUnavailable(other.to_string()),
        }
    }
}

/// Fixed parameters sent with every business search
#[derive(Debug, Clone)]
pub struct YelpSearch {
    pub term: String,
    pub categories: String,
    pub radius_m: u32,
    pub sort_by: String,
    pub limit: u8,
}

impl Default for YelpSearch {
    fn default() -> Self {
        Self {
            term: "food".to_string(),
            categories: "restaurants,food".to_string(),
            radius_m: 1500,
            sort_by: "rating".to_string(),
            limit: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    businesses: Vec<SearchBusiness>,
}

#[derive(Debug, Deserialize)]
struct SearchBusiness {
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    mobile_url: Option<String>,
    coordinates: Option<Coordinates>,
}

#[derive(Debug, Deserialize)]
struct Coordinates {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Business search API client
///
/// Looks up the top-rated restaurant around an airport code and caches the
/// answer per code.
pub struct YelpClient {
    base_url: String,
    api_key: String,
    search: YelpSearch,
    client: Client,
    cache: Cache<String, Business>,
}

impl YelpClient {
    /// Create a new business search client
    pub fn new(
        base_url: String,
        api_key: String,
        search: YelpSearch,
        timeout: Duration,
        cache_capacity: u64,
        cache_ttl: Duration,
    ) -> Result<Self, YelpError> {
        let client = Client::builder().timeout(timeout).build()?;

        let cache = Cache::builder()
            .max_capacity(cache_capacity)
            .time_to_live(cache_ttl)
            .build();

        Ok(Self {
            base_url,
            api_key,
            search,
            client,
            cache,
        })
    }

    /// Search for the best restaurant near `location_code`
    ///
    /// When the code is blank the search falls back to the coordinates.
    pub async fn search_restaurant(
        &self,
        location: Point,
        location_code: &str,
    ) -> Result<Business, YelpError> {
        let cache_key = cache_key(location, location_code);
        if let Some(hit) = self.cache.get(&cache_key).await {
            tracing::trace!("Business cache hit: {}", cache_key);
            return Ok(hit);
        }

        let url = format!("{}/businesses/search", self.base_url.trim_end_matches('/'));

        let mut params: Vec<(&str, String)> = vec![
            ("term", self.search.term.clone()),
            ("categories", self.search.categories.clone()),
            ("radius", self.search.radius_m.to_string()),
            ("sort_by", self.search.sort_by.clone()),
            ("limit", self.search.limit.to_string()),
        ];
        if location_code.trim().is_empty() {
            params.push(("latitude", location.x.to_string()));
            params.push(("longitude", location.y.to_string()));
        } else {
            params.push(("location", location_code.trim().to_string()));
        }

        tracing::debug!("Searching restaurants near {} ({}, {})", location_code, location.x, location.y);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(YelpError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Business search failed for {}: {} - {}", location_code, status, body);
                return Err(YelpError::ApiError(format!("Failed to search businesses: {}", status)));
            }
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| YelpError::InvalidResponse(format!("Failed to parse search response: {}", e)))?;

        let top = body
            .businesses
            .into_iter()
            .next()
            .ok_or_else(|| YelpError::NotFound(location_code.to_string()))?;

        let business = to_business(top)?;
        self.cache.insert(cache_key, business.clone()).await;

        Ok(business)
    }
}

fn cache_key(location: Point, location_code: &str) -> String {
    let code = location_code.trim();
    if code.is_empty() {
        format!("{},{}", location.x, location.y)
    } else {
        code.to_uppercase()
    }
}

fn to_business(found: SearchBusiness) -> Result<Business, YelpError> {
    let (x, y) = match found.coordinates {
        Some(Coordinates {
            latitude: Some(lat),
            longitude: Some(lon),
        }) => (lat, lon),
        _ => {
            return Err(YelpError::InvalidResponse(format!(
                "Business {} has no coordinates",
                found.name
            )))
        }
    };

    let yelp = found
        .mobile_url
        .or(found.url)
        .ok_or_else(|| YelpError::InvalidResponse(format!("Business {} has no URL", found.name)))?;

    Ok(Business {
        gmap: google_maps_link(&found.name, x, y),
        yelp,
        x,
        y,
        name: found.name,
    })
}

/// Google Maps search link for a named place, zoomed on its coordinates
pub fn google_maps_link(name: &str, x: f64, y: f64) -> String {
    format!(
        "https://www.google.com/maps/search/{}/@{},{},15z",
        urlencoding::encode(name),
        x,
        y
    )
}

#[async_trait]
impl EnrichmentClient for YelpClient {
    async fn find_nearest_restaurant(
        &self,
        location: Point,
        location_code: &str,
    ) -> Result<Business, ResolveError> {
        Ok(self.search_restaurant(location, location_code).await?)
    }
}
