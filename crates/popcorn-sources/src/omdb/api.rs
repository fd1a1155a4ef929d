use popcorn_models::{MovieDetail, SearchResultSummary};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use crate::error::ProviderError;

/// OMDb marks "no value" with this literal instead of omitting the field
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbTitle {
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

fn reported_failure(response: Option<&str>) -> bool {
    matches!(response, Some(r) if r.eq_ignore_ascii_case("false"))
}

fn poster_url(poster: Option<String>) -> Option<String> {
    poster.filter(|p| !p.is_empty() && p != NOT_AVAILABLE)
}

/// Search titles by fragment: `GET <base>?apikey=<key>&s=<query>`
pub async fn search_titles(
    client: &Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<SearchResultSummary>, ProviderError> {
    debug!(query = %query, "Searching OMDb");

    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("s", query)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!(%status, "OMDb search failed");
        return Err(ProviderError::Network(format!("{} - {}", status, error_text)));
    }

    let body = response.text().await?;
    parse_search_body(&body)
}

/// Fetch one title: `GET <base>?apikey=<key>&i=<id>`
pub async fn get_title(
    client: &Client,
    base_url: &str,
    api_key: &str,
    imdb_id: &str,
) -> Result<MovieDetail, ProviderError> {
    debug!(imdb_id = %imdb_id, "Fetching OMDb title");

    let response = client
        .get(base_url)
        .query(&[("apikey", api_key), ("i", imdb_id)])
        .header("Accept", "application/json")
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        warn!(%status, imdb_id = %imdb_id, "OMDb title fetch failed");
        return Err(ProviderError::Network(format!("{} - {}", status, error_text)));
    }

    let body = response.text().await?;
    parse_title_body(imdb_id, &body)
}

/// Decode a search body. `Response: "False"` and an empty `Search` array
/// both count as "not found".
pub fn parse_search_body(body: &str) -> Result<Vec<SearchResultSummary>, ProviderError> {
    let parsed: OmdbSearchResponse = serde_json::from_str(body)?;

    if reported_failure(parsed.response.as_deref()) {
        let message = parsed.error.unwrap_or_else(|| "Movie not found!".to_string());
        return Err(ProviderError::NotFound(message));
    }

    if parsed.search.is_empty() {
        return Err(ProviderError::NotFound("empty result set".to_string()));
    }

    Ok(parsed
        .search
        .into_iter()
        .map(|item| SearchResultSummary {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: poster_url(item.poster),
        })
        .collect())
}

/// Decode a title body. The requested id is used when the body omits `imdbID`.
pub fn parse_title_body(requested_id: &str, body: &str) -> Result<MovieDetail, ProviderError> {
    let parsed: OmdbTitle = serde_json::from_str(body)?;

    if reported_failure(parsed.response.as_deref()) {
        let message = parsed.error.unwrap_or_else(|| "Incorrect IMDb ID.".to_string());
        return Err(ProviderError::NotFound(message));
    }

    Ok(MovieDetail {
        imdb_id: parsed
            .imdb_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| requested_id.to_string()),
        title: parsed.title,
        year: parsed.year,
        poster: poster_url(parsed.poster),
        runtime: parsed.runtime,
        imdb_rating: parsed.imdb_rating,
        plot: parsed.plot,
        released: parsed.released,
        actors: parsed.actors,
        director: parsed.director,
        genre: parsed.genre,
    })
}
