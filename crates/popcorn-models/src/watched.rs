use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::detail::MovieDetail;

/// A movie the user has rated and added to their watched list.
///
/// Field names on the wire match the JSON the list has always been stored
/// with, so older data (without `dateAdded`) still loads. Entries are never
/// mutated in place: they are created on commit and removed on delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    #[serde(default)]
    pub poster: Option<String>,
    /// `None` when the provider's rating was not numeric.
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<f64>,
    /// Minutes; `None` when the provider's runtime had no leading numeral.
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(rename = "userRating")]
    pub user_rating: u8,
    /// How many times the rating was changed before it was committed.
    #[serde(rename = "countRatingDecisions", default, skip_serializing_if = "Option::is_none")]
    pub count_rating_decisions: Option<u32>,
    #[serde(rename = "dateAdded", default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime<Utc>>,
}

impl WatchedEntry {
    /// Build an entry from a fetched detail and the rating the user settled on.
    pub fn from_detail(detail: &MovieDetail, user_rating: u8, rating_decisions: u32) -> Self {
        Self {
            imdb_id: detail.imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            imdb_rating: detail.critic_rating(),
            runtime: detail.runtime_minutes(),
            user_rating,
            count_rating_decisions: Some(rating_decisions),
            date_added: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detail_parses_numbers() {
        let detail = MovieDetail {
            imdb_id: "tt0816692".to_string(),
            title: "Interstellar".to_string(),
            year: "2014".to_string(),
            poster: Some("https://example.com/interstellar.jpg".to_string()),
            runtime: "169 min".to_string(),
            imdb_rating: "8.7".to_string(),
            plot: String::new(),
            released: "07 Nov 2014".to_string(),
            actors: String::new(),
            director: "Christopher Nolan".to_string(),
            genre: "Adventure, Drama, Sci-Fi".to_string(),
        };

        let entry = WatchedEntry::from_detail(&detail, 9, 2);
        assert_eq!(entry.imdb_id, "tt0816692");
        assert_eq!(entry.runtime, Some(169));
        assert_eq!(entry.imdb_rating, Some(8.7));
        assert_eq!(entry.user_rating, 9);
        assert_eq!(entry.count_rating_decisions, Some(2));
        assert!(entry.date_added.is_some());
    }

    #[test]
    fn test_from_detail_keeps_unparseable_fields_unknown() {
        let detail = MovieDetail {
            imdb_id: "tt0000001".to_string(),
            title: "Carmencita".to_string(),
            year: "1894".to_string(),
            poster: None,
            runtime: "N/A".to_string(),
            imdb_rating: "N/A".to_string(),
            plot: String::new(),
            released: String::new(),
            actors: String::new(),
            director: String::new(),
            genre: String::new(),
        };

        let entry = WatchedEntry::from_detail(&detail, 5, 1);
        assert_eq!(entry.runtime, None);
        assert_eq!(entry.imdb_rating, None);
    }

    #[test]
    fn test_deserialize_legacy_entry() {
        let json = r#"{
            "imdbID": "tt1375666",
            "title": "Inception",
            "year": "2010",
            "poster": "https://example.com/inception.jpg",
            "runtime": 148,
            "imdbRating": 8.8,
            "userRating": 10
        }"#;

        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.runtime, Some(148));
        assert_eq!(entry.count_rating_decisions, None);
        assert_eq!(entry.date_added, None);
    }

    #[test]
    fn test_serialize_uses_stored_field_names() {
        let entry = WatchedEntry {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: None,
            imdb_rating: Some(8.8),
            runtime: Some(148),
            user_rating: 10,
            count_rating_decisions: Some(3),
            date_added: None,
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["imdbID"], "tt1375666");
        assert_eq!(value["userRating"], 10);
        assert_eq!(value["countRatingDecisions"], 3);
        assert!(value.get("dateAdded").is_none());
    }
}
