use serde::{Deserialize, Serialize};

/// Full record for a single title, fetched when a search result is opened.
///
/// Numeric fields are kept exactly as the provider sends them (`"148 min"`,
/// `"8.8"`, `"N/A"`); use [`MovieDetail::runtime_minutes`] and
/// [`MovieDetail::critic_rating`] to read them as numbers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub runtime: String,
    pub imdb_rating: String,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}

impl MovieDetail {
    /// Leading numeral of the runtime string (`"148 min"` -> 148).
    pub fn runtime_minutes(&self) -> Option<u32> {
        parse_leading_number(&self.runtime)
    }

    /// Critic (IMDb) rating as a number, `None` for `"N/A"` and other junk.
    pub fn critic_rating(&self) -> Option<f64> {
        self.imdb_rating
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rating| rating.is_finite())
    }
}

fn parse_leading_number(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_detail(runtime: &str, imdb_rating: &str) -> MovieDetail {
        MovieDetail {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            poster: None,
            runtime: runtime.to_string(),
            imdb_rating: imdb_rating.to_string(),
            plot: String::new(),
            released: "16 Jul 2010".to_string(),
            actors: "Leonardo DiCaprio".to_string(),
            director: "Christopher Nolan".to_string(),
            genre: "Action, Adventure, Sci-Fi".to_string(),
        }
    }

    #[test]
    fn test_runtime_minutes() {
        assert_eq!(create_detail("148 min", "8.8").runtime_minutes(), Some(148));
        assert_eq!(create_detail("90", "8.8").runtime_minutes(), Some(90));
        assert_eq!(create_detail("N/A", "8.8").runtime_minutes(), None);
        assert_eq!(create_detail("", "8.8").runtime_minutes(), None);
    }

    #[test]
    fn test_critic_rating() {
        assert_eq!(create_detail("148 min", "8.8").critic_rating(), Some(8.8));
        assert_eq!(create_detail("148 min", " 7 ").critic_rating(), Some(7.0));
        assert_eq!(create_detail("148 min", "N/A").critic_rating(), None);
        assert_eq!(create_detail("148 min", "NaN").critic_rating(), None);
    }
}
