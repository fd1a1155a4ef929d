use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use popcorn_core::{DetailView, WatchStatus, WatchedSummary};
use popcorn_models::{SearchResultSummary, WatchedEntry};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn results_table(results: &[SearchResultSummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec![header("#"), header("Title"), header("Year"), header("IMDb ID")]);
    for (i, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&result.title),
            Cell::new(&result.year),
            Cell::new(&result.imdb_id),
        ]);
    }
    table
}

pub fn found_line(count: usize) -> String {
    format!("Found {} results", count.to_string().bold())
}

pub fn detail_block(view: &DetailView) -> String {
    let detail = &view.detail;
    let mut table = new_table();
    table.set_header(vec![header(&detail.title), Cell::new(&detail.imdb_id)]);
    table.add_row(vec![Cell::new("Released"), Cell::new(format!("{} • {}", detail.released, detail.runtime))]);
    table.add_row(vec![Cell::new("Genre"), Cell::new(&detail.genre)]);
    table.add_row(vec![Cell::new("IMDb rating"), Cell::new(format!("⭐ {}", detail.imdb_rating))]);
    table.add_row(vec![Cell::new("Starring"), Cell::new(&detail.actors)]);
    table.add_row(vec![Cell::new("Directed by"), Cell::new(&detail.director)]);
    if let Some(poster) = &detail.poster {
        table.add_row(vec![Cell::new("Poster"), Cell::new(poster)]);
    }

    let mut block = format!("{}\n\n{}", table, detail.plot.italic());
    if let WatchStatus::Watched { user_rating } = view.status {
        block.push_str(&format!("\n\n{}", watched_line(user_rating)));
    }
    block
}

pub fn watched_line(user_rating: u8) -> String {
    format!("You rated this movie {} ⭐", user_rating.to_string().bold())
}

pub fn watched_table(entries: &[WatchedEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        header("Title"),
        header("IMDb ID"),
        header("⭐ IMDb"),
        header("🌟 Yours"),
        header("⏳ Runtime"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.imdb_id),
            Cell::new(entry.imdb_rating.map(|r| r.to_string()).unwrap_or_else(|| "N/A".to_string())),
            Cell::new(entry.user_rating),
            Cell::new(entry.runtime.map(|r| format!("{} min", r)).unwrap_or_else(|| "N/A".to_string())),
        ]);
    }
    table
}

pub fn summary_block(summary: &WatchedSummary) -> String {
    let mut table = new_table();
    table.set_header(vec![header("Movies you watched")]);
    table.add_row(vec![Cell::new("#️⃣ Movies"), Cell::new(summary.count)]);
    table.add_row(vec![Cell::new("⭐ IMDb average"), Cell::new(summary.imdb_rating_display())]);
    table.add_row(vec![Cell::new("🌟 Your average"), Cell::new(summary.user_rating_display())]);
    table.add_row(vec![Cell::new("⏳ Average runtime"), Cell::new(summary.runtime_display())]);
    table.to_string()
}

/// Mask a secret for display, keeping the first and last two characters
pub fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "<not set>");
        assert_eq!(mask_secret("abc"), "***");
        assert_eq!(mask_secret("abcdef12"), "ab***12");
    }

    #[test]
    fn test_results_table_lists_every_result() {
        let results = vec![
            SearchResultSummary {
                imdb_id: "tt0133093".to_string(),
                title: "The Matrix".to_string(),
                year: "1999".to_string(),
                poster: None,
            },
            SearchResultSummary {
                imdb_id: "tt0234215".to_string(),
                title: "The Matrix Reloaded".to_string(),
                year: "2003".to_string(),
                poster: None,
            },
        ];

        let rendered = results_table(&results).to_string();
        assert!(rendered.contains("The Matrix Reloaded"));
        assert!(rendered.contains("tt0133093"));
    }
}
