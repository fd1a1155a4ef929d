use super::context::{load_config, open_session, open_watched};
use super::render;
use super::search::open_detail;
use crate::output::Output;
use color_eyre::Result;
use popcorn_config::PathManager;
use popcorn_core::{summarize, CommitError, Session};
use serde_json::json;

pub async fn run_add(path_manager: &PathManager, imdb_id: &str, rating: u8, output: &Output) -> Result<()> {
    let mut session = open_session(path_manager)?;

    if !open_detail(&mut session, imdb_id, output).await? {
        return Err(color_eyre::eyre::eyre!("Could not load {}", imdb_id));
    }
    session.set_rating(rating).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    commit(&mut session, output).await?;
    Ok(())
}

/// Commit the open movie and print the outcome. A refused commit is
/// reported, not returned as an error, so the interactive loop can go on.
pub async fn commit(session: &mut Session, output: &Output) -> Result<bool> {
    match session.commit().await {
        Ok(entry) => {
            output.success(format!("Added \"{}\" with your rating of {} ⭐", entry.title, entry.user_rating));
            output.data("watched_entry", &entry);
            Ok(true)
        }
        Err(CommitError::Store(e)) => Err(color_eyre::eyre::eyre!("Failed to save watched list: {}", e)),
        Err(e) => {
            output.warn(e.to_string());
            Ok(false)
        }
    }
}

pub fn run_remove(path_manager: &PathManager, imdb_id: &str, output: &Output) -> Result<()> {
    let config = load_config(path_manager)?;
    let mut watched = open_watched(path_manager, &config)?;

    let title = watched.get(imdb_id).map(|e| e.title.clone());
    let removed = watched
        .remove(imdb_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watched list: {}", e))?;

    match (removed, title) {
        (true, Some(title)) => output.success(format!("Removed \"{}\" from your watched list", title)),
        (true, None) => output.success(format!("Removed {} from your watched list", imdb_id)),
        (false, _) => output.warn(format!("{} is not in your watched list", imdb_id)),
    }
    output.data("removed", &json!({ "imdb_id": imdb_id, "removed": removed }));
    Ok(())
}

pub fn run_list(path_manager: &PathManager, output: &Output) -> Result<()> {
    let config = load_config(path_manager)?;
    let watched = open_watched(path_manager, &config)?;
    let summary = summarize(watched.all());

    output.block(render::summary_block(&summary));
    if watched.is_empty() {
        output.info("Your watched list is empty. Add a movie with 'popcorn add <IMDB_ID> --rating N'.");
    } else {
        output.block(render::watched_table(watched.all()));
    }
    output.data("watched", &json!({ "summary": summary, "movies": watched.all() }));
    Ok(())
}

pub fn run_stats(path_manager: &PathManager, output: &Output) -> Result<()> {
    let config = load_config(path_manager)?;
    let watched = open_watched(path_manager, &config)?;
    let summary = summarize(watched.all());

    output.block(render::summary_block(&summary));
    output.data("summary", &summary);
    Ok(())
}
