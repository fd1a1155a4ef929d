use super::context::open_session;
use super::render;
use super::ui::Spinner;
use crate::output::Output;
use color_eyre::Result;
use popcorn_config::PathManager;
use popcorn_core::{QueryOutcome, Session};

pub async fn run_search(path_manager: &PathManager, query: &str, output: &Output) -> Result<()> {
    let mut session = open_session(path_manager)?;
    search_once(&mut session, query, output).await?;
    Ok(())
}

/// Run one search to completion and print it. Returns how many results were shown.
pub async fn search_once(session: &mut Session, query: &str, output: &Output) -> Result<usize> {
    let outcome = session.set_query(query).await;
    if outcome == QueryOutcome::TooShort {
        output.warn(format!("Type at least {} characters to search", session.min_query_len()));
        return Ok(0);
    }

    let spinner = Spinner::start(format!("Searching for \"{}\"...", query.trim()));
    let state = session.settle_search().await;
    spinner.finish();

    if let Some(error) = state.error() {
        output.error(error);
        return Ok(0);
    }

    let results = state.results();
    output.info(render::found_line(results.len()));
    output.block(render::results_table(results));
    output.data("search_results", &results);
    Ok(results.len())
}

pub async fn run_show(path_manager: &PathManager, imdb_id: &str, output: &Output) -> Result<()> {
    let mut session = open_session(path_manager)?;
    if !open_detail(&mut session, imdb_id, output).await? {
        return Err(color_eyre::eyre::eyre!("Could not load {}", imdb_id));
    }
    Ok(())
}

/// Open `imdb_id` in the session and print it; `false` when loading failed
pub async fn open_detail(session: &mut Session, imdb_id: &str, output: &Output) -> Result<bool> {
    if session.selected() != Some(imdb_id) {
        session.select(imdb_id).await;
    }

    let spinner = Spinner::start(format!("Loading {}...", imdb_id));
    let state = session.settle_detail().await;
    spinner.finish();

    if let Some(error) = state.status.error() {
        output.error(error);
        return Ok(false);
    }

    let Some(view) = session.detail_view().await else {
        output.error(format!("No details available for {}", imdb_id));
        return Ok(false);
    };

    output.block(render::detail_block(&view));
    output.data("movie", &view.detail);
    Ok(true)
}
