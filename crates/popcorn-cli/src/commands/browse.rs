use super::context::open_session;
use super::prompts::{prompt_rating, prompt_select, prompt_string, prompt_yes_no};
use super::render;
use super::search::{open_detail, search_once};
use super::ui::set_terminal_title;
use super::watched::commit;
use crate::output::Output;
use color_eyre::Result;
use popcorn_config::PathManager;
use popcorn_core::{Session, WatchStatus, DEFAULT_WINDOW_TITLE};

const MENU: [&str; 4] = ["Search movies", "Watched list", "Remove a watched movie", "Quit"];

pub async fn run_browse(path_manager: &PathManager, output: &Output) -> Result<()> {
    if !output.is_human() {
        return Err(color_eyre::eyre::eyre!("browse is interactive; use search/show/add with --output json"));
    }

    let mut session = open_session(path_manager)?;
    tracing::info!("Interactive session started");
    output.block(render::summary_block(&session.summary()));

    loop {
        set_terminal_title(&session.window_title().await);

        match prompt_select("What next?", &MENU)? {
            Some(0) => search_flow(&mut session, output).await?,
            Some(1) => show_watched(&session, output),
            Some(2) => remove_flow(&mut session, output)?,
            _ => break,
        }
    }

    session.shutdown().await;
    set_terminal_title(DEFAULT_WINDOW_TITLE);
    tracing::info!("Interactive session ended");
    Ok(())
}

async fn search_flow(session: &mut Session, output: &Output) -> Result<()> {
    let query = prompt_string("Search movies", None)?;
    if search_once(session, &query, output).await? == 0 {
        return Ok(());
    }

    loop {
        let state = session.search_state().await;
        let mut items: Vec<String> = state
            .results()
            .iter()
            .map(|r| format!("{} ({})", r.title, r.year))
            .collect();
        items.push("← Back".to_string());

        let picked = match prompt_select("Open a movie", &items)? {
            Some(i) if i < state.results().len() => state.results()[i].imdb_id.clone(),
            _ => {
                session.close().await;
                return Ok(());
            }
        };

        if open_detail(session, &picked, output).await? {
            set_terminal_title(&session.window_title().await);
            rate_flow(session, output).await?;
        }
        session.close().await;
        set_terminal_title(DEFAULT_WINDOW_TITLE);
    }
}

/// Rating loop for the open movie. Every changed pick counts as a decision.
async fn rate_flow(session: &mut Session, output: &Output) -> Result<()> {
    let Some(view) = session.detail_view().await else {
        return Ok(());
    };
    if let WatchStatus::Watched { .. } = view.status {
        return Ok(());
    }

    loop {
        let Some(rating) = prompt_rating(session.draft().rating())? else {
            return Ok(());
        };
        session.set_rating(rating).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

        if prompt_yes_no(&format!("Add to list with {} ⭐?", rating), true)? {
            commit(session, output).await?;
            output.block(render::summary_block(&session.summary()));
            return Ok(());
        }
    }
}

fn show_watched(session: &Session, output: &Output) {
    output.block(render::summary_block(&session.summary()));
    if session.watched().is_empty() {
        output.info("No movies yet. Search for one and rate it to add it here.");
    } else {
        output.block(render::watched_table(session.watched()));
    }
}

fn remove_flow(session: &mut Session, output: &Output) -> Result<()> {
    if session.watched().is_empty() {
        output.info("Your watched list is empty");
        return Ok(());
    }

    let mut items: Vec<String> = session
        .watched()
        .iter()
        .map(|e| format!("{} ({}) - {} ⭐", e.title, e.year, e.user_rating))
        .collect();
    items.push("← Back".to_string());

    let Some(index) = prompt_select("Remove which movie?", &items)? else {
        return Ok(());
    };
    let Some(entry) = session.watched().get(index).cloned() else {
        return Ok(());
    };

    if !prompt_yes_no(&format!("Remove \"{}\"?", entry.title), false)? {
        return Ok(());
    }

    session
        .remove(&entry.imdb_id)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save watched list: {}", e))?;
    output.success(format!("Removed \"{}\"", entry.title));
    output.block(render::summary_block(&session.summary()));
    Ok(())
}
