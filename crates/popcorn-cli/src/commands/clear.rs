use super::context::load_config;
use crate::output::Output;
use color_eyre::Result;
use popcorn_config::PathManager;
use popcorn_core::{JsonFileStore, KeyValueStore};
use std::fs;

pub fn run_clear(path_manager: &PathManager, all: bool, watched: bool, credentials: bool, output: &Output) -> Result<()> {
    if !(all || watched || credentials) {
        output.warn("No clear option specified. Use --watched, --credentials, or --all");
        output.info("\nExample: popcorn clear --watched");
        return Ok(());
    }

    if all || watched {
        clear_watched(path_manager, output)?;
    }
    if all || credentials {
        clear_credentials(path_manager, output)?;
    }
    if all {
        output.success("Watched list and credentials cleared");
    }
    Ok(())
}

/// Works on the raw store so a corrupt list can still be cleared
fn clear_watched(path_manager: &PathManager, output: &Output) -> Result<()> {
    let config = load_config(path_manager)?;
    let store = JsonFileStore::from_paths(path_manager)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open data directory: {}", e))?;
    let key = &config.storage.watched_key;

    let stored = store
        .get(key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read watched list: {}", e))?;
    if stored.is_none() {
        output.info("Watched list is already empty");
        return Ok(());
    }

    store
        .remove(key)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to clear watched list: {}", e))?;
    output.success(format!("Cleared watched list: {}", store.dir().join(format!("{}.json", key)).display()));
    Ok(())
}

fn clear_credentials(path_manager: &PathManager, output: &Output) -> Result<()> {
    let credentials_file = path_manager.credentials_file();

    if credentials_file.exists() {
        fs::remove_file(&credentials_file).map_err(|e| {
            color_eyre::eyre::eyre!("Failed to remove credentials file at {}: {}", credentials_file.display(), e)
        })?;
        output.success(format!("Cleared credentials: {}", credentials_file.display()));
    } else {
        output.info("No credentials file found to clear");
    }
    Ok(())
}
