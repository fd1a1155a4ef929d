use color_eyre::Result;
use popcorn_config::{Config, CredentialStore, PathManager};
use popcorn_core::{JsonFileStore, Session, WatchedList};
use popcorn_sources::create_provider;

/// Load `config.toml`, falling back to defaults when it does not exist
pub fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))
}

pub fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(cred_store)
}

/// The persisted watched list; needs no API key
pub fn open_watched(path_manager: &PathManager, config: &Config) -> Result<WatchedList> {
    let store = JsonFileStore::from_paths(path_manager)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to open data directory: {}", e))?;
    tracing::debug!(dir = %store.dir().display(), "Opened watched-list storage");

    WatchedList::load(Box::new(store), config.storage.watched_key.clone())
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load watched list: {}", e))
}

/// Provider + watched list wired into a session
pub fn open_session(path_manager: &PathManager) -> Result<Session> {
    let config = load_config(path_manager)?;
    let credentials = load_credentials(path_manager)?;

    let provider = create_provider(&config, &credentials).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    let watched = open_watched(path_manager, &config)?;

    tracing::debug!(provider = provider.provider_name(), "Session ready");
    Ok(Session::new(provider, watched, config.search.min_query_len))
}
