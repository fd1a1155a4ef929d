use super::context::{load_config, load_credentials};
use super::prompts;
use super::render::mask_secret;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use popcorn_config::{PathManager, OMDB_API_KEY_ENV};
use serde_json::json;

pub fn run_config(path_manager: &PathManager, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(path_manager, full, output),
        ConfigCommands::ApiKey { key } => configure_api_key(path_manager, key, output),
        ConfigCommands::Set { base_url, timeout_seconds, min_query_len } => {
            configure_settings(path_manager, base_url, timeout_seconds, min_query_len, output)
        }
    }
}

fn show_config(path_manager: &PathManager, full: bool, output: &Output) -> Result<()> {
    let config_file = path_manager.config_file();
    let config = load_config(path_manager)?;
    let credentials = load_credentials(path_manager)?;

    let from_env = std::env::var(OMDB_API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false);
    let api_key = credentials.resolve_omdb_api_key().unwrap_or_default();
    let api_key_display = if full { api_key.clone() } else { mask_secret(&api_key) };

    if !config_file.exists() {
        output.warn(format!("No config file at {}, showing defaults", config_file.display()));
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Configuration").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(config_file.display().to_string()),
    ]);
    table.add_row(vec![Cell::new("OMDb URL"), Cell::new(&config.omdb.base_url)]);
    let timeout_display = config
        .omdb
        .timeout_seconds
        .map(|t| format!("{} seconds", t))
        .unwrap_or_else(|| "none".to_string());
    table.add_row(vec![Cell::new("Timeout"), Cell::new(timeout_display)]);
    table.add_row(vec![
        Cell::new("API key"),
        Cell::new(if from_env { format!("{} (from {})", api_key_display, OMDB_API_KEY_ENV) } else { api_key_display.clone() }),
    ]);
    table.add_row(vec![Cell::new("Min query length"), Cell::new(config.search.min_query_len)]);
    table.add_row(vec![Cell::new("Watched list key"), Cell::new(&config.storage.watched_key)]);
    table.add_row(vec![Cell::new("Data directory"), Cell::new(path_manager.data_dir().display().to_string())]);
    table.add_row(vec![Cell::new("Log file"), Cell::new(path_manager.session_log_file().display().to_string())]);
    output.block(table);

    output.data(
        "config",
        &json!({
            "config_file": config_file.display().to_string(),
            "omdb": {
                "base_url": config.omdb.base_url,
                "timeout_seconds": config.omdb.timeout_seconds,
                "api_key": if api_key.is_empty() { serde_json::Value::Null } else { json!(api_key_display) },
                "api_key_from_env": from_env,
            },
            "search": { "min_query_len": config.search.min_query_len },
            "storage": { "watched_key": config.storage.watched_key },
        }),
    );
    Ok(())
}

fn configure_api_key(path_manager: &PathManager, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None => {
            output.info("Get a free OMDb API key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("OMDb API key")?
        }
    };

    let key = key.trim().to_string();
    validate_api_key(&key).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let mut credentials = load_credentials(path_manager)?;
    credentials.set_omdb_api_key(key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!("OMDb API key saved to {}", path_manager.credentials_file().display()));
    if std::env::var(OMDB_API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", OMDB_API_KEY_ENV));
    }
    Ok(())
}

fn configure_settings(
    path_manager: &PathManager,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
    min_query_len: Option<usize>,
    output: &Output,
) -> Result<()> {
    if base_url.is_none() && timeout_seconds.is_none() && min_query_len.is_none() {
        output.warn("Nothing to change. Use --base-url, --timeout-seconds, or --min-query-len");
        return Ok(());
    }

    let config_file = path_manager.config_file();
    let mut config = load_config(path_manager)?;

    if let Some(base_url) = base_url {
        config.omdb.base_url = base_url;
    }
    if let Some(timeout_seconds) = timeout_seconds {
        config.omdb.timeout_seconds = timeout_setting(timeout_seconds);
    }
    if let Some(min_query_len) = min_query_len {
        config.search.min_query_len = min_query_len;
    }

    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration: {}", e))?;
    config
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}

/// `--timeout-seconds 0` switches the timeout off
fn timeout_setting(seconds: u64) -> Option<u64> {
    Some(seconds).filter(|&t| t > 0)
}

fn validate_api_key(input: &str) -> Result<(), &'static str> {
    if input.is_empty() {
        return Err("API key cannot be empty");
    }
    if !input.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("API key should only contain letters and digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_key() {
        assert!(validate_api_key("abc12345").is_ok());
        assert!(validate_api_key("").is_err());
        assert!(validate_api_key("abc 123").is_err());
        assert!(validate_api_key("key=1&s=x").is_err());
    }

    #[test]
    fn test_zero_timeout_means_none() {
        assert_eq!(timeout_setting(0), None);
        assert_eq!(timeout_setting(20), Some(20));
    }
}
