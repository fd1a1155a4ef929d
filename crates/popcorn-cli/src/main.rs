use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, search, watched};
use popcorn_config::PathManager;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Popcorn - find movies, rate them, and keep track of what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search, rate and add session (default)
    #[command(long_about = "Start an interactive session: search OMDb by title, open a movie, pick a 1-10 rating and add it to your watched list. The watched list and its averages can be viewed and edited from the same menu. Logs go to the log file instead of the terminal.")]
    Browse,

    /// Search movies by title
    Search {
        /// Title or part of it (at least 3 characters)
        query: String,
    },

    /// Show full details for one movie
    Show {
        /// IMDb id, e.g. tt1375666
        imdb_id: String,
    },

    /// Rate a movie and add it to the watched list
    Add {
        /// IMDb id, e.g. tt1375666
        imdb_id: String,

        /// Your rating from 1 to 10
        #[arg(short, long)]
        rating: u8,
    },

    /// Remove a movie from the watched list
    Remove {
        /// IMDb id of the watched movie
        imdb_id: String,
    },

    /// Show the watched list with its summary
    List,

    /// Show watched-list averages only
    Stats,

    /// View or change configuration
    #[command(long_about = "Manage configuration and the OMDb API key. Running without a subcommand shows the current configuration.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Delete stored data
    #[command(long_about = "Delete the watched list or the stored API key. Use --watched, --credentials, or --all.")]
    Clear {
        /// Clear everything
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Clear stored credentials
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Store the OMDb API key
    #[command(long_about = "Store the OMDb API key in the credentials file. Get a free key at https://www.omdbapi.com/apikey.aspx. The POPCORN_OMDB_API_KEY environment variable takes precedence over the stored key.")]
    ApiKey {
        /// API key (if not provided, will prompt)
        #[arg(long)]
        key: Option<String>,
    },

    /// Change settings
    Set {
        /// OMDb endpoint
        #[arg(long)]
        base_url: Option<String>,

        /// HTTP request timeout in seconds (0 for none)
        #[arg(long)]
        timeout_seconds: Option<u64>,

        /// Shortest query that triggers a search
        #[arg(long)]
        min_query_len: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Browse);
    let path_manager = PathManager::default();
    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create {}: {}", path_manager.config_dir().display(), e))?;

    if matches!(command, Commands::Browse) {
        logging::init_file_logging(cli.verbose, cli.quiet, &path_manager.session_log_file())
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    } else {
        logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    }

    let output = output::Output::new(cli.output, cli.quiet);

    match command {
        Commands::Browse => browse::run_browse(&path_manager, &output).await,
        Commands::Search { query } => search::run_search(&path_manager, &query, &output).await,
        Commands::Show { imdb_id } => search::run_show(&path_manager, &imdb_id, &output).await,
        Commands::Add { imdb_id, rating } => watched::run_add(&path_manager, &imdb_id, rating, &output).await,
        Commands::Remove { imdb_id } => watched::run_remove(&path_manager, &imdb_id, &output),
        Commands::List => watched::run_list(&path_manager, &output),
        Commands::Stats => watched::run_stats(&path_manager, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(&path_manager, cmd, &output)
        }
        Commands::Clear { all, watched, credentials } => {
            clear::run_clear(&path_manager, all, watched, credentials, &output)
        }
    }
}
