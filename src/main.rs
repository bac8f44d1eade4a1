//! Fridge: find recipes for what's in your fridge
//!
//! Desktop client for the recipe backend. Searches recipes by ingredients
//! and keeps a personal saved-recipes list.
//!
//! Usage:
//!   fridge           - Open the window on the homepage
//!   fridge <path>    - Open the window on a client path, e.g. /saved-recipes
//!   fridge status    - Check the backend session endpoint
//!   fridge help      - Show help

mod app;
mod backend;
mod config;
mod state;
mod ui;

use std::env;

use app::Fridge;
use backend::BackendClient;
use config::{Config, ConfigError};
use iced::{window, Size};
use state::Route;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> iced::Result {
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config, config_error.as_ref());

    // Parse CLI arguments
    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        None => start_app(config, Route::Homepage),
        Some(path) if path.starts_with('/') => start_app(config, Route::parse(path)),
        Some(cmd) => handle_cli_command(cmd, &config),
    }
}

fn init_logging(config: &Config, config_error: Option<&ConfigError>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .try_init();

    if let Some(e) = config_error {
        tracing::warn!("{}; using default configuration", e);
    }
}

fn handle_cli_command(cmd: &str, config: &Config) -> iced::Result {
    match cmd {
        "status" => {
            let client = match BackendClient::new(&config.backend_url, config.request_timeout()) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(());
                }
            };
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Error: failed to start async runtime: {}", e);
                    return Ok(());
                }
            };
            match rt.block_on(client.check_session()) {
                Ok(true) => println!("Backend at {} is up, session active", client.base_url()),
                Ok(false) => println!("Backend at {} is up, not logged in", client.base_url()),
                Err(e) => eprintln!("Error: {}", e),
            }
            Ok(())
        }
        "help" | "--help" | "-h" => {
            println!("Fridge - find recipes for what's in your fridge\n");
            println!("Usage: fridge [command | path]\n");
            println!("Commands:");
            println!("  (none)        Open the window on the homepage");
            println!("  <path>        Open on a client path, e.g. /saved-recipes");
            println!("  status        Check that the backend answers and whether you are logged in");
            println!("  help          Show this help message");
            println!("\nBackend: {} (set {} to override)", config.backend_url, config::BACKEND_URL_ENV);
            if let Some(path) = Config::path() {
                println!("Config:  {}", path.display());
            }
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run 'fridge help' for usage");
            Ok(())
        }
    }
}

fn start_app(config: Config, start: Route) -> iced::Result {
    tracing::info!(
        "Starting fridge against {} at {}",
        config.backend_url,
        start.path()
    );

    let client = match BackendClient::new(&config.backend_url, config.request_timeout()) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Could not build HTTP client: {}", e);
            return Ok(());
        }
    };
    let size = Size::new(config.window.width, config.window.height);

    iced::application(Fridge::title, Fridge::update, Fridge::view)
        .theme(Fridge::theme)
        .window(window::Settings {
            size,
            position: window::Position::Centered,
            resizable: true,
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || Fridge::new(&config, client, start))
}
