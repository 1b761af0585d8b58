mod actor;
mod api;
mod app;
mod command;
mod config;
mod constants;
mod contacts;
mod detail;
mod ignore;
mod input;
mod search;
mod ui;

use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::actor::{RetryConfig, with_retry};
use crate::api::ApiClient;
use crate::app::App;
use crate::config::{Config, expand_home};

fn setup_logging() {
    use std::fs::{self, OpenOptions};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,pastlead=debug"));

    // Try to create a log file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|()| dir.join("pastlead.log")))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        // Log to file
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"pastlead - Terminal triage for scored email contacts

Usage: pastlead [command]

Commands:
    (none)          Start the interactive client
    export [dir]    Write the ignore list to IgnoredContacts_<timestamp>.txt
    import <file>   Add every entry of an exported ignore list
    help            Show this help message

Configuration file: ~/.config/pastlead/config.toml
API base URL override: PASTLEAD_API_URL
"#
    );
}

async fn run_export(config: &Config, dir: Option<&str>) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let retry = RetryConfig {
        max_retries: config.api.max_retries,
        ..RetryConfig::default()
    };
    let items = with_retry(&retry, || client.ignore_list())
        .await
        .context("Failed to fetch the ignore list")?;

    let dir = match dir {
        Some(dir) => expand_home(Path::new(dir)),
        None => config.export.resolve_directory(),
    };
    match ignore::write_export(&dir, &items)? {
        Some(path) => println!("Exported {} entries to {}", items.len(), path.display()),
        None => println!("Nothing to export"),
    }
    Ok(())
}

async fn run_import(config: &Config, path: &str) -> Result<()> {
    let entries = ignore::read_import(&expand_home(Path::new(path)))?;

    let client = ApiClient::new(&config.api)?;
    let summary = client
        .import_ignore(&entries)
        .await
        .context("Import failed")?;

    println!("Added: {}, Skipped: {}", summary.added, summary.skipped);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("export") => {
            setup_logging();
            let config = Config::load()?;
            run_export(&config, args.get(2).map(|s| s.as_str())).await
        }
        Some("import") => {
            let Some(path) = args.get(2) else {
                eprintln!("Missing file: pastlead import <file>");
                print_usage();
                std::process::exit(1);
            };
            setup_logging();
            let config = Config::load()?;
            run_import(&config, path).await
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();

            let config = Config::load()?;
            config.ensure_dirs()?;

            let mut app = App::new(config)?;
            app.run().await
        }
    }
}
