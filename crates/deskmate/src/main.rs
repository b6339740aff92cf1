//! Command-line front end for Deskmate.

mod commands;
mod shell;

use anyhow::Context;
use clap::Parser;
use commands::{Command, execute, render_schedule};
use deskmate_config::{DeskmateConfig, LayeredConfigOptions};
use deskmate_core::Assistant;
use deskmate_protocol::Notifier;
use deskmate_store::FileStore;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Environment variable overriding `gateway.model`.
const MODEL_ENV: &str = "DESKMATE_MODEL";
/// Environment variable supplying the chat API key when none is saved.
const API_KEY_ENV: &str = "DESKMATE_API_KEY";

/// Command-line options for Deskmate.
#[derive(Parser)]
#[command(name = "deskmate", version, about = "Personal office assistant")]
struct Cli {
    /// Optional path to a deskmate.json5 config file (highest precedence layer)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Store directory override
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    /// Chat model override
    #[arg(long, global = true)]
    model: Option<String>,
    /// Defaults to `shell`
    #[command(subcommand)]
    command: Option<Command>,
}

/// Prints reminders to the terminal as they fire.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        info!("reminder fired: {message}");
        println!("\n[reminder] {message}");
    }
}

/// Entry point for the Deskmate CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    deskmate::init_logging();

    let cli = Cli::parse();
    info!(
        "starting deskmate (config_set={}, store_set={}, model_set={})",
        cli.config.is_some(),
        cli.store.is_some(),
        cli.model.is_some()
    );
    let config = load_config(&cli)?;
    let store_path = config.store.resolved_path();
    debug!("opening store (path={})", store_path.display());
    let store = FileStore::new(&store_path)
        .with_context(|| format!("failed to open store at {}", store_path.display()))?;

    let mut builder = Assistant::builder(Arc::new(store))
        .config(config)
        .notifier(Arc::new(ConsoleNotifier));
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        builder = builder.fallback_credential(key);
    }
    let mut assistant = builder.build().context("failed to start assistant")?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => shell::run(&mut assistant).await?,
        Command::Watch => watch(&assistant).await?,
        command => {
            let output = execute(&mut assistant, command).await?;
            println!("{output}");
        }
    }
    Ok(())
}

/// Layered config with CLI and environment overrides applied.
fn load_config(cli: &Cli) -> anyhow::Result<DeskmateConfig> {
    let cwd = std::env::current_dir().context("cwd")?;
    let mut options = LayeredConfigOptions::new(&cwd);
    if let Some(path) = cli.config.as_ref() {
        info!("loading config from path: {}", path.display());
        options = options.with_runtime_path(path);
    }
    let layered = DeskmateConfig::load_layered_with_options(options)
        .context("failed to load layered config")?;
    debug!("layered config loaded (layers={})", layered.layers.len());

    let mut config = layered.config;
    if let Some(store) = cli.store.as_ref() {
        config.store.path = Some(store.display().to_string());
    }
    if let Some(model) = cli
        .model
        .clone()
        .or_else(|| std::env::var(MODEL_ENV).ok())
        .filter(|model| !model.trim().is_empty())
    {
        config.gateway.model = model;
    }
    Ok(config)
}

/// Keep the process alive until every armed reminder has fired or Ctrl-C.
async fn watch(assistant: &Assistant) -> anyhow::Result<()> {
    println!(
        "{}",
        render_schedule(&assistant.sorted_tasks(), assistant.reminders())
    );
    if assistant.active_reminders() == 0 {
        println!("No upcoming reminders.");
        return Ok(());
    }
    println!(
        "Waiting for {} reminder(s). Press Ctrl-C to stop.",
        assistant.active_reminders()
    );
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl-C")?;
                info!("watch interrupted");
                break;
            }
            _ = ticker.tick() => {
                if assistant.active_reminders() == 0 {
                    println!("All reminders delivered.");
                    break;
                }
            }
        }
    }
    Ok(())
}
