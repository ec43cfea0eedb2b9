use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use quickdef_config::Config;
use quickdef_core::settings::API_KEY;
use quickdef_types::{Request, Response};
use tokio::io::BufReader;
use tokio::signal;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod settings;
pub mod state;
pub mod ui;


use self::controller::AppController;
use self::settings::JsonSettingsStore;
use self::state::AppState;

#[derive(Parser)]
#[command(
    name = "quickdef",
    about = "Dictionary definitions and explain-like-I'm-five lookups"
)]
struct Cli {
    /// Config profile to load
    #[arg(long, default_value = "main")]
    profile: String,
    /// Log level, overridden by RUST_LOG
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Print raw JSON responses
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Look up the definition of a word
    Lookup { word: String },
    /// Explain a word like you're five
    Explain { word: String },
    /// Save the language-model API key
    SetKey { key: String },
    /// Read words from stdin, `?word` to explain
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = profile::quickdef_root()?;
    profile::init_user_config(&root)?;
    let config = profile::load_user_profile(&root, &cli.profile)?;
    let settings = Arc::new(JsonSettingsStore::open(profile::settings_path(&root))?);

    match cli.command {
        Command::SetKey { key } => {
            settings.set(API_KEY, key.trim())?;
            println!("API key saved to {}", settings.path().display());
            Ok(())
        }
        Command::Lookup { word } => {
            let state = build_state(config, settings)?;
            let response = state.service.handle(Request::fetch_word_data(&word)).await;
            print_and_exit(&word, &response, cli.json)
        }
        Command::Explain { word } => {
            let state = build_state(config, settings)?;
            let response = state
                .service
                .handle(Request::explain_like_five(&word))
                .await;
            print_and_exit(&word, &response, cli.json)
        }
        Command::Interactive => run_interactive(build_state(config, settings)?, cli.json).await,
    }
}

fn build_state(
    config: Config,
    settings: Arc<JsonSettingsStore>,
) -> anyhow::Result<Arc<AppState>> {
    let state = AppState::new(config, settings)?;
    tracing::debug!(
        dictionary = %state.config.dictionary.api_url,
        explainer = %state.config.explainer.api_url,
        "lookup service ready"
    );
    Ok(Arc::new(state))
}

fn print_and_exit(word: &str, response: &Response, json: bool) -> anyhow::Result<()> {
    println!("{}", ui::render_response(word, response, json)?);
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_interactive(state: Arc<AppState>, json: bool) -> anyhow::Result<()> {
    if atty::is(atty::Stream::Stdin) {
        eprintln!("Type a word to look it up, ?word to explain it, :quit to leave.");
    }

    let controller = AppController::new(state, json);
    let mut tasks = controller.spawn_tasks(BufReader::new(tokio::io::stdin()));

    let interrupted = tokio::select! {
        _ = join_all(&mut tasks) => false,
        _ = signal::ctrl_c() => true,
    };

    if interrupted {
        tracing::info!("Shutdown requested");
        controller.shutdown();
        // Give in-flight lookups a moment to print
        let _ = tokio::time::timeout(Duration::from_secs(2), join_all(&mut tasks)).await;
        // A pending stdin read cannot be cancelled, exit instead of waiting on it
        std::process::exit(130);
    }

    Ok(())
}

async fn join_all(tasks: &mut JoinSet<anyhow::Result<()>>) {
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task exited with error: {e}"),
            Err(e) => tracing::error!("task panicked: {e}"),
        }
    }
}
