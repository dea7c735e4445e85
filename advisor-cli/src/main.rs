//! CLI entry point for advisor

mod detection_log;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info, warn};

use advisor_client::{ChatClient, DetectionClient};
use advisor_core::config::{Config, ConfigLoader};
use advisor_core::logging::init_logging;
use advisor_core::session::{FileHistoryStore, HistoryStore, MemoryHistoryStore, SessionManager};
use advisor_core::utils::expand_tilde;

use detection_log::DetectionLog;
use render::Renderer;

/// Upload limit for detection samples
const MAX_DETECT_FILE_BYTES: u64 = 1024 * 1024;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(about = "A terminal client for the AI advisor service")]
#[command(version = "0.2.3")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Display name for your side of the conversation
        #[arg(short, long)]
        username: Option<String>,
        /// Keep this conversation out of the stored history
        #[arg(short, long)]
        ephemeral: bool,
        /// Override the configured service base URL
        #[arg(short, long)]
        base_url: Option<String>,
    },
    /// Send one question and print the reply
    Ask {
        /// The question to send
        message: String,
        /// Override the configured service base URL
        #[arg(short, long)]
        base_url: Option<String>,
    },
    /// Show the stored conversation
    History,
    /// Delete the stored conversation
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Analyze a text file for AI-generated content
    Detect {
        /// Text file to analyze
        file: PathBuf,
        /// Override the configured service base URL
        #[arg(short, long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };
    let config = config_loader.load()?;

    // The guard must outlive all logging or buffered file output is lost
    let _log_guard = init_logging(&config.logging);

    match cli.command {
        Commands::Chat {
            username,
            ephemeral,
            base_url,
        } => {
            info!("Starting interactive chat");
            run_chat(&config, username, ephemeral, base_url).await?;
        }
        Commands::Ask { message, base_url } => {
            info!("Sending one-shot question");
            run_ask(&config, &message, base_url).await?;
        }
        Commands::History => {
            run_history(&config)?;
        }
        Commands::Clear { yes } => {
            run_clear(&config, yes)?;
        }
        Commands::Detect { file, base_url } => {
            info!("Analyzing {}", file.display());
            run_detect(&config, &file, base_url).await?;
        }
    }

    Ok(())
}

/// Resolve the service base URL, command line beats config
fn resolve_base_url(config: &Config, override_url: Option<String>) -> String {
    override_url.unwrap_or_else(|| config.api.base_url.clone())
}

/// History store rooted at the configured storage directory
fn open_store(config: &Config) -> FileHistoryStore {
    FileHistoryStore::new(expand_tilde(&config.storage.dir))
}

fn spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Run the interactive chat loop
async fn run_chat(
    config: &Config,
    username: Option<String>,
    ephemeral: bool,
    base_url: Option<String>,
) -> Result<()> {
    let username = match username {
        Some(name) => name,
        None => Input::<String>::new()
            .with_prompt("Display name")
            .default("You".to_string())
            .interact_text()?,
    };

    let store: Box<dyn HistoryStore> = if ephemeral {
        Box::new(MemoryHistoryStore::new())
    } else {
        Box::new(open_store(config))
    };
    let mut manager = SessionManager::new(store);

    let client = ChatClient::new(&resolve_base_url(config, base_url), config.api.timeout_secs);
    let renderer = Renderer::new(username.as_str());

    println!("{}", style("AI Advisor").bold().cyan());
    println!(
        "Ask your question. {} wipes the conversation, {} leaves.\n",
        style("/clear").cyan(),
        style("/quit").cyan()
    );

    for message in manager.session().messages() {
        renderer.message(message);
    }

    loop {
        let line: String = Input::<String>::new()
            .with_prompt(username.as_str())
            .allow_empty(true)
            .interact_text()?;

        // Commands match on the trimmed view; submitted text stays raw
        match line.trim() {
            "" => continue,
            "/quit" => break,
            "/clear" => {
                manager.clear()?;
                println!("{} Conversation cleared", style("✓").green().bold());
                continue;
            }
            _ => {}
        }

        let bar = spinner("Generating response...");
        let outcome = manager.ask(&client, &line).await;
        bar.finish_and_clear();

        match outcome {
            Ok(_) => {
                if let Some(message) = manager.session().last_message() {
                    renderer.message(message);
                }
            }
            Err(_) => {
                // The failure detail is parked in the session status
                if let Some(detail) = manager.session().error_detail() {
                    render::error_banner(detail);
                }
            }
        }
    }

    Ok(())
}

/// Send a single question against the stored conversation
async fn run_ask(config: &Config, message: &str, base_url: Option<String>) -> Result<()> {
    let mut manager = SessionManager::new(Box::new(open_store(config)));
    let client = ChatClient::new(&resolve_base_url(config, base_url), config.api.timeout_secs);

    println!("{}", style("Processing...").cyan());

    match manager.ask(&client, message).await {
        Ok(reply) => {
            println!("\n{}", style("Response:").bold());
            render::content(&reply);
        }
        Err(e) => {
            error!("Request failed: {}", e);
            anyhow::bail!("Failed to get a response: {}", e);
        }
    }

    Ok(())
}

/// Print the stored conversation
fn run_history(config: &Config) -> Result<()> {
    let store = open_store(config);
    let messages = store.load();
    if messages.is_empty() {
        println!("No stored conversation.");
        return Ok(());
    }

    let renderer = Renderer::new("You");
    for message in &messages {
        renderer.message(message);
    }
    println!("{}", style(format!("{} messages", messages.len())).dim());

    Ok(())
}

/// Delete the stored conversation
fn run_clear(config: &Config, yes: bool) -> Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete the stored conversation?")
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let store = open_store(config);
    store.clear()?;
    println!(
        "{} Conversation history deleted",
        style("✓").green().bold()
    );

    Ok(())
}

/// Analyze a text file and record the outcome
async fn run_detect(config: &Config, file: &Path, base_url: Option<String>) -> Result<()> {
    let metadata = std::fs::metadata(file)
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", file.display(), e))?;
    if metadata.len() > MAX_DETECT_FILE_BYTES {
        anyhow::bail!("File size exceeds 1MB limit");
    }
    let text = std::fs::read_to_string(file)?;

    let client = DetectionClient::new(&resolve_base_url(config, base_url), config.api.timeout_secs);

    let bar = spinner("Analyzing...");
    let outcome = client.detect(&text).await;
    bar.finish_and_clear();

    match outcome {
        Ok(report) => {
            render::report(&report);

            let log = DetectionLog::new(expand_tilde(&config.storage.dir));
            if let Err(e) = log.append(&text, &report) {
                warn!("Could not record detection result: {}", e);
            }
        }
        Err(e) => {
            error!("Detection failed: {}", e);
            anyhow::bail!("Detection failed: {}", e);
        }
    }

    Ok(())
}
