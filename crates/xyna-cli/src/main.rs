// xyna — terminal front-end for the Xyna engine.

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use xyna::atoms::constants::VECTORIZER_FILE;
use xyna::atoms::types::{Activity, HistoryTurn};
use xyna::engine::capabilities::Capabilities;
use xyna::engine::config::AssistantConfig;
use xyna::engine::connected::ConnectedAssistant;
use xyna::engine::hybrid::HybridAssistant;
use xyna::engine::knowledge::KnowledgeStore;
use xyna::engine::offline::OfflineAssistant;
use xyna::engine::vectorizer::TfidfVectorizer;
use xyna::engine::{logging, providers, summary};
use xyna::{analyze_emotion, decompose_task, process_command, EngineError, EngineResult};

#[derive(Parser, Debug)]
#[command(name = "xyna", version, about = "Personal-assistant command interpreter")]
struct Cli {
    /// Config file (default ~/.xyna/config.toml)
    #[arg(long, global = true, env = "XYNA_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an utterance into an action intent (JSON)
    Command { text: Vec<String> },
    /// Break a compound task into analysis, categories and steps (JSON)
    Decompose { text: Vec<String> },
    /// Score the emotions expressed in a text (JSON)
    Emotion { text: Vec<String> },
    /// Answer a message through the online/offline chain
    Chat {
        text: Vec<String>,
        /// Skip the remote model entirely
        #[arg(long)]
        offline: bool,
        /// JSON array of prior turns: [{"type":"USER","content":"…"}, …]
        #[arg(long)]
        history: Option<PathBuf>,
        /// Image to attach to the remote request
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Summarise a JSON array of activity records
    Summary { file: PathBuf },
    /// Fit the cache vectorizer on every stored question
    FitVectorizer,
}

fn print_json<T: Serialize>(value: &T) -> EngineResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> EngineResult<T> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

async fn chat(
    config: &AssistantConfig,
    text: &str,
    offline_only: bool,
    history: Option<PathBuf>,
    image: Option<PathBuf>,
) -> EngineResult<()> {
    let history: Vec<HistoryTurn> = match &history {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let store = Arc::new(KnowledgeStore::open_in_dir(&config.cache_dir)?);
    let offline = OfflineAssistant::new(Capabilities::load(&config.cache_dir), Some(store))
        .with_similarity_threshold(config.similarity_threshold)
        .with_qa_context_chars(config.qa_context_chars);

    let connected = if offline_only || config.openrouter.api_key.is_empty() {
        info!("[cli] Running offline only");
        None
    } else {
        Some(
            ConnectedAssistant::new(providers::from_config(config)?, &config.openrouter)
                .with_history_window(config.history_window),
        )
    };

    let hybrid = HybridAssistant::new(connected, offline)
        .with_recheck_interval(Duration::from_secs(config.online_recheck_secs));
    let response = hybrid.process_input(text, &history, image.as_deref()).await;
    print_json(&response)
}

fn fit_vectorizer(config: &AssistantConfig) -> EngineResult<()> {
    let store = KnowledgeStore::open_in_dir(&config.cache_dir)?;
    let questions: Vec<String> = store.entries()?.into_iter().map(|e| e.question).collect();
    if questions.is_empty() {
        return Err(EngineError::Other("knowledge cache is empty, nothing to fit".into()));
    }
    let vectorizer = TfidfVectorizer::fit(&questions);
    vectorizer.save(&config.cache_dir.join(VECTORIZER_FILE))?;
    println!("Fitted {} terms on {} questions", vectorizer.vocabulary_len(), questions.len());
    Ok(())
}

#[tokio::main]
async fn main() -> EngineResult<()> {
    logging::init(LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Command::Command { text } => print_json(&process_command(&text.join(" "))),
        Command::Decompose { text } => print_json(&decompose_task(&text.join(" "))),
        Command::Emotion { text } => print_json(&analyze_emotion(&text.join(" "))),
        Command::Summary { file } => {
            let activities: Vec<Activity> = read_json(&file)?;
            let day = summary::summarize_day(&activities);
            println!("{}", day.formatted_summary);
            Ok(())
        }
        Command::Chat { text, offline, history, image } => {
            let config = AssistantConfig::load(cli.config.as_deref())?;
            chat(&config, &text.join(" "), offline, history, image).await
        }
        Command::FitVectorizer => fit_vectorizer(&AssistantConfig::load(cli.config.as_deref())?),
    }
}
