// Xyna Engine — Connected Assistant
//
// Online mode. A task that decomposes into executable steps is answered
// locally with a synthesized plan and the steps are dispatched to the action
// executor; anything else goes to the remote model with the persona prompt,
// a situational context message, the full history and the current turn.

use crate::atoms::constants::{
    DEFAULT_HISTORY_WINDOW, LOCATION_CUE_WORDS, SYSTEM_PROMPT, TASK_CUE_WORDS, TOPIC_MIN_CHARS,
};
use crate::atoms::error::EngineResult;
use crate::atoms::traits::{ActionExecutor, ChatProvider};
use crate::atoms::types::{
    ChatRequest, ContentBlock, HistoryContext, HistoryTurn, Message, MessageContent, Role,
    TaskDecomposition, TurnKind,
};
use crate::engine::config::OpenRouterConfig;
use crate::engine::markers::contains_any;
use crate::engine::tasks::decompose_task;
use base64::Engine as _;
use chrono::Timelike;
use log::{info, warn};
use std::path::Path;

/// Default executor: records each dispatched action in the log.
pub struct LoggingExecutor;

impl ActionExecutor for LoggingExecutor {
    fn execute(&self, action: &serde_json::Value) {
        info!("[executor] {}", action);
    }
}

pub struct ConnectedAssistant {
    provider: Box<dyn ChatProvider>,
    executor: Box<dyn ActionExecutor>,
    model: String,
    temperature: f64,
    max_tokens: u32,
    history_window: usize,
}

impl ConnectedAssistant {
    pub fn new(provider: Box<dyn ChatProvider>, config: &OpenRouterConfig) -> Self {
        Self {
            provider,
            executor: Box::new(LoggingExecutor),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            history_window: DEFAULT_HISTORY_WINDOW,
        }
    }

    pub fn with_executor(mut self, executor: impl ActionExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    pub fn with_history_window(mut self, turns: usize) -> Self {
        self.history_window = turns;
        self
    }

    /// Answer `input`, converting any failure into an apology string.
    pub async fn process_input(&self, input: &str, history: &[HistoryTurn], image: Option<&Path>) -> String {
        match self.try_process_input(input, history, image).await {
            Ok(text) => text,
            Err(e) => {
                warn!("[connected] Failed to answer: {}", e);
                format!("I encountered an error: {}", e)
            }
        }
    }

    pub async fn try_process_input(
        &self,
        input: &str,
        history: &[HistoryTurn],
        image: Option<&Path>,
    ) -> EngineResult<String> {
        let decomposition = decompose_task(input);
        if !decomposition.steps.is_empty() {
            let plan = render_plan(&decomposition);
            for step in &decomposition.steps {
                self.executor.execute(&serde_json::to_value(step)?);
            }
            info!("[connected] Dispatched {} steps", decomposition.steps.len());
            return Ok(plan);
        }

        let request = ChatRequest {
            model: self.model.clone(),
            messages: build_messages(input, history, image, self.history_window)?,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        Ok(self.provider.complete(&request).await?)
    }
}

/// Recap line, numbered step reasoning, then suggestions when present.
pub fn render_plan(decomposition: &TaskDecomposition) -> String {
    let types: Vec<&str> = decomposition.task_types.iter().map(|t| t.as_str()).collect();
    let mut parts = vec![format!("I understand you want to {}.", types.join(" and "))];
    parts.push("\nHere's my plan:".to_string());
    for (i, step) in decomposition.steps.iter().enumerate() {
        parts.push(format!("{}. {}", i + 1, step.reasoning));
    }
    if !decomposition.suggestions.is_empty() {
        parts.push("\nSuggestions:".to_string());
        parts.extend(decomposition.suggestions.iter().map(|s| format!("- {}", s)));
    }
    parts.join("\n")
}

/// Summarise the user turns among the last `window` history turns.
pub fn analyze_history_context(history: &[HistoryTurn], window: usize, hour: u32) -> HistoryContext {
    let mut context = HistoryContext { time_of_day: hour, ..HistoryContext::default() };
    let start = history.len().saturating_sub(window);
    for turn in history[start..].iter().filter(|t| t.kind == TurnKind::User) {
        let lower = turn.content.to_lowercase();
        context.recent_topics.extend(
            lower
                .split_whitespace()
                .filter(|w| w.chars().count() > TOPIC_MIN_CHARS)
                .map(str::to_string),
        );
        if contains_any(&lower, TASK_CUE_WORDS) {
            context.ongoing_tasks.push(turn.content.clone());
        }
        if contains_any(&lower, LOCATION_CUE_WORDS) {
            context.location_context = Some(turn.content.clone());
        }
    }
    context
}

/// Persona prompt, context summary, full history, then the current turn
/// (with an inline base64 JPEG when an image path is given).
pub fn build_messages(
    input: &str,
    history: &[HistoryTurn],
    image: Option<&Path>,
    window: usize,
) -> EngineResult<Vec<Message>> {
    let mut messages = vec![Message::text(Role::System, SYSTEM_PROMPT)];

    let context = analyze_history_context(history, window, chrono::Local::now().hour());
    messages.push(Message::text(
        Role::System,
        format!("Current context: {}", serde_json::to_string_pretty(&context)?),
    ));

    for turn in history {
        let role = match turn.kind {
            TurnKind::User => Role::User,
            TurnKind::Assistant => Role::Assistant,
        };
        messages.push(Message::text(role, turn.content.clone()));
    }

    match image {
        Some(path) => {
            let encoded = base64::engine::general_purpose::STANDARD.encode(std::fs::read(path)?);
            messages.push(Message {
                role: Role::User,
                content: MessageContent::Blocks(vec![
                    ContentBlock::Text { text: input.to_string() },
                    ContentBlock::ImageUrl { image_url: format!("data:image/jpeg;base64,{}", encoded) },
                ]),
            });
        }
        None => messages.push(Message::text(Role::User, input)),
    }
    Ok(messages)
}
