// ── Xyna Atoms: Pure Data Types ───────────────────────────────────────────────
// All plain struct/enum definitions with no logic beyond accessors.
// Atoms layer rule: no I/O, no side effects, no imports from engine/.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ── Context bundle ─────────────────────────────────────────────────────────

/// Apps the context extractor recognises, in scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppContext {
    Youtube,
    Whatsapp,
    Instagram,
    Facebook,
    Twitter,
}

impl AppContext {
    pub const ALL: [AppContext; 5] = [
        AppContext::Youtube,
        AppContext::Whatsapp,
        AppContext::Instagram,
        AppContext::Facebook,
        AppContext::Twitter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppContext::Youtube => "youtube",
            AppContext::Whatsapp => "whatsapp",
            AppContext::Instagram => "instagram",
            AppContext::Facebook => "facebook",
            AppContext::Twitter => "twitter",
        }
    }
}

impl fmt::Display for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best-effort situational metadata extracted from one utterance.
/// Built once per request and shared read-only by every derived intent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContextBundle {
    pub time_context: Option<String>,
    pub location_context: Option<String>,
    pub app_context: Option<AppContext>,
    pub action_sequence: Vec<String>,
    pub conditions: Vec<String>,
}

// ── Action intents ─────────────────────────────────────────────────────────

/// One structured device/application action. Serialises with an `action`
/// tag, e.g. `{"action":"launch_app","app":"whatsapp"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionIntent {
    AnalyzeEnvironment {
        use_front_camera: bool,
    },
    Sequence {
        steps: Vec<ActionIntent>,
        context: Arc<ContextBundle>,
    },
    Conditional {
        main_action: Box<ActionIntent>,
        condition: String,
        context: Arc<ContextBundle>,
    },
    YoutubeSearch {
        query: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    YoutubePlay {
        video_id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    WhatsappMessage {
        contact: Option<String>,
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    InstagramProfile {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    FacebookProfile {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    TwitterProfile {
        username: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    LaunchApp {
        app: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    AppNavigation {
        app: AppContext,
        navigation_action: String,
        target: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        context: Option<Arc<ContextBundle>>,
    },
    MakeCall {
        contact: String,
    },
    SendMessage {
        contact: String,
        message: String,
    },
    SendEmail {
        recipient: String,
        subject: String,
        body: String,
    },
    CreateReminder {
        task: String,
        time: Option<String>,
    },
    CreateCalendarEvent {
        event: String,
        start_time: Option<String>,
        duration_minutes: Option<u32>,
    },
    ToggleWifi {
        enable: bool,
    },
    ToggleBluetooth {
        enable: bool,
    },
    SetVolume {
        value: u32,
    },
    SetBrightness {
        value: u32,
    },
    WebSearch {
        query: String,
    },
    Navigate {
        location: String,
    },
    MediaPlay,
    MediaPause,
    MediaNext,
    MediaPrevious,
    MediaStop,
    GetBatteryInfo,
    UnknownCommand {
        original_command: String,
    },
}

impl ActionIntent {
    /// The `action` tag this intent serialises under.
    pub fn action(&self) -> &'static str {
        match self {
            ActionIntent::AnalyzeEnvironment { .. } => "analyze_environment",
            ActionIntent::Sequence { .. } => "sequence",
            ActionIntent::Conditional { .. } => "conditional",
            ActionIntent::YoutubeSearch { .. } => "youtube_search",
            ActionIntent::YoutubePlay { .. } => "youtube_play",
            ActionIntent::WhatsappMessage { .. } => "whatsapp_message",
            ActionIntent::InstagramProfile { .. } => "instagram_profile",
            ActionIntent::FacebookProfile { .. } => "facebook_profile",
            ActionIntent::TwitterProfile { .. } => "twitter_profile",
            ActionIntent::LaunchApp { .. } => "launch_app",
            ActionIntent::AppNavigation { .. } => "app_navigation",
            ActionIntent::MakeCall { .. } => "make_call",
            ActionIntent::SendMessage { .. } => "send_message",
            ActionIntent::SendEmail { .. } => "send_email",
            ActionIntent::CreateReminder { .. } => "create_reminder",
            ActionIntent::CreateCalendarEvent { .. } => "create_calendar_event",
            ActionIntent::ToggleWifi { .. } => "toggle_wifi",
            ActionIntent::ToggleBluetooth { .. } => "toggle_bluetooth",
            ActionIntent::SetVolume { .. } => "set_volume",
            ActionIntent::SetBrightness { .. } => "set_brightness",
            ActionIntent::WebSearch { .. } => "web_search",
            ActionIntent::Navigate { .. } => "navigate",
            ActionIntent::MediaPlay => "media_play",
            ActionIntent::MediaPause => "media_pause",
            ActionIntent::MediaNext => "media_next",
            ActionIntent::MediaPrevious => "media_previous",
            ActionIntent::MediaStop => "media_stop",
            ActionIntent::GetBatteryInfo => "get_battery_info",
            ActionIntent::UnknownCommand { .. } => "unknown_command",
        }
    }

    /// The context bundle this intent was derived under, when it carries one.
    pub fn context(&self) -> Option<&Arc<ContextBundle>> {
        match self {
            ActionIntent::Sequence { context, .. } | ActionIntent::Conditional { context, .. } => {
                Some(context)
            }
            ActionIntent::YoutubeSearch { context, .. }
            | ActionIntent::YoutubePlay { context, .. }
            | ActionIntent::WhatsappMessage { context, .. }
            | ActionIntent::InstagramProfile { context, .. }
            | ActionIntent::FacebookProfile { context, .. }
            | ActionIntent::TwitterProfile { context, .. }
            | ActionIntent::LaunchApp { context, .. }
            | ActionIntent::AppNavigation { context, .. } => context.as_ref(),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, ActionIntent::UnknownCommand { .. })
    }
}

// ── Task decomposition ─────────────────────────────────────────────────────

/// Heuristic breakdown of a compound task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAnalysis {
    pub actions: Vec<String>,
    pub targets: Vec<String>,
    pub conditions: Vec<String>,
    pub sequence: Vec<String>,
    pub reasoning: Vec<String>,
}

/// Task category labels. Categories are independent; a task may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Media,
    Communication,
    Navigation,
    System,
    Information,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::Media,
        TaskType::Communication,
        TaskType::Navigation,
        TaskType::System,
        TaskType::Information,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Media => "media",
            TaskType::Communication => "communication",
            TaskType::Navigation => "navigation",
            TaskType::System => "system",
            TaskType::Information => "information",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            TaskType::Media => &["play", "watch", "listen", "search", "find"],
            TaskType::Communication => &["send", "message", "call", "email", "text"],
            TaskType::Navigation => &["go", "open", "navigate", "directions"],
            TaskType::System => &["set", "turn", "change", "adjust"],
            TaskType::Information => &["check", "tell", "show", "what"],
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot payload of a decomposed step. Flattened into the step's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepSlots {
    Search { query: String },
    Message { recipient: String, message: String },
    Launch { app: String },
}

/// One executable step produced by task decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepIntent {
    pub action: String,
    #[serde(flatten)]
    pub slots: StepSlots,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDecomposition {
    pub analysis: TaskAnalysis,
    pub task_types: Vec<TaskType>,
    pub steps: Vec<StepIntent>,
    pub suggestions: Vec<String>,
}

// ── Emotion scoring ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Sadness,
    Anger,
    Fear,
    Surprise,
    Neutral,
}

impl Emotion {
    /// Fixed enumeration order; also the tie-break order for the dominant emotion.
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Anger => "anger",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionProfile {
    pub dominant_emotion: Emotion,
    pub intensity: f64,
    pub emotion_scores: BTreeMap<Emotion, f64>,
    pub confidence: f64,
    pub word_count: usize,
    pub emotional_words: f64,
}

// ── Knowledge cache ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub created_at: String,
}

// ── Conversation history ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TurnKind {
    User,
    Assistant,
}

/// One prior conversation turn as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryTurn {
    #[serde(rename = "type")]
    pub kind: TurnKind,
    pub content: String,
}

impl HistoryTurn {
    pub fn user(content: impl Into<String>) -> Self {
        HistoryTurn { kind: TurnKind::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        HistoryTurn { kind: TurnKind::Assistant, content: content.into() }
    }
}

/// Situational summary derived from recent user turns, sent to the remote
/// model as a system message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryContext {
    pub time_of_day: u32,
    pub recent_topics: Vec<String>,
    pub ongoing_tasks: Vec<String>,
    pub location_context: Option<String>,
}

// ── Remote generation wire types ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

impl Message {
    pub fn text(role: Role, content: impl Into<String>) -> Self {
        Message { role, content: MessageContent::Text(content.into()) }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: String },
}

/// Body of one chat-completion request.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
}

// ── Orchestrator results ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Online,
    Offline,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub text: String,
    pub source: ResponseSource,
    pub confidence: f32,
}

// ── Daily activity summary ─────────────────────────────────────────────────

/// One tracked activity record. Durations are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub steps: Option<u64>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyMetrics {
    pub screen_time: u64,
    pub steps: u64,
    pub notifications: usize,
    pub apps_used: usize,
    pub productive_time: u64,
    pub entertainment_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub productive_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entertainment_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub metrics: DailyMetrics,
    pub insights: Vec<String>,
    pub formatted_summary: String,
}
