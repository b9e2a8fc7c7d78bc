// ── Xyna Atoms: Constants ──────────────────────────────────────────────────
// All fixed vocabularies, marker lists, thresholds and templates live here.
// List ORDER is significant throughout: extractors and cascades iterate these
// slices front to back and several of them resolve ties by position.

// ── Context extraction markers ─────────────────────────────────────────────
// Iterated in order; a later marker that is also present overwrites the
// value assigned by an earlier one.
pub const TIME_MARKERS: &[&str] = &["at", "after", "before", "when", "during"];
pub const LOCATION_MARKERS: &[&str] = &["in", "at", "near", "to"];

// ── Environment / vision phrases ───────────────────────────────────────────
pub const ENVIRONMENT_PHRASES: &[&str] =
    &["see environment", "analyze surroundings", "look around", "what do you see"];
pub const FRONT_CAMERA_WORDS: &[&str] = &["front", "selfie"];

// ── Intent extraction markers ──────────────────────────────────────────────
pub const MEDIA_KEYWORDS: &[&str] = &["youtube", "video", "watch"];
pub const SEARCH_MARKERS: &[&str] = &["search for", "search", "find", "look for"];
pub const CONTENT_MARKERS: &[&str] = &["play", "watch", "start"];
pub const CONTACT_MARKERS: &[&str] = &["to", "for", "with"];
pub const USERNAME_MARKERS: &[&str] = &["profile", "account", "user"];
pub const NAVIGATION_ACTIONS: &[&str] = &["search", "find", "open", "go to", "show", "display"];
pub const DEFAULT_NAVIGATION_ACTION: &str = "open";
pub const SOCIAL_PLATFORMS: &[&str] = &["instagram", "facebook", "twitter"];
pub const MEDIA_CONTROL_WORDS: &[&str] = &["play", "pause", "next", "previous", "stop"];
pub const MESSAGE_BODY_MARKER: &str = "saying";

// ── Task decomposition vocabularies ────────────────────────────────────────
pub const TASK_ACTION_WORDS: &[&str] =
    &["open", "search", "send", "play", "find", "go", "check", "set", "turn", "make", "create"];
pub const COMMUNICATION_PLATFORMS: &[&str] = &["whatsapp", "message", "email"];
pub const LAUNCHABLE_APPS: &[&str] = &["youtube", "whatsapp", "instagram", "facebook"];
pub const MEDIA_SUGGESTION: &str = "Would you like me to adjust the volume or brightness?";
pub const COMMUNICATION_SUGGESTION: &str = "Should I set a reminder for follow-up?";

// ── Emotion lexicon ────────────────────────────────────────────────────────
pub const JOY_WORDS: &[&str] = &[
    "happy", "excited", "delighted", "pleased", "glad", "joyful", "love", "wonderful", "fantastic",
];
pub const SADNESS_WORDS: &[&str] =
    &["sad", "unhappy", "depressed", "down", "miserable", "hurt", "disappointed", "lonely"];
pub const ANGER_WORDS: &[&str] =
    &["angry", "furious", "irritated", "annoyed", "frustrated", "mad", "rage", "upset"];
pub const FEAR_WORDS: &[&str] =
    &["afraid", "scared", "worried", "anxious", "nervous", "terrified", "concerned"];
pub const SURPRISE_WORDS: &[&str] =
    &["surprised", "amazed", "astonished", "shocked", "stunned", "unexpected"];
pub const NEUTRAL_WORDS: &[&str] = &["okay", "fine", "normal", "average", "neutral", "alright"];

/// Intensity modifiers and the multiplier they apply to the next word.
pub const INTENSITY_MODIFIERS: &[(&str, f64)] = &[
    ("very", 2.0),
    ("really", 2.0),
    ("extremely", 3.0),
    ("somewhat", 0.5),
    ("slightly", 0.3),
];

// ── Offline rule fallbacks ─────────────────────────────────────────────────
pub const URGENT_WORDS: &[&str] = &["help", "emergency", "urgent"];
pub const QUESTION_WORDS: &[&str] = &["how", "what", "why", "when"];
pub const GREETING_WORDS: &[&str] = &["hello", "hi", "hey"];
pub const POSITIVE_WORDS: &[&str] = &["good", "great", "awesome", "happy", "love", "thanks"];
pub const NEGATIVE_WORDS: &[&str] = &["bad", "hate", "angry", "sad", "terrible", "worst"];
pub const TOPIC_STOP_WORDS: &[&str] = &["the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for"];
pub const DEFAULT_TOPIC: &str = "this topic";
pub const TOPIC_WORD_LIMIT: usize = 3;

/// Templated offline replies keyed by intent label. `{}` is replaced with
/// the extracted topic. Unknown labels use the `statement` set.
pub const FALLBACK_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "greeting",
        &[
            "Hello! I'm in offline mode but I'm here to help.",
            "Hi there! I'm running offline but I'll do my best to assist you.",
            "Namaste! I'm operating offline but ready to help!",
        ],
    ),
    (
        "question",
        &[
            "I understand you have a question about '{}'. While offline, I can provide basic assistance.",
            "I'll try to help with your question using my offline knowledge about '{}'.",
            "Let me attempt to answer that with my offline capabilities regarding '{}'.",
        ],
    ),
    (
        "urgent",
        &[
            "I notice this is urgent regarding '{}'. While offline, I'll do my best to help.",
            "This seems important about '{}'. I'm in offline mode but I'll try to assist.",
            "I understand the urgency about '{}'. Though offline, I'll help however I can.",
        ],
    ),
    (
        "statement",
        &[
            "I understand your point about '{}'. While offline, I can still engage in conversation.",
            "I'm listening to your thoughts on '{}', though I'm in offline mode.",
            "I hear what you're saying about '{}'. Even offline, I'm here to chat.",
        ],
    ),
];

// ── History context analysis ───────────────────────────────────────────────
pub const TASK_CUE_WORDS: &[&str] = &["remind", "schedule", "meeting", "task"];
pub const LOCATION_CUE_WORDS: &[&str] = &["at", "in", "near", "location"];
pub const TOPIC_MIN_CHARS: usize = 3;

// ── Cache / orchestration defaults ─────────────────────────────────────────
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;
pub const DEFAULT_HISTORY_WINDOW: usize = 10;
pub const DEFAULT_QA_CONTEXT_CHARS: usize = 1000;
pub const DEFAULT_ONLINE_RECHECK_SECS: u64 = 30;
pub const KNOWLEDGE_DB_FILE: &str = "knowledge.db";
pub const VECTORIZER_FILE: &str = "tfidf_vectorizer.json";

// ── Remote generation defaults ─────────────────────────────────────────────
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENROUTER_DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const OPENROUTER_REFERER: &str = "https://github.com/xyna-assistant/xyna";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

// ── Hybrid response confidence ─────────────────────────────────────────────
pub const ONLINE_CONFIDENCE: f32 = 0.9;
pub const OFFLINE_CONFIDENCE: f32 = 0.7;

// ── Daily summary thresholds ───────────────────────────────────────────────
pub const SCREEN_TIME_WARNING_SECS: u64 = 8 * 3600;
pub const DAILY_STEP_GOAL: u64 = 5000;

pub const SYSTEM_PROMPT: &str = "You are Xyna, an advanced AI assistant with complete control over the device. You can understand and execute any command, combining multiple actions intelligently.

Core Capabilities:
1. Full Device Control & Automation
2. Natural Language Understanding
3. Contextual Awareness
4. Multi-step Task Execution
5. Proactive Assistance
6. Learning from User Behavior

You should:
1. Think through complex requests step by step
2. Break down multi-part commands into logical sequences
3. Consider context and user preferences
4. Be proactive in suggesting related actions
5. Explain your reasoning when helpful
6. Confirm important actions before executing
7. Learn from user interactions

Example Interactions:
User: \"I'm going to a meeting\"
Response: Let me help prepare:
1. Checking your calendar for meeting details
2. Setting phone to vibrate
3. Creating quick notes template
4. Ensuring location is saved
5. Setting reminders if needed

User: \"I'm tired\"
Response: I'll help you wind down:
1. Dimming screen brightness
2. Enabling blue light filter
3. Setting do not disturb
4. Starting relaxing music
5. Setting gentle wake-up alarm

Always maintain context and remember previous interactions to provide more personalized assistance.";
