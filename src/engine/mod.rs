// Xyna Engine — command interpretation and response fallback
//
// Module layout:
//   timeparse     — relative/clock time phrases and durations
//   markers       — ordered-marker substring splitting
//   context       — ContextBundle extraction
//   intents       — single-segment intent cascade
//   commands      — top-level segmenter (environment / sequence / conditional)
//   tasks         — task analysis and decomposition
//   emotion       — lexicon emotion scoring
//   embedding     — cosine similarity
//   vectorizer    — native TF-IDF vectorizer
//   knowledge     — append-only SQLite knowledge cache
//   capabilities  — optional model bundle
//   offline       — cache → QA → generator → template chain
//   http          — retry/backoff and circuit breaker
//   providers     — remote chat-completion backends
//   connected     — plan synthesis or remote generation
//   hybrid        — online-first router with offline fallback
//   summary       — daily activity digest
//   config        — TOML + env configuration
//   logging       — env_logger setup for hosts

pub mod capabilities;
pub mod commands;
pub mod config;
pub mod connected;
pub mod context;
pub mod embedding;
pub mod emotion;
pub mod http;
pub mod hybrid;
pub mod intents;
pub mod knowledge;
pub mod logging;
pub mod markers;
pub mod offline;
pub mod providers;
pub mod summary;
pub mod tasks;
pub mod timeparse;
pub mod vectorizer;
