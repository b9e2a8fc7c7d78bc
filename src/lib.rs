// Xyna — personal-assistant command interpreter.
//
// Turns free-text utterances into structured device-action intents, or into
// natural-language replies through an online-first, cache-backed fallback
// chain.
//
//   atoms/   pure types, constants, capability traits, errors
//   engine/  behavior

pub mod atoms;
pub mod engine;

pub use atoms::error::{EngineError, EngineResult};
pub use atoms::types::{ActionIntent, AssistantResponse, ContextBundle, HistoryTurn};
pub use engine::commands::{process_command, process_command_json};
pub use engine::emotion::analyze_emotion;
pub use engine::tasks::{analyze_task, decompose_task};
