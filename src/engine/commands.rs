// Xyna Engine — Command Segmenter (top-level dispatch)
//
// Decides whether an utterance is a vision request, a sequence, a
// conditional, or a single command, and routes each segment through the
// intent matcher. One ContextBundle is built per call and shared (Arc) by
// every intent derived from it.
//
// Dispatch order, first match wins:
//   1. environment/vision phrase → analyze_environment
//   2. non-empty action_sequence → sequence of independently resolved steps
//   3. non-empty conditions      → conditional over the text before " if "
//   4. otherwise                 → the whole text as one segment

use crate::atoms::constants::{ENVIRONMENT_PHRASES, FRONT_CAMERA_WORDS};
use crate::atoms::types::ActionIntent;
use crate::engine::context::extract_context;
use crate::engine::intents::resolve_segment;
use crate::engine::markers::contains_any;
use log::info;
use std::sync::Arc;

/// Interpret one raw utterance. Never fails: unresolved text comes back as
/// `unknown_command`.
pub fn process_command(text: &str) -> ActionIntent {
    let command = text.trim().to_lowercase();

    if contains_any(&command, ENVIRONMENT_PHRASES) {
        return ActionIntent::AnalyzeEnvironment {
            use_front_camera: contains_any(&command, FRONT_CAMERA_WORDS),
        };
    }

    let context = Arc::new(extract_context(&command));

    if !context.action_sequence.is_empty() {
        let steps: Vec<ActionIntent> = context
            .action_sequence
            .iter()
            .map(|segment| resolve_segment(segment, Some(&context)))
            .collect();
        info!("[commands] Sequence of {} steps", steps.len());
        return ActionIntent::Sequence { steps, context };
    }

    if let Some(condition) = context.conditions.first() {
        let head = command.split(" if ").next().unwrap_or(&command);
        let main_action = resolve_segment(head, Some(&context));
        info!("[commands] Conditional {} if '{}'", main_action.action(), condition);
        return ActionIntent::Conditional {
            main_action: Box::new(main_action),
            condition: condition.clone(),
            context: Arc::clone(&context),
        };
    }

    resolve_segment(&command, Some(&context))
}

/// Interpret and serialise to the JSON shape the execution layer consumes.
pub fn process_command_json(text: &str) -> serde_json::Value {
    let intent = process_command(text);
    serde_json::to_value(&intent).unwrap_or_else(|e| {
        serde_json::json!({ "action": intent.action(), "error": e.to_string() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::types::AppContext;

    #[test]
    fn environment_phrases_take_priority() {
        assert_eq!(
            process_command("Look around and tell me"),
            ActionIntent::AnalyzeEnvironment { use_front_camera: false }
        );
        assert_eq!(
            process_command("what do you see with the selfie cam"),
            ActionIntent::AnalyzeEnvironment { use_front_camera: true }
        );
    }

    #[test]
    fn sequence_steps_share_one_context() {
        let intent = process_command("play music on youtube and send whatsapp message to sam saying hello");
        let ActionIntent::Sequence { steps, context } = intent else {
            panic!("expected sequence");
        };
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].action(), "youtube_play");
        assert_eq!(
            steps[1],
            ActionIntent::WhatsappMessage {
                contact: Some("sam".into()),
                message: Some("hello".into()),
                context: Some(Arc::clone(&context)),
            }
        );
        assert_eq!(context.app_context, Some(AppContext::Whatsapp));
        for step in &steps {
            assert!(Arc::ptr_eq(step.context().unwrap(), &context));
        }
    }

    #[test]
    fn conditional_resolves_head() {
        let intent = process_command("turn on bluetooth if my headphones are nearby");
        let ActionIntent::Conditional { main_action, condition, .. } = intent else {
            panic!("expected conditional");
        };
        assert_eq!(*main_action, ActionIntent::ToggleBluetooth { enable: true });
        assert_eq!(condition, "my headphones are nearby");
    }

    #[test]
    fn sequence_beats_conditional() {
        let intent = process_command("open maps and navigate to work if it rains");
        assert_eq!(intent.action(), "sequence");
    }

    #[test]
    fn single_commands() {
        assert_eq!(
            process_command("open whatsapp"),
            ActionIntent::LaunchApp {
                app: "whatsapp".into(),
                context: Some(Arc::new(extract_context("open whatsapp"))),
            }
        );
        assert_eq!(
            process_command("xyzzy plugh"),
            ActionIntent::UnknownCommand { original_command: "xyzzy plugh".into() }
        );
    }

    #[test]
    fn json_shape_is_action_tagged() {
        let v = process_command_json("send whatsapp message to john saying hi");
        assert_eq!(v["action"], "whatsapp_message");
        assert_eq!(v["contact"], "john");
        assert_eq!(v["message"], "hi");
        assert!(v["context"].is_object());

        let unknown = process_command_json("xyzzy plugh");
        assert_eq!(unknown, serde_json::json!({"action": "unknown_command", "original_command": "xyzzy plugh"}));
    }
}
