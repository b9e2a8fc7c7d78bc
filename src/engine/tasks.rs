// Xyna Engine — Task Decomposer
//
// Heuristic breakdown of compound tasks into actions, targets, conditions and
// step runs, plus category detection and executable step generation. The
// reasoning strings are derived strictly from the counts computed here.

use crate::atoms::constants::{
    COMMUNICATION_PLATFORMS, COMMUNICATION_SUGGESTION, LAUNCHABLE_APPS, MEDIA_SUGGESTION,
    MESSAGE_BODY_MARKER, TASK_ACTION_WORDS,
};
use crate::atoms::types::{StepIntent, StepSlots, TaskAnalysis, TaskDecomposition, TaskType};
use crate::engine::markers::{after_last, contains_any};
use log::debug;

fn is_action_word(token: &str) -> bool {
    TASK_ACTION_WORDS.contains(&token)
}

/// Tokenise on whitespace and extract actions, targets, condition span and
/// the action-delimited step runs.
pub fn analyze_task(task: &str) -> TaskAnalysis {
    let lower = task.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let actions: Vec<String> = tokens
        .iter()
        .filter(|t| is_action_word(t))
        .map(|t| t.to_string())
        .collect();

    // Target = token after the FIRST occurrence of each action, so a repeated
    // action repeats its first target.
    let targets: Vec<String> = actions
        .iter()
        .filter_map(|action| {
            let idx = tokens.iter().position(|t| *t == action.as_str())?;
            tokens.get(idx + 1).map(|t| t.to_string())
        })
        .collect();

    let mut conditions = Vec::new();
    if let Some(idx) = tokens.iter().position(|t| *t == "if") {
        let end = tokens.iter().position(|t| *t == "then").unwrap_or(tokens.len());
        let span = tokens.get(idx + 1..end).map(|s| s.join(" ")).unwrap_or_default();
        conditions.push(span);
    }

    let mut sequence = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for token in &tokens {
        if is_action_word(token) && !current.is_empty() {
            sequence.push(current.join(" "));
            current.clear();
        }
        current.push(*token);
    }
    if !current.is_empty() {
        sequence.push(current.join(" "));
    }

    let reasoning = vec![
        format!("This task involves {} main actions: {}", actions.len(), actions.join(", ")),
        format!("The primary targets are: {}", targets.join(", ")),
        format!(
            "This appears to be a {}{}task",
            if conditions.is_empty() { "" } else { "conditional " },
            if sequence.len() > 1 { "multi-step " } else { "single-step " }
        ),
    ];

    TaskAnalysis { actions, targets, conditions, sequence, reasoning }
}

/// Categories whose keyword list intersects the text (substring match).
pub fn detect_task_types(task: &str) -> Vec<TaskType> {
    let lower = task.to_lowercase();
    TaskType::ALL
        .iter()
        .copied()
        .filter(|t| contains_any(&lower, t.keywords()))
        .collect()
}

/// Analyse, categorise, and generate executable steps plus suggestions.
pub fn decompose_task(task: &str) -> TaskDecomposition {
    let analysis = analyze_task(task);
    let lower = task.to_lowercase();
    let task_types = detect_task_types(&lower);
    let mut steps = Vec::new();

    if task_types.contains(&TaskType::Media) && lower.contains("youtube") {
        steps.push(StepIntent {
            action: "youtube_search".into(),
            slots: StepSlots::Search { query: after_last(&lower, "youtube").trim().to_string() },
            reasoning: "User wants to find content on YouTube".into(),
        });
    }

    if task_types.contains(&TaskType::Communication) {
        for platform in COMMUNICATION_PLATFORMS {
            if !lower.contains(platform) {
                continue;
            }
            let parts: Vec<&str> = after_last(&lower, platform).split(MESSAGE_BODY_MARKER).collect();
            if let [recipient, message] = parts.as_slice() {
                steps.push(StepIntent {
                    action: format!("{}_message", platform),
                    slots: StepSlots::Message {
                        recipient: recipient.trim().to_string(),
                        message: message.trim().to_string(),
                    },
                    reasoning: format!("User wants to send a {} message", platform),
                });
            }
        }
    }

    if task_types.contains(&TaskType::Navigation) {
        for app in LAUNCHABLE_APPS {
            if lower.contains(app) {
                steps.push(StepIntent {
                    action: "launch_app".into(),
                    slots: StepSlots::Launch { app: app.to_string() },
                    reasoning: format!("User wants to use {}", app),
                });
            }
        }
    }

    let mut suggestions = Vec::new();
    if task_types.contains(&TaskType::Media) {
        suggestions.push(MEDIA_SUGGESTION.to_string());
    }
    if task_types.contains(&TaskType::Communication) {
        suggestions.push(COMMUNICATION_SUGGESTION.to_string());
    }

    debug!(
        "[tasks] '{}' → types {:?}, {} steps",
        lower,
        task_types,
        steps.len()
    );

    TaskDecomposition { analysis, task_types, steps, suggestions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_of_compound_task() {
        let a = analyze_task("Open YouTube then play jazz");
        assert_eq!(a.actions, vec!["open", "play"]);
        assert_eq!(a.targets, vec!["youtube", "jazz"]);
        assert_eq!(a.sequence, vec!["open youtube then", "play jazz"]);
        assert!(a.conditions.is_empty());
        assert_eq!(a.reasoning[0], "This task involves 2 main actions: open, play");
        assert_eq!(a.reasoning[1], "The primary targets are: youtube, jazz");
        assert_eq!(a.reasoning[2], "This appears to be a multi-step task");
    }

    #[test]
    fn repeated_action_reuses_first_target() {
        let a = analyze_task("open mail open calendar");
        assert_eq!(a.targets, vec!["mail", "mail"]);
    }

    #[test]
    fn trailing_action_has_no_target() {
        let a = analyze_task("music play");
        assert_eq!(a.actions, vec!["play"]);
        assert!(a.targets.is_empty());
        // leading non-action tokens form their own run
        assert_eq!(a.sequence, vec!["music", "play"]);
    }

    #[test]
    fn condition_span_until_then() {
        let a = analyze_task("if it rains then turn on lights");
        assert_eq!(a.conditions, vec!["it rains"]);
        assert_eq!(a.reasoning[2], "This appears to be a conditional multi-step task");

        let open_ended = analyze_task("set alarm if i oversleep");
        assert_eq!(open_ended.conditions, vec!["i oversleep"]);
    }

    #[test]
    fn empty_task() {
        let a = analyze_task("");
        assert!(a.actions.is_empty() && a.sequence.is_empty());
        assert_eq!(a.reasoning[2], "This appears to be a single-step task");
    }

    #[test]
    fn task_types_are_independent() {
        let types = detect_task_types("play a video and send it");
        assert_eq!(types, vec![TaskType::Media, TaskType::Communication]);
    }

    #[test]
    fn decompose_youtube_and_whatsapp() {
        let d = decompose_task("search youtube lofi and send whatsapp to ana saying listen");
        let actions: Vec<&str> = d.steps.iter().map(|s| s.action.as_str()).collect();
        assert_eq!(actions, vec!["youtube_search", "whatsapp_message"]);
        assert_eq!(
            d.steps[1].slots,
            StepSlots::Message { recipient: "to ana".into(), message: "listen".into() }
        );
        assert_eq!(d.suggestions, vec![MEDIA_SUGGESTION, COMMUNICATION_SUGGESTION]);
    }

    #[test]
    fn communication_needs_exactly_one_saying() {
        let d = decompose_task("send email to bob");
        assert!(d.steps.is_empty());
        assert_eq!(d.task_types, vec![TaskType::Communication]);
    }

    #[test]
    fn navigation_launches_each_app() {
        let d = decompose_task("go to instagram");
        assert_eq!(d.task_types, vec![TaskType::Navigation]);
        assert_eq!(d.steps.len(), 1);
        assert_eq!(d.steps[0].slots, StepSlots::Launch { app: "instagram".into() });
        assert_eq!(d.steps[0].reasoning, "User wants to use instagram");
    }

    #[test]
    fn step_json_is_flat() {
        let d = decompose_task("go to facebook");
        let v = serde_json::to_value(&d.steps[0]).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"action": "launch_app", "app": "facebook", "reasoning": "User wants to use facebook"})
        );
    }
}
