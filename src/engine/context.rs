// Xyna Engine — Context Extraction
// Scans a raw utterance for time, location, app, multi-step and conditional
// cues. Every scan is a plain substring check; markers and apps are walked in
// their fixed order and a later hit overwrites an earlier one.

use crate::atoms::constants::{LOCATION_MARKERS, TIME_MARKERS};
use crate::atoms::types::{AppContext, ContextBundle};
use crate::engine::markers::split_on_first_marker;

/// Build the context bundle for one utterance.
pub fn extract_context(text: &str) -> ContextBundle {
    let command = text.trim().to_lowercase();
    ContextBundle {
        time_context: last_marker_token(&command, TIME_MARKERS),
        location_context: last_marker_token(&command, LOCATION_MARKERS),
        app_context: last_app(&command),
        action_sequence: action_sequence(&command),
        conditions: conditions(&command),
    }
}

/// For every marker present, the first token after its first occurrence;
/// the last marker in list order that yields a token wins.
fn last_marker_token(command: &str, markers: &[&'static str]) -> Option<String> {
    let mut found = None;
    for marker in markers {
        let Some(split) = split_on_first_marker(command, &[*marker]) else {
            continue;
        };
        if let Some(token) = split.first_segment().split_whitespace().next() {
            found = Some(token.to_string());
        }
    }
    found
}

fn last_app(command: &str) -> Option<AppContext> {
    AppContext::ALL
        .iter()
        .copied()
        .filter(|app| command.contains(app.as_str()))
        .last()
}

fn action_sequence(command: &str) -> Vec<String> {
    let separator = if command.contains(" and ") {
        " and "
    } else if command.contains(" then ") {
        " then "
    } else {
        return Vec::new();
    };
    command.split(separator).map(|s| s.trim().to_string()).collect()
}

fn conditions(command: &str) -> Vec<String> {
    command
        .split_once(" if ")
        .map(|(_, condition)| vec![condition.to_string()])
        .unwrap_or_default()
}
