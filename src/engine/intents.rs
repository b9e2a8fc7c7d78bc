// Xyna Engine — Intent Pattern Matcher
//
// Resolves ONE command segment into one ActionIntent. The cascade is an
// ordered rule table: each rule either produces an intent or declines, and
// the first rule that produces one wins. Input is expected lower-cased; it is
// normalised again here so callers can pass raw segments.
//
// Rule order (do not reorder — precedence is observable behavior):
//   media → whatsapp → social profiles → app navigation (context-driven)
//   → call → message → email → reminder → calendar → wifi → bluetooth
//   → volume/brightness → open → search → navigate → media controls → battery

use crate::atoms::constants::*;
use crate::atoms::types::{ActionIntent, AppContext, ContextBundle};
use crate::engine::markers::{after_last, contains_any, first_present, split_on_first_marker};
use crate::engine::timeparse::{parse_duration, parse_time, to_iso};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};

type Ctx<'a> = Option<&'a Arc<ContextBundle>>;

// ── Rule table ─────────────────────────────────────────────────────────────

struct IntentRule {
    name: &'static str,
    check: fn(&str, Ctx<'_>) -> Option<ActionIntent>,
}

static RULES: &[IntentRule] = &[
    IntentRule { name: "media", check: media_rule },
    IntentRule { name: "whatsapp", check: whatsapp_rule },
    IntentRule { name: "social", check: social_rule },
    IntentRule { name: "app_navigation", check: app_navigation_rule },
    IntentRule { name: "call", check: call_rule },
    IntentRule { name: "message", check: message_rule },
    IntentRule { name: "email", check: email_rule },
    IntentRule { name: "reminder", check: reminder_rule },
    IntentRule { name: "calendar", check: calendar_rule },
    IntentRule { name: "wifi", check: wifi_rule },
    IntentRule { name: "bluetooth", check: bluetooth_rule },
    IntentRule { name: "setting", check: setting_rule },
    IntentRule { name: "open", check: open_rule },
    IntentRule { name: "search", check: search_rule },
    IntentRule { name: "navigate", check: navigate_rule },
    IntentRule { name: "media_control", check: media_control_rule },
    IntentRule { name: "battery", check: battery_rule },
];

/// Resolve one segment. Unmatched input yields `unknown_command` carrying the
/// normalised text.
pub fn resolve_segment(segment: &str, context: Ctx<'_>) -> ActionIntent {
    let command = segment.trim().to_lowercase();
    for rule in RULES {
        if let Some(intent) = (rule.check)(&command, context) {
            debug!("[intents] '{}' matched rule '{}' → {}", command, rule.name, intent.action());
            return intent;
        }
    }
    debug!("[intents] '{}' matched no rule", command);
    ActionIntent::UnknownCommand { original_command: command }
}

// ── Anchored phrase patterns ───────────────────────────────────────────────

static PHRASES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    let patterns = [
        ("call", r"^(call|dial|phone)\s+(.+)"),
        ("message", r"^(message|text|send message to)\s+(.+?)\s+saying\s+(.+)"),
        ("email", r"^(email|send email to)\s+(.+?)\s+about\s+(.+?)\s+saying\s+(.+)"),
        ("reminder", r"^remind me to\s+(.+?)\s+(at|in)\s+(.+)"),
        ("calendar", r"^schedule\s+(.+?)\s+for\s+(.+?)\s+for\s+(.+)"),
        ("setting", r"^set (volume|brightness) to (\d+)(?:percent)?"),
        ("open", r"^open\s+(.+)"),
        ("search", r"^search( for)?\s+(.+)"),
        ("navigate", r"^(navigate|directions) to\s+(.+)"),
    ];

    patterns
        .into_iter()
        .filter_map(|(name, pattern)| match Regex::new(pattern) {
            Ok(regex) => Some((name, regex)),
            Err(e) => {
                warn!("[intents] Failed to compile phrase pattern '{}': {}", name, e);
                None
            }
        })
        .collect()
});

fn phrase<'t>(name: &str, text: &'t str) -> Option<Captures<'t>> {
    PHRASES
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, re)| re.captures(text))
}

fn group(caps: &Captures<'_>, i: usize) -> String {
    caps.get(i).map(|m| m.as_str().to_string()).unwrap_or_default()
}

// ── Rules 1–4: app-specific, carry the context bundle ─────────────────────

fn media_rule(command: &str, context: Ctx<'_>) -> Option<ActionIntent> {
    if !contains_any(command, MEDIA_KEYWORDS) {
        return None;
    }
    if command.contains("search") || command.contains("find") {
        Some(ActionIntent::YoutubeSearch {
            query: extract_search_query(command),
            context: context.cloned(),
        })
    } else if command.contains("play") {
        Some(ActionIntent::YoutubePlay {
            video_id: extract_content(command),
            context: context.cloned(),
        })
    } else {
        None
    }
}

fn whatsapp_rule(command: &str, context: Ctx<'_>) -> Option<ActionIntent> {
    if !command.contains("whatsapp") {
        return None;
    }
    if command.contains("message") || command.contains("send") {
        let (contact, message) = extract_message_details(command);
        Some(ActionIntent::WhatsappMessage { contact, message, context: context.cloned() })
    } else if command.contains("open") {
        Some(ActionIntent::LaunchApp { app: "whatsapp".into(), context: context.cloned() })
    } else {
        None
    }
}

fn social_rule(command: &str, context: Ctx<'_>) -> Option<ActionIntent> {
    for platform in SOCIAL_PLATFORMS {
        if !command.contains(platform) {
            continue;
        }
        if command.contains("profile") {
            let username = extract_username(command);
            let context = context.cloned();
            return Some(match *platform {
                "instagram" => ActionIntent::InstagramProfile { username, context },
                "facebook" => ActionIntent::FacebookProfile { username, context },
                _ => ActionIntent::TwitterProfile { username, context },
            });
        }
        if command.contains("open") {
            return Some(ActionIntent::LaunchApp { app: platform.to_string(), context: context.cloned() });
        }
    }
    None
}

fn app_navigation_rule(command: &str, context: Ctx<'_>) -> Option<ActionIntent> {
    let ctx = context?;
    let app: AppContext = ctx.app_context?;
    Some(ActionIntent::AppNavigation {
        app,
        navigation_action: extract_action(command).to_string(),
        target: extract_target(command),
        context: Some(Arc::clone(ctx)),
    })
}

// ── Rule 5: structured phrases and device controls ────────────────────────

fn call_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("call", command)?;
    Some(ActionIntent::MakeCall { contact: group(&caps, 2) })
}

fn message_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("message", command)?;
    Some(ActionIntent::SendMessage { contact: group(&caps, 2), message: group(&caps, 3) })
}

fn email_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("email", command)?;
    Some(ActionIntent::SendEmail {
        recipient: group(&caps, 2),
        subject: group(&caps, 3),
        body: group(&caps, 4),
    })
}

fn reminder_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("reminder", command)?;
    // The captured phrase excludes the preposition, so "in 2 hours" resolves
    // "2 hours" and yields no time.
    Some(ActionIntent::CreateReminder {
        task: group(&caps, 1),
        time: parse_time(&group(&caps, 3)).map(|t| to_iso(&t)),
    })
}

fn calendar_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("calendar", command)?;
    Some(ActionIntent::CreateCalendarEvent {
        event: group(&caps, 1),
        start_time: parse_time(&group(&caps, 2)).map(|t| to_iso(&t)),
        duration_minutes: parse_duration(&group(&caps, 3)),
    })
}

fn wants_enable(command: &str) -> bool {
    command.contains("on") || command.contains("enable")
}

fn wifi_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    command
        .contains("wifi")
        .then(|| ActionIntent::ToggleWifi { enable: wants_enable(command) })
}

fn bluetooth_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    command
        .contains("bluetooth")
        .then(|| ActionIntent::ToggleBluetooth { enable: wants_enable(command) })
}

fn setting_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("setting", command)?;
    // the pattern only admits digits, so a failed parse is an overflow
    let value: u32 = caps.get(2)?.as_str().parse().unwrap_or(u32::MAX);
    match caps.get(1)?.as_str() {
        "volume" => Some(ActionIntent::SetVolume { value }),
        _ => Some(ActionIntent::SetBrightness { value }),
    }
}

fn open_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("open", command)?;
    Some(ActionIntent::LaunchApp { app: group(&caps, 1), context: None })
}

fn search_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("search", command)?;
    Some(ActionIntent::WebSearch { query: group(&caps, 2) })
}

fn navigate_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    let caps = phrase("navigate", command)?;
    Some(ActionIntent::Navigate { location: group(&caps, 2) })
}

fn media_control_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    match first_present(command, MEDIA_CONTROL_WORDS)? {
        "play" => Some(ActionIntent::MediaPlay),
        "pause" => Some(ActionIntent::MediaPause),
        "next" => Some(ActionIntent::MediaNext),
        "previous" => Some(ActionIntent::MediaPrevious),
        _ => Some(ActionIntent::MediaStop),
    }
}

fn battery_rule(command: &str, _: Ctx<'_>) -> Option<ActionIntent> {
    command.contains("battery").then_some(ActionIntent::GetBatteryInfo)
}

// ── Slot extractors ────────────────────────────────────────────────────────

/// Search query: text after the first present search marker, minus the
/// "on/in youtube" suffix. Whole command when no marker is present.
pub fn extract_search_query(command: &str) -> String {
    match split_on_first_marker(command, SEARCH_MARKERS) {
        Some(split) => split
            .after_last()
            .replace("on youtube", "")
            .replace("in youtube", "")
            .trim()
            .to_string(),
        None => command.to_string(),
    }
}

/// Content to play: text after the first present content marker, minus
/// "on youtube" and "video".
pub fn extract_content(command: &str) -> String {
    match split_on_first_marker(command, CONTENT_MARKERS) {
        Some(split) => split
            .after_last()
            .replace("on youtube", "")
            .replace("video", "")
            .trim()
            .to_string(),
        None => command.to_string(),
    }
}

/// (contact, message) for messaging commands. The contact runs from the first
/// contact marker up to "saying"; the message is whatever follows the last
/// "saying".
pub fn extract_message_details(command: &str) -> (Option<String>, Option<String>) {
    let contact = split_on_first_marker(command, CONTACT_MARKERS).map(|split| {
        let segment = split.first_segment();
        segment
            .split(MESSAGE_BODY_MARKER)
            .next()
            .unwrap_or(segment)
            .trim()
            .to_string()
    });
    let message = command
        .contains(MESSAGE_BODY_MARKER)
        .then(|| after_last(command, MESSAGE_BODY_MARKER).trim().to_string());
    (contact, message)
}

/// Username: text after the first present username marker, else the last token.
pub fn extract_username(command: &str) -> String {
    match split_on_first_marker(command, USERNAME_MARKERS) {
        Some(split) => split.after_last().trim().to_string(),
        None => last_token(command),
    }
}

/// Navigation verb: first present navigation action, default "open".
pub fn extract_action(command: &str) -> &'static str {
    first_present(command, NAVIGATION_ACTIONS).unwrap_or(DEFAULT_NAVIGATION_ACTION)
}

/// Navigation target: text after the located action, else the last token.
pub fn extract_target(command: &str) -> String {
    let action = extract_action(command);
    if command.contains(action) {
        after_last(command, action).trim().to_string()
    } else {
        last_token(command)
    }
}

fn last_token(command: &str) -> String {
    command.split_whitespace().last().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(text: &str) -> ActionIntent {
        resolve_segment(text, None)
    }

    #[test]
    fn youtube_search_strips_suffix() {
        match resolve("search for lofi beats on youtube") {
            ActionIntent::YoutubeSearch { query, .. } => assert_eq!(query, "lofi beats"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn youtube_play_extracts_content() {
        match resolve("play music on youtube") {
            ActionIntent::YoutubePlay { video_id, .. } => assert_eq!(video_id, "music"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn media_keyword_without_verb_falls_through() {
        // "watch" matches rule 1 but neither search nor play → later rules
        assert_eq!(resolve("set volume to 40 to watch"), ActionIntent::SetVolume { value: 40 });
    }

    #[test]
    fn whatsapp_message_and_open() {
        assert_eq!(
            resolve("send whatsapp message to john saying hi"),
            ActionIntent::WhatsappMessage {
                contact: Some("john".into()),
                message: Some("hi".into()),
                context: None,
            }
        );
        assert_eq!(
            resolve("open whatsapp"),
            ActionIntent::LaunchApp { app: "whatsapp".into(), context: None }
        );
    }

    #[test]
    fn whatsapp_message_without_saying() {
        assert_eq!(
            resolve("message mom on whatsapp"),
            ActionIntent::WhatsappMessage { contact: None, message: None, context: None }
        );
    }

    #[test]
    fn social_profiles() {
        assert_eq!(
            resolve("show instagram profile natgeo"),
            ActionIntent::InstagramProfile { username: "natgeo".into(), context: None }
        );
        assert_eq!(
            resolve("open twitter"),
            ActionIntent::LaunchApp { app: "twitter".into(), context: None }
        );
    }

    #[test]
    fn facebook_and_twitter_profiles() {
        assert_eq!(
            resolve("open facebook profile zuck"),
            ActionIntent::FacebookProfile { username: "zuck".into(), context: None }
        );
        assert_eq!(
            resolve("twitter profile jack"),
            ActionIntent::TwitterProfile { username: "jack".into(), context: None }
        );
    }

    #[test]
    fn username_markers_in_order() {
        assert_eq!(extract_username("twitter account jack"), "jack");
        assert_eq!(extract_username("instagram user natgeo"), "natgeo");
        // "profile" outranks "account"
        assert_eq!(extract_username("account settings profile ana"), "ana");
    }

    #[test]
    fn youtube_find_is_a_search() {
        match resolve("find cooking videos on youtube") {
            ActionIntent::YoutubeSearch { query, .. } => assert_eq!(query, "cooking videos"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn app_navigation_requires_context() {
        let ctx = Arc::new(ContextBundle {
            app_context: Some(AppContext::Instagram),
            ..Default::default()
        });
        match resolve_segment("show reels from instagram", Some(&ctx)) {
            ActionIntent::AppNavigation { app, navigation_action, target, context } => {
                assert_eq!(app, AppContext::Instagram);
                assert_eq!(navigation_action, "show");
                assert_eq!(target, "reels from instagram");
                assert!(Arc::ptr_eq(&context.unwrap(), &ctx));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn structured_phrases() {
        assert_eq!(resolve("call mom"), ActionIntent::MakeCall { contact: "mom".into() });
        assert_eq!(
            resolve("text alice saying running late"),
            ActionIntent::SendMessage { contact: "alice".into(), message: "running late".into() }
        );
        assert_eq!(
            resolve("email bob about budget saying see attached"),
            ActionIntent::SendEmail {
                recipient: "bob".into(),
                subject: "budget".into(),
                body: "see attached".into(),
            }
        );
    }

    #[test]
    fn reminder_with_clock_time() {
        match resolve("remind me to call mom at 5pm") {
            ActionIntent::CreateReminder { task, time } => {
                assert_eq!(task, "call mom");
                assert!(time.unwrap().ends_with("T17:00:00"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn reminder_time_phrase_drops_preposition() {
        assert_eq!(
            resolve("remind me to stretch in 2 hours"),
            ActionIntent::CreateReminder { task: "stretch".into(), time: None }
        );
        // the phrase itself may still carry "in"
        match resolve("remind me to stretch in in 2 hours") {
            ActionIntent::CreateReminder { task, time } => {
                assert_eq!(task, "stretch");
                assert!(time.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn calendar_event() {
        match resolve("schedule standup for 9:30 for 15 minutes") {
            ActionIntent::CreateCalendarEvent { event, start_time, duration_minutes } => {
                assert_eq!(event, "standup");
                assert!(start_time.unwrap().ends_with("T09:30:00"));
                assert_eq!(duration_minutes, Some(15));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn calendar_event_with_unparsable_time() {
        assert_eq!(
            resolve("schedule lunch for noon for 1 hour"),
            ActionIntent::CreateCalendarEvent {
                event: "lunch".into(),
                start_time: None,
                duration_minutes: Some(60),
            }
        );
    }

    #[test]
    fn device_toggles_use_substring_semantics() {
        assert_eq!(resolve("turn on wifi"), ActionIntent::ToggleWifi { enable: true });
        // "disconnect" contains "on"
        assert_eq!(resolve("disconnect bluetooth"), ActionIntent::ToggleBluetooth { enable: true });
        assert_eq!(resolve("disable bluetooth"), ActionIntent::ToggleBluetooth { enable: false });
        assert_eq!(resolve("kill wifi"), ActionIntent::ToggleWifi { enable: false });
    }

    #[test]
    fn settings() {
        assert_eq!(resolve("set brightness to 70percent"), ActionIntent::SetBrightness { value: 70 });
        assert_eq!(resolve("set volume to 30"), ActionIntent::SetVolume { value: 30 });
    }

    #[test]
    fn oversized_setting_value_saturates() {
        assert_eq!(
            resolve("set volume to 99999999999"),
            ActionIntent::SetVolume { value: u32::MAX }
        );
    }

    #[test]
    fn open_search_navigate() {
        assert_eq!(
            resolve("open calculator"),
            ActionIntent::LaunchApp { app: "calculator".into(), context: None }
        );
        assert_eq!(resolve("search for rust lifetimes"), ActionIntent::WebSearch { query: "rust lifetimes".into() });
        assert_eq!(resolve("directions to the airport"), ActionIntent::Navigate { location: "the airport".into() });
    }

    #[test]
    fn media_controls_take_first_listed_word() {
        assert_eq!(resolve("pause then play"), ActionIntent::MediaPlay);
        assert_eq!(resolve("skip to next track"), ActionIntent::MediaNext);
        assert_eq!(resolve("how much battery is left"), ActionIntent::GetBatteryInfo);
    }

    #[test]
    fn unknown_command_carries_normalised_text() {
        assert_eq!(
            resolve("  Xyzzy PLUGH "),
            ActionIntent::UnknownCommand { original_command: "xyzzy plugh".into() }
        );
    }

    #[test]
    fn extractor_fallbacks() {
        assert_eq!(extract_search_query("youtube"), "youtube");
        assert_eq!(extract_username("facebook dave"), "dave");
        assert_eq!(extract_action("youtube cats"), "open");
        assert_eq!(extract_target("youtube cats"), "cats");
    }
}
