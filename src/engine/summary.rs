// Xyna Engine — Daily Activity Summary
// Aggregates tracked activity records into metrics, insights and a
// human-readable digest. Missing fields count as zero/absent.

use crate::atoms::constants::{DAILY_STEP_GOAL, SCREEN_TIME_WARNING_SECS};
use crate::atoms::types::{Activity, DailyMetrics, DailySummary};
use std::collections::HashSet;

const SCREEN_TIME_INSIGHT: &str = "High screen time detected. Consider taking more breaks.";
const STEPS_INSIGHT: &str = "Daily step count is below recommended. Try to move more.";

fn is_kind(activity: &Activity, kind: &str) -> bool {
    activity.kind.as_deref() == Some(kind)
}

fn in_category(activity: &Activity, category: &str) -> bool {
    activity.category.as_deref() == Some(category)
}

/// Saturating total; record values come from untrusted JSON.
fn saturating_total(values: impl Iterator<Item = u64>) -> u64 {
    values.fold(0u64, |acc, v| acc.saturating_add(v))
}

fn total_duration<'a>(activities: impl Iterator<Item = &'a Activity>) -> u64 {
    saturating_total(activities.map(|a| a.duration.unwrap_or(0)))
}

pub fn compute_metrics(activities: &[Activity]) -> DailyMetrics {
    let screen_time = total_duration(activities.iter().filter(|a| is_kind(a, "screen")));
    let productive_time = total_duration(activities.iter().filter(|a| in_category(a, "productive")));
    let entertainment_time = total_duration(activities.iter().filter(|a| in_category(a, "entertainment")));
    let apps: HashSet<&str> = activities
        .iter()
        .filter_map(|a| a.app_name.as_deref())
        .filter(|name| !name.is_empty())
        .collect();

    let percentage = |part: u64| (screen_time > 0).then(|| part as f64 / screen_time as f64 * 100.0);

    DailyMetrics {
        screen_time,
        steps: saturating_total(
            activities
                .iter()
                .filter(|a| is_kind(a, "movement"))
                .map(|a| a.steps.unwrap_or(0)),
        ),
        notifications: activities.iter().filter(|a| is_kind(a, "notification")).count(),
        apps_used: apps.len(),
        productive_time,
        entertainment_time,
        productive_percentage: percentage(productive_time),
        entertainment_percentage: percentage(entertainment_time),
    }
}

pub fn insights(metrics: &DailyMetrics) -> Vec<String> {
    let mut out = Vec::new();
    if metrics.screen_time > SCREEN_TIME_WARNING_SECS {
        out.push(SCREEN_TIME_INSIGHT.to_string());
    }
    if metrics.steps < DAILY_STEP_GOAL {
        out.push(STEPS_INSIGHT.to_string());
    }
    out
}

/// Metrics, insights and the formatted digest for one day.
pub fn summarize_day(activities: &[Activity]) -> DailySummary {
    let metrics = compute_metrics(activities);
    let insights = insights(&metrics);
    let insights_text: String = insights.iter().map(|i| format!("- {}\n", i)).collect();

    let formatted_summary = format!(
        "Daily Summary:\n\
         - Screen Time: {} hours {} minutes\n\
         - Steps: {}\n\
         - Notifications: {}\n\
         - Apps Used: {}\n\
         - Productive Time: {} hours\n\
         - Entertainment Time: {} hours\n\
         \n\
         Insights:\n\
         {}",
        metrics.screen_time / 3600,
        (metrics.screen_time % 3600) / 60,
        metrics.steps,
        metrics.notifications,
        metrics.apps_used,
        metrics.productive_time / 3600,
        metrics.entertainment_time / 3600,
        insights_text
    );

    DailySummary { metrics, insights, formatted_summary }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(kind: &str) -> Activity {
        Activity { kind: Some(kind.into()), ..Activity::default() }
    }

    fn day() -> Vec<Activity> {
        vec![
            Activity { duration: Some(5 * 3600), app_name: Some("docs".into()), category: Some("productive".into()), ..activity("screen") },
            Activity { duration: Some(4 * 3600 + 30 * 60), app_name: Some("video".into()), category: Some("entertainment".into()), ..activity("screen") },
            Activity { steps: Some(3200), ..activity("movement") },
            Activity { steps: Some(1000), ..activity("movement") },
            Activity { app_name: Some("docs".into()), ..activity("notification") },
            activity("notification"),
        ]
    }

    #[test]
    fn metrics_aggregate_by_type_and_category() {
        let m = compute_metrics(&day());
        assert_eq!(m.screen_time, 9 * 3600 + 1800);
        assert_eq!(m.steps, 4200);
        assert_eq!(m.notifications, 2);
        assert_eq!(m.apps_used, 2);
        assert_eq!(m.productive_time, 5 * 3600);
        let pct = m.productive_percentage.unwrap();
        assert!((pct - 5.0 / 9.5 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn both_insights_fire() {
        let s = summarize_day(&day());
        assert_eq!(s.insights, vec![SCREEN_TIME_INSIGHT, STEPS_INSIGHT]);
        assert!(s.formatted_summary.starts_with("Daily Summary:\n- Screen Time: 9 hours 30 minutes\n"));
        assert!(s.formatted_summary.contains("- Entertainment Time: 4 hours\n\nInsights:\n- High screen time"));
    }

    #[test]
    fn empty_day_has_no_percentages() {
        let s = summarize_day(&[]);
        assert_eq!(s.metrics.productive_percentage, None);
        assert_eq!(s.insights, vec![STEPS_INSIGHT]);
        let json = serde_json::to_value(&s.metrics).unwrap();
        assert!(json.get("productive_percentage").is_none());
    }

    #[test]
    fn activity_json_uses_type_key() {
        let parsed: Vec<Activity> =
            serde_json::from_str(r#"[{"type":"movement","steps":6000},{"type":"screen","duration":60}]"#).unwrap();
        let s = summarize_day(&parsed);
        assert_eq!(s.metrics.steps, 6000);
        assert!(s.insights.is_empty());
    }

    #[test]
    fn huge_totals_saturate_instead_of_overflowing() {
        let screen = Activity { duration: Some(u64::MAX), category: Some("productive".into()), ..activity("screen") };
        let walk = Activity { steps: Some(u64::MAX), ..activity("movement") };
        let s = summarize_day(&[screen.clone(), screen, walk.clone(), walk]);
        assert_eq!(s.metrics.screen_time, u64::MAX);
        assert_eq!(s.metrics.productive_time, u64::MAX);
        assert_eq!(s.metrics.steps, u64::MAX);
        assert_eq!(s.insights, vec![SCREEN_TIME_INSIGHT]);
    }
}
