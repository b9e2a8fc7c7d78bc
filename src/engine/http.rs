// Xyna Engine — HTTP retry and circuit breaker
//
// Transport helpers for the remote generation provider. Backoff doubles from
// 1s up to 30s with ±25% jitter over at most 3 retries; 429 and 5xx are
// retried, auth failures never are. Five consecutive failures open the
// circuit for 60s.

use crate::atoms::traits::ProviderError;
use log::warn;
use parking_lot::Mutex;
use rand::Rng;
use reqwest::Client;
use std::time::{Duration, Instant};

pub const MAX_RETRIES: u32 = 3;
pub const CIRCUIT_THRESHOLD: u32 = 5;
pub const CIRCUIT_COOLDOWN_SECS: u64 = 60;

const INITIAL_RETRY_DELAY_MS: u64 = 1_000;
const MAX_RETRY_DELAY_MS: u64 = 30_000;
const MIN_RETRY_DELAY_MS: u64 = 100;
const MAX_RETRY_AFTER_SECS: u64 = 60;

/// Transient statuses worth another attempt.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

/// Backoff for `attempt` (0-based) before jitter. A server-supplied
/// `Retry-After` (capped at 60s) wins when it is longer.
pub fn backoff_ms(attempt: u32, retry_after_secs: Option<u64>) -> u64 {
    let capped = INITIAL_RETRY_DELAY_MS
        .saturating_mul(2u64.saturating_pow(attempt))
        .min(MAX_RETRY_DELAY_MS);
    match retry_after_secs {
        Some(secs) => (secs.min(MAX_RETRY_AFTER_SECS) * 1000).max(capped),
        None => capped,
    }
}

/// Sleep for the jittered backoff and return how long we slept.
pub async fn retry_delay(attempt: u32, retry_after_secs: Option<u64>) -> Duration {
    let delay = Duration::from_millis(apply_jitter(backoff_ms(attempt, retry_after_secs)));
    tokio::time::sleep(delay).await;
    delay
}

fn apply_jitter(base_ms: u64) -> u64 {
    let factor: f64 = rand::thread_rng().gen_range(0.75..=1.25);
    ((base_ms as f64 * factor).round() as u64).max(MIN_RETRY_DELAY_MS)
}

/// Integer seconds only; HTTP-date values fall back to computed backoff.
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    header_value.trim().parse().ok()
}

/// Build the shared client. No timeout unless the caller configures one.
pub fn build_client(timeout_secs: Option<u64>) -> reqwest::Result<Client> {
    let builder = Client::builder();
    match timeout_secs {
        Some(secs) => builder.timeout(Duration::from_secs(secs)),
        None => builder,
    }
    .build()
}

// ── Circuit Breaker ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct BreakerState {
    failures: u32,
    open_until: Option<Instant>,
}

/// Opens after `threshold` consecutive failures and rejects requests until
/// the cooldown has passed; the next request after that is a trial.
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    cooldown: Duration,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CIRCUIT_THRESHOLD, Duration::from_secs(CIRCUIT_COOLDOWN_SECS))
    }
}

impl CircuitBreaker {
    pub fn new(threshold: u32, cooldown: Duration) -> Self {
        Self { state: Mutex::new(BreakerState::default()), threshold, cooldown }
    }

    /// Transport error while open.
    pub fn check(&self) -> Result<(), ProviderError> {
        let state = self.state.lock();
        match state.open_until {
            Some(until) if Instant::now() < until => Err(ProviderError::Transport(format!(
                "circuit open after {} consecutive failures, retry in {}s",
                state.failures,
                until.saturating_duration_since(Instant::now()).as_secs() + 1
            ))),
            _ => Ok(()),
        }
    }

    pub fn record_success(&self) {
        *self.state.lock() = BreakerState::default();
    }

    pub fn record_failure(&self) {
        let mut state = self.state.lock();
        state.failures += 1;
        if state.failures >= self.threshold {
            state.open_until = Some(Instant::now() + self.cooldown);
            warn!("[http] Circuit open after {} failures for {:?}", state.failures, self.cooldown);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        for status in [429, 500, 502, 503, 504, 529] {
            assert!(is_retryable_status(status), "{}", status);
        }
        for status in [200, 400, 401, 403, 404] {
            assert!(!is_retryable_status(status), "{}", status);
        }
    }

    #[test]
    fn backoff_doubles_and_caps() {
        assert_eq!(backoff_ms(0, None), 1_000);
        assert_eq!(backoff_ms(2, None), 4_000);
        assert_eq!(backoff_ms(10, None), 30_000);
        assert_eq!(backoff_ms(0, Some(5)), 5_000);
        assert_eq!(backoff_ms(0, Some(600)), 60_000);
    }

    #[test]
    fn retry_after_accepts_seconds_only() {
        assert_eq!(parse_retry_after(" 30 "), Some(30));
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
    }

    #[test]
    fn jitter_within_a_quarter() {
        for base in [1_000u64, 4_000, 30_000] {
            for _ in 0..20 {
                let ms = apply_jitter(base);
                assert!(ms >= base * 3 / 4 && ms <= base * 5 / 4, "{} -> {}", base, ms);
            }
        }
        assert!(apply_jitter(0) >= MIN_RETRY_DELAY_MS);
    }

    #[test]
    fn breaker_opens_at_threshold_and_resets_on_success() {
        let cb = CircuitBreaker::new(3, Duration::from_secs(60));
        cb.record_failure();
        cb.record_failure();
        assert!(cb.check().is_ok());
        cb.record_failure();
        assert!(matches!(cb.check(), Err(ProviderError::Transport(_))));
        cb.record_success();
        assert!(cb.check().is_ok());
    }

    #[test]
    fn breaker_lets_a_trial_through_after_cooldown() {
        let cb = CircuitBreaker::new(1, Duration::ZERO);
        cb.record_failure();
        assert!(cb.check().is_ok());
    }

    #[test]
    fn client_builds() {
        assert!(build_client(None).is_ok());
        assert!(build_client(Some(5)).is_ok());
    }
}
