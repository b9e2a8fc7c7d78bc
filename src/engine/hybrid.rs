// Xyna Engine — Hybrid Router
//
// Prefers the connected assistant and falls back to the offline one. A
// provider or transport failure marks the router offline; connected mode is
// tried again once the recheck interval has elapsed. Successful online answers
// are appended to the shared knowledge cache under category "online".

use crate::atoms::constants::{DEFAULT_ONLINE_RECHECK_SECS, OFFLINE_CONFIDENCE, ONLINE_CONFIDENCE};
use crate::atoms::error::EngineError;
use crate::atoms::types::{AssistantResponse, HistoryTurn, ResponseSource};
use crate::engine::connected::ConnectedAssistant;
use crate::engine::offline::OfflineAssistant;
use log::{info, warn};
use parking_lot::Mutex;
use std::path::Path;
use std::time::{Duration, Instant};

pub struct HybridAssistant {
    connected: Option<ConnectedAssistant>,
    offline: OfflineAssistant,
    /// Set when connected mode last failed.
    offline_since: Mutex<Option<Instant>>,
    recheck: Duration,
}

impl HybridAssistant {
    pub fn new(connected: Option<ConnectedAssistant>, offline: OfflineAssistant) -> Self {
        Self {
            connected,
            offline,
            offline_since: Mutex::new(None),
            recheck: Duration::from_secs(DEFAULT_ONLINE_RECHECK_SECS),
        }
    }

    pub fn with_recheck_interval(mut self, interval: Duration) -> Self {
        self.recheck = interval;
        self
    }

    /// True while connected mode is unavailable or backing off.
    pub fn is_offline(&self) -> bool {
        self.connected.is_none() || !self.should_try_online()
    }

    fn should_try_online(&self) -> bool {
        match *self.offline_since.lock() {
            None => true,
            Some(since) => since.elapsed() >= self.recheck,
        }
    }

    pub async fn process_input(
        &self,
        input: &str,
        history: &[HistoryTurn],
        image: Option<&Path>,
    ) -> AssistantResponse {
        if let Some(connected) = self.connected.as_ref().filter(|_| self.should_try_online()) {
            match connected.try_process_input(input, history, image).await {
                Ok(text) => {
                    *self.offline_since.lock() = None;
                    self.cache_online(input, &text);
                    return AssistantResponse { text, source: ResponseSource::Online, confidence: ONLINE_CONFIDENCE };
                }
                Err(e @ (EngineError::Provider { .. } | EngineError::Network(_))) => {
                    warn!("[hybrid] Connected mode failed, switching offline: {}", e);
                    *self.offline_since.lock() = Some(Instant::now());
                }
                // a local failure (unreadable image) says nothing about the remote side
                Err(e) => warn!("[hybrid] Connected mode could not run this request: {}", e),
            }
        }

        match self.offline.try_process_input(input, history) {
            Ok(text) => AssistantResponse { text, source: ResponseSource::Offline, confidence: OFFLINE_CONFIDENCE },
            Err(e) => AssistantResponse {
                text: format!("I encountered an error processing your request: {}", e),
                source: ResponseSource::Error,
                confidence: 0.0,
            },
        }
    }

    fn cache_online(&self, input: &str, text: &str) {
        let Some(store) = self.offline.knowledge() else {
            return;
        };
        match store.add_entry(input, text, "online") {
            Ok(_) => info!("[hybrid] Cached online response"),
            Err(e) => warn!("[hybrid] Failed to cache online response: {}", e),
        }
    }
}
