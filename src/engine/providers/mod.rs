// Xyna Engine — Remote Generation Providers
// Every backend implements `ChatProvider`; callers hold `Box<dyn ChatProvider>`
// so a test double or another OpenAI-compatible service drops in unchanged.

pub mod openrouter;

pub use openrouter::OpenRouterProvider;

use crate::atoms::traits::ChatProvider;
use crate::engine::config::AssistantConfig;
use crate::atoms::error::EngineResult;

/// Build the configured provider.
pub fn from_config(config: &AssistantConfig) -> EngineResult<Box<dyn ChatProvider>> {
    Ok(Box::new(OpenRouterProvider::new(&config.openrouter)?))
}
