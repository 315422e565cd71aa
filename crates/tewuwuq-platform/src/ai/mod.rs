pub mod openai_compat;
pub mod prompts;

use std::rc::Rc;

use tewuwuq_core::ports::AiPort;
use tewuwuq_types::{config::AiConfig, ChatError, Result};

pub use openai_compat::OpenAiCompatProvider;

/// Build the AI adapter for a configuration.
/// A custom provider must name its base URL.
pub fn create_provider(config: &AiConfig) -> Result<Rc<dyn AiPort>> {
    let has_base = config
        .api_base
        .as_deref()
        .is_some_and(|b| !b.trim().is_empty())
        || !config.provider.default_base_url().is_empty();
    if !has_base {
        return Err(ChatError::Config(format!(
            "Provider {} needs an API base URL",
            config.provider.label()
        )));
    }
    if config.api_key.trim().is_empty() {
        log::warn!("No API key configured for {}", config.provider.label());
    }
    Ok(Rc::new(OpenAiCompatProvider::new(config.clone())))
}
