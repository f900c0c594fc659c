//! # Turn Generator
//!
//! Builds the one-sentence debate prompt and asks the language model for a
//! single argument.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Typed error kinds instead of opaque API failures
//! - 1.0.0: Initial release

use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};

use super::transcript::{Argument, Role};
use crate::core::{log_preview, GenerationError};

/// Source of debate arguments
#[async_trait]
pub trait ArgumentGenerator: Send + Sync {
    /// Produce one argument for `role` on `topic`, optionally rebutting the
    /// immediately preceding turn.
    async fn generate(
        &self,
        role: Role,
        topic: &str,
        previous: Option<&str>,
    ) -> Result<Argument, GenerationError>;
}

/// Build the user prompt for a single turn
pub fn build_argument_prompt(role: Role, topic: &str, previous: Option<&str>) -> String {
    let rebuttal = previous
        .map(|p| format!("Your opponent said: {p}\n"))
        .unwrap_or_default();

    format!(
        "You are a skilled debater on the {side} side of the topic: \"{topic}\".\n\
         {rebuttal}\
         Reply with a strong, persuasive, and respectful argument (max 1 sentence).",
        side = role.label(),
        topic = topic,
        rebuttal = rebuttal,
    )
}

/// Argument generator backed by the OpenAI chat completion API.
///
/// Credentials are read by the `openai` crate from the environment.
#[derive(Debug, Clone)]
pub struct OpenAiArgumentGenerator {
    model: String,
}

impl OpenAiArgumentGenerator {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ArgumentGenerator for OpenAiArgumentGenerator {
    async fn generate(
        &self,
        role: Role,
        topic: &str,
        previous: Option<&str>,
    ) -> Result<Argument, GenerationError> {
        let prompt = build_argument_prompt(role, topic, previous);

        let messages = vec![ChatCompletionMessage {
            role: ChatCompletionMessageRole::User,
            content: Some(prompt),
            name: None,
            function_call: None,
            tool_call_id: None,
            tool_calls: None,
        }];

        let chat_completion = ChatCompletion::builder(&self.model, messages)
            .create()
            .await
            .map_err(|e| GenerationError::from_api_detail(&e.to_string()))?;

        if let Some(usage) = &chat_completion.usage {
            debug!(
                "{} turn used {} tokens ({} prompt, {} completion) on {}",
                role, usage.total_tokens, usage.prompt_tokens, usage.completion_tokens, self.model
            );
        }

        let text = chat_completion
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or(GenerationError::EmptyResponse)?;

        let argument = Argument::new(text);
        if argument.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        debug!("{} argument: {}", role, log_preview(argument.as_str()));
        Ok(argument)
    }
}
