//! Text-enhancement gateway: a stateless facade over the external text
//! generator.
//!
//! Every operation degrades instead of failing: single-text enhancement falls
//! back to the original text, summary and skill suggestion fall back to empty
//! results. Nothing raised by the generator crosses this boundary.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::enhance::prompts::{enhance_text_prompt, suggest_skills_prompt, summary_prompt};
use crate::llm_client::LlmError;
use crate::models::resume::ResumeDocument;

#[derive(Debug, Error)]
pub enum EnhancementError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("text generation is not configured")]
    Unavailable,

    #[error("generator returned an empty response")]
    EmptyResponse,
}

/// The external collaborator. Implemented by `LlmClient`; tests use doubles.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, EnhancementError>;
}

/// Stand-in used when no API key is configured; every call fails, so every
/// gateway operation returns its fallback.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, EnhancementError> {
        Err(EnhancementError::Unavailable)
    }
}

#[derive(Clone)]
pub struct EnhancementGateway {
    generator: Arc<dyn TextGenerator>,
}

impl EnhancementGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Trimmed, non-empty generator output, or the error that prevented it.
    async fn ask(&self, prompt: &str) -> Result<String, EnhancementError> {
        let text = self.generator.generate(prompt).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(EnhancementError::EmptyResponse);
        }
        Ok(text.to_string())
    }

    /// Rewrites `text` more professionally. Returns `text` unchanged on failure;
    /// blank input comes back empty without a call.
    pub async fn enhance_text(&self, text: &str, context: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        let prompt = enhance_text_prompt(context, text);
        match self.ask(&prompt).await {
            Ok(enhanced) => enhanced,
            Err(e) => {
                warn!("Text enhancement failed, keeping original: {e}");
                text.to_string()
            }
        }
    }

    /// Drafts a summary from the job title, experience and skills. Empty on failure.
    pub async fn generate_summary(&self, doc: &ResumeDocument) -> String {
        let experience = doc
            .experience
            .iter()
            .map(|e| format!("{} at {}", e.title, e.company))
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = summary_prompt(
            &doc.personal_info.job_title,
            &experience,
            &doc.skills.join(", "),
        );
        match self.ask(&prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Summary generation failed: {e}");
                String::new()
            }
        }
    }

    /// Suggests skills for a role. Empty on failure or for a blank title.
    pub async fn suggest_skills(&self, job_title: &str) -> Vec<String> {
        if job_title.trim().is_empty() {
            return Vec::new();
        }
        let prompt = suggest_skills_prompt(job_title);
        match self.ask(&prompt).await {
            Ok(text) => text
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            Err(e) => {
                warn!("Skill suggestion failed: {e}");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Replies with a canned response (or fails) and records every prompt.
    pub struct ScriptedGenerator {
        reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, EnhancementError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(EnhancementError::Llm(LlmError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                })),
            }
        }
    }
}
