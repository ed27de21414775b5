//! Shared fakes for unit and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::Config;
use crate::history::AnalysisHistory;
use crate::llm_client::{Generation, LlmError, TextGenerator, Usage};
use crate::state::AppState;

/// What the stub does when called.
#[derive(Clone)]
pub enum StubReply {
    Text(String),
    MissingKey,
    RateLimited,
    Timeout,
    Empty,
}

/// A `TextGenerator` that records prompts and returns a canned reply.
pub struct StubGenerator {
    reply: StubReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, String)>>,
}

impl StubGenerator {
    pub fn new(reply: StubReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: &str) -> Self {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(user_prompt, system_prompt)` of the most recent call.
    pub fn last_prompt(&self) -> Option<(String, String)> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str, system: &str) -> Result<Generation, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), system.to_string()));

        match &self.reply {
            StubReply::Text(text) => Ok(Generation {
                text: text.clone(),
                model: "stub-model".to_string(),
                usage: Usage {
                    input_tokens: 10,
                    output_tokens: 20,
                },
                finish_reason: Some("STOP".to_string()),
            }),
            StubReply::MissingKey => Err(LlmError::MissingApiKey),
            StubReply::RateLimited => Err(LlmError::RateLimited { retries: 2 }),
            StubReply::Timeout => Err(LlmError::Timeout),
            StubReply::Empty => Err(LlmError::EmptyContent),
        }
    }

    fn model(&self) -> &str {
        "stub-model"
    }

    fn is_configured(&self) -> bool {
        !matches!(self.reply, StubReply::MissingKey)
    }
}

pub fn test_state(generator: Arc<StubGenerator>) -> AppState {
    let config = Config::default();
    AppState {
        generator,
        history: Arc::new(AnalysisHistory::new(config.history_capacity)),
        config,
    }
}
