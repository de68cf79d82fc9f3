//! Extraction pipeline: free text → one chat-completion call → parsed JSON object.
//!
//! Exactly one upstream call per extraction, bounded by a deadline and raced
//! against a cancellation token. No retry, no repair of malformed output.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::extraction::normalize::{normalize, SchemaDrift};
use crate::extraction::prompts::PromptSpec;
use crate::llm_client::{ChatCompletion, ChatMessage, LlmError};
use crate::models::resume::ResumeRecord;

/// Content assumed when the provider returns no choices or no message content.
pub const EMPTY_COMPLETION: &str = "{}";

/// Internal failure classification. Logged, never shown to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Timeout,
    Cancelled,
    Parse,
    NotAnObject,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Parse => "parse",
            ErrorKind::NotAnObject => "not_an_object",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("upstream call failed: {0}")]
    Transport(#[from] LlmError),

    #[error("upstream call exceeded {0:?}")]
    Timeout(Duration),

    #[error("upstream call cancelled")]
    Cancelled,

    #[error("completion is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("completion is JSON but not an object (got {0})")]
    NotAnObject(&'static str),
}

impl ExtractionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::Transport(_) => ErrorKind::Transport,
            ExtractionError::Timeout(_) => ErrorKind::Timeout,
            ExtractionError::Cancelled => ErrorKind::Cancelled,
            ExtractionError::Parse(_) => ErrorKind::Parse,
            ExtractionError::NotAnObject(_) => ErrorKind::NotAnObject,
        }
    }
}

/// Owns the chat backend and the rendered system prompt.
/// Built once at startup and shared through `AppState`.
pub struct Extractor {
    llm: Arc<dyn ChatCompletion>,
    system_prompt: String,
    deadline: Duration,
}

impl Extractor {
    pub fn new(llm: Arc<dyn ChatCompletion>, prompt: &PromptSpec, deadline: Duration) -> Self {
        Self {
            llm,
            system_prompt: prompt.render(),
            deadline,
        }
    }

    /// Runs one extraction and returns the model's object verbatim.
    #[instrument(
        name = "extract",
        skip_all,
        fields(extraction_id = %Uuid::new_v4(), text_len = text.len())
    )]
    pub async fn extract(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<Map<String, Value>, ExtractionError> {
        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(text),
        ];

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ExtractionError::Cancelled),
            result = tokio::time::timeout(self.deadline, self.llm.complete(&messages)) => {
                result.map_err(|_| ExtractionError::Timeout(self.deadline))??
            }
        };

        let content = match response.first_content() {
            Some(content) => content,
            None => {
                warn!(kind = "empty_response", "completion had no content, defaulting to {{}}");
                EMPTY_COMPLETION
            }
        };

        match serde_json::from_str::<Value>(content)? {
            Value::Object(obj) => {
                debug!(fields = obj.len(), "extraction parsed");
                Ok(obj)
            }
            other => Err(ExtractionError::NotAnObject(json_type_name(&other))),
        }
    }

    /// Runs one extraction and normalizes the result into a `ResumeRecord`.
    pub async fn extract_normalized(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Result<(ResumeRecord, SchemaDrift), ExtractionError> {
        let raw = self.extract(text, cancel).await?;
        let (record, drift) = normalize(&raw);
        if !drift.is_empty() {
            debug!(
                unknown = ?drift.unknown_fields,
                coerced = ?drift.coerced_fields,
                "schema drift in model output"
            );
        }
        Ok((record, drift))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{ChatCompletion, ChatCompletionResponse, ChatMessage, LlmError};

    /// Scripted upstream behaviour for tests.
    pub enum Script {
        Content(&'static str),
        NoChoices,
        Fail,
        Hang,
    }

    /// Stub backend that records every message list it receives.
    pub struct StubLlm {
        script: Script,
        pub calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl StubLlm {
        pub fn new(script: Script) -> Self {
            Self {
                script,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatCompletion for StubLlm {
        async fn complete(
            &self,
            messages: &[ChatMessage],
        ) -> Result<ChatCompletionResponse, LlmError> {
            self.calls.lock().unwrap().push(messages.to_vec());
            match self.script {
                Script::Content(content) => Ok(ChatCompletionResponse::with_content(content)),
                Script::NoChoices => Ok(ChatCompletionResponse::default()),
                Script::Fail => Err(LlmError::Api {
                    status: 401,
                    message: "API key not valid".to_string(),
                }),
                Script::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }
}
