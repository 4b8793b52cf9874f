use async_trait::async_trait;

use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub language: Language,
    pub source_text: String,
}

/// Result of one run attempt. Execution-level failures (compile errors,
/// crashes) arrive as `Success` text; only the transport is judged here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Success(String),
    ServiceError(String),
    TransportError(String),
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success(_))
    }

    /// Text shown in the output pane.
    pub fn display_text(&self) -> String {
        match self {
            RunOutcome::Success(text) => text.clone(),
            RunOutcome::ServiceError(body) => format!("Error: {}", body),
            RunOutcome::TransportError(message) => format!("Error: {}", message),
        }
    }
}

/// The remote execution collaborator. Implementations make a single attempt
/// and fold every failure into the returned outcome.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, request: &RunRequest) -> RunOutcome;
}

/// A packaged request for the run currently in flight.
#[derive(Debug)]
pub struct RunTicket {
    id: RunId,
    request: RunRequest,
}

impl RunTicket {
    pub(crate) fn new(id: RunId, request: RunRequest) -> Self {
        Self { id, request }
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    pub fn request(&self) -> &RunRequest {
        &self.request
    }
}
