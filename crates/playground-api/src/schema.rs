use playground_core::RunRequest;
use serde::{Deserialize, Serialize};

/// JSON body of a run request: `{"language": ..., "code": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPayload {
    pub language: String,
    pub code: String,
}

impl From<&RunRequest> for RunPayload {
    fn from(request: &RunRequest) -> Self {
        Self {
            language: request.language.as_str().to_string(),
            code: request.source_text.clone(),
        }
    }
}
