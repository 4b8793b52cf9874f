use async_trait::async_trait;
use playground_core::{Executor, RunOutcome, RunRequest};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::schema::RunPayload;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/run";

/// Executes code by POSTing it to a remote execution service.
///
/// One attempt per run: no retries and no client-side timeout. The response
/// body is treated as opaque text.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    endpoint: Url,
}

impl HttpExecutor {
    pub fn new(endpoint: &str) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;
        Self::with_client(client, endpoint)
    }

    pub fn with_client(client: Client, endpoint: &str) -> Result<Self, ApiError> {
        let endpoint = parse_endpoint(endpoint)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn post(&self, payload: &RunPayload) -> Result<(bool, String), reqwest::Error> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();
        debug!(%status, endpoint = %self.endpoint, "execution service responded");
        let body = response.text().await?;
        Ok((status.is_success(), body))
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, request: &RunRequest) -> RunOutcome {
        let payload = RunPayload::from(request);
        match self.post(&payload).await {
            Ok((true, body)) => RunOutcome::Success(body),
            Ok((false, body)) => RunOutcome::ServiceError(body),
            Err(err) => RunOutcome::TransportError(err.to_string()),
        }
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, ApiError> {
    let url = Url::parse(endpoint).map_err(|source| ApiError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ApiError::UnsupportedScheme(endpoint.to_string())),
    }
}
