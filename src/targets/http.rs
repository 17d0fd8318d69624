// ABOUTME: HttpTarget - posts the inputs as JSON to a remote endpoint.
// ABOUTME: Non-2xx responses are failures; non-JSON bodies are malformed output.

use async_trait::async_trait;

use crate::error::TargetError;
use crate::tool::ExecutionTarget;

/// Execution target that calls a remote HTTP endpoint.
pub struct HttpTarget {
    client: reqwest::Client,
    url: String,
    headers: Vec<(String, String)>,
}

impl HttpTarget {
    /// Create a target that POSTs to `url` with a default client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    /// Create with a custom reqwest client.
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExecutionTarget for HttpTarget {
    async fn run(&self, inputs: serde_json::Value) -> Result<serde_json::Value, TargetError> {
        let mut request = self.client.post(&self.url).json(&inputs);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| TargetError::Failed(e.into()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TargetError::Failed(e.into()))?;

        if !status.is_success() {
            return Err(TargetError::failed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| TargetError::Malformed(format!("response body is not valid JSON: {}", e)))
    }
}
