//! reqwest Edge-Function Client

use crate::application::config::EdgeClientConfig;
use crate::domain::envelope::SignedEnvelope;
use crate::domain::gateway::EdgeFunctionGateway;
use crate::domain::services::sign;
use crate::error::{IntegrityError, IntegrityResult};
use crate::presentation::headers::to_header_map;
use serde_json::Value;

/// HTTP client that signs every edge-function call
#[derive(Debug, Clone)]
pub struct HttpEdgeFunctionClient {
    client: reqwest::Client,
    config: EdgeClientConfig,
}

impl HttpEdgeFunctionClient {
    pub fn new(config: EdgeClientConfig) -> IntegrityResult<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EdgeClientConfig {
        &self.config
    }

    pub fn function_url(&self, function: &str) -> String {
        format!(
            "{}/functions/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            function.trim_start_matches('/')
        )
    }

    /// POST request carrying the envelope payload, signature headers and bearer key
    pub fn build_request(
        &self,
        function: &str,
        envelope: &SignedEnvelope,
    ) -> IntegrityResult<reqwest::Request> {
        let request = self
            .client
            .post(self.function_url(function))
            .bearer_auth(&self.config.api_key)
            .headers(to_header_map(envelope)?)
            .json(&envelope.payload)
            .build()?;
        Ok(request)
    }
}

impl EdgeFunctionGateway for HttpEdgeFunctionClient {
    async fn invoke(&self, function: &str, payload: &Value) -> IntegrityResult<Value> {
        let envelope = sign(payload)?;
        let request = self.build_request(function, &envelope)?;

        tracing::debug!(function = function, nonce = %envelope.nonce, "Invoking edge function");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                function = function,
                status = status.as_u16(),
                "Edge function call rejected"
            );
            return Err(IntegrityError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
