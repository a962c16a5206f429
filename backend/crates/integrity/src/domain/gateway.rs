//! Gateway Trait

use crate::error::IntegrityResult;
use serde_json::Value;

/// Signed calls to named serverless edge functions
#[trait_variant::make(EdgeFunctionGateway: Send)]
pub trait LocalEdgeFunctionGateway {
    /// Sign `payload`, invoke `function` and return its JSON response.
    /// Nothing is sent if signing fails.
    async fn invoke(&self, function: &str, payload: &Value) -> IntegrityResult<Value>;
}
