//! Seam to the external verification backend

use async_trait::async_trait;

use crate::domain::{SendCodeRequest, SendCodeResponse, VerifyCodeRequest, VerifyCodeResponse};
use crate::errors::GatewayResult;

/// The backend's two remote verification operations.
///
/// Code generation, storage, expiry and rate limiting all live behind this
/// trait. Implementations make exactly one call per invocation; there is no
/// batching or deduplication at this layer.
#[async_trait]
pub trait VerificationGateway: Send + Sync {
    /// Ask the backend to generate a one-time code and deliver it to `request.email`
    async fn request_code(&self, request: &SendCodeRequest) -> GatewayResult<SendCodeResponse>;

    /// Check `request.code` against the code issued for `request.email` and
    /// return the associated contact on match
    async fn verify_code(&self, request: &VerifyCodeRequest) -> GatewayResult<VerifyCodeResponse>;
}
