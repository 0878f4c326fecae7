//! REST client for the verification backend
//!
//! Posts JSON to the backend's two operations and maps every failure into
//! a [`GatewayError`]:
//!
//! - non-2xx responses: the error body's `message` (also accepted nested as
//!   `body.message`, or as the first element of an error array) becomes the
//!   structured body message
//! - transport failures and timeouts: a top-level message
//! - unreadable success bodies: a top-level message

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use cp_core::{
    GatewayError, GatewayErrorBody, GatewayResult, SendCodeRequest, SendCodeResponse,
    VerificationGateway, VerifyCodeRequest, VerifyCodeResponse,
};
use cp_shared::email::mask_email;
use cp_shared::GatewayConfig;

use crate::InfrastructureError;

const UNREACHABLE_MESSAGE: &str = "Unable to reach the verification service. Please try again.";
const TIMEOUT_MESSAGE: &str = "The verification service did not respond in time. Please try again.";
const MALFORMED_RESPONSE_MESSAGE: &str = "The verification service returned an unexpected response.";

/// Verification gateway backed by the portal's REST backend
#[derive(Debug, Clone)]
pub struct HttpVerificationGateway {
    client: Client,
    config: GatewayConfig,
}

impl HttpVerificationGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        debug!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "HTTP verification gateway initialized"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn post<Req, Resp>(&self, url: String, payload: &Req) -> GatewayResult<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned + Send,
    {
        let mut request = self.client.post(&url).json(payload);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!(url = %url, error = %e, "Verification service request failed");
            if e.is_timeout() {
                GatewayError::with_message(TIMEOUT_MESSAGE)
            } else {
                GatewayError::with_message(UNREACHABLE_MESSAGE)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<Resp>().await.map_err(|e| {
                error!(url = %url, status = status.as_u16(), error = %e, "Malformed verification service response");
                GatewayError::with_message(MALFORMED_RESPONSE_MESSAGE).with_status(status.as_u16())
            });
        }

        let body = response.text().await.unwrap_or_default();
        warn!(url = %url, status = status.as_u16(), "Verification service rejected request");
        Err(error_from_response(status, &body))
    }
}

#[async_trait]
impl VerificationGateway for HttpVerificationGateway {
    async fn request_code(&self, request: &SendCodeRequest) -> GatewayResult<SendCodeResponse> {
        debug!(email = %mask_email(&request.email), "POST requestCode");
        self.post(self.config.request_code_url(), request).await
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> GatewayResult<VerifyCodeResponse> {
        debug!(email = %mask_email(&request.email), "POST verifyCode");
        self.post(self.config.verify_code_url(), request).await
    }
}

/// Build a gateway error from a non-2xx response body
pub(crate) fn error_from_response(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| extract_error_message(&value));

    GatewayError {
        body: message.map(|message| GatewayErrorBody {
            message: Some(message),
        }),
        message: None,
        status: Some(status.as_u16()),
    }
}

fn extract_error_message(value: &Value) -> Option<String> {
    ["/body/message", "/message", "/0/message"]
        .iter()
        .find_map(|pointer| {
            value
                .pointer(pointer)
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
        })
        .map(str::to_string)
}
