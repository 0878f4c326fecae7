//! Verification gateway implementations
//!
//! - **HTTP**: REST client for the production backend
//! - **In-memory**: development backend that issues real codes without sending email

use std::sync::Arc;

use cp_core::VerificationGateway;
use cp_shared::{GatewayConfig, GatewayProvider};
use tracing::info;

use crate::InfrastructureError;

pub mod http_gateway;
pub mod in_memory;

pub use http_gateway::HttpVerificationGateway;
pub use in_memory::{InMemoryVerificationBackend, IssuedCode};


/// Create the gateway selected by `config.provider`
pub fn create_gateway(
    config: &GatewayConfig,
) -> Result<Arc<dyn VerificationGateway>, InfrastructureError> {
    match config.provider {
        GatewayProvider::Http => {
            info!(base_url = %config.base_url, "Using HTTP verification gateway");
            Ok(Arc::new(HttpVerificationGateway::new(config.clone())?))
        }
        GatewayProvider::InMemory => {
            info!("Using in-memory verification backend with sample contacts");
            Ok(Arc::new(InMemoryVerificationBackend::with_sample_contacts()))
        }
    }
}
