//! In-process verification backend
//!
//! A development stand-in for the real backend. It keeps a contact
//! directory, issues random 6-digit codes and records every delivery in an
//! outbox instead of sending email. Codes do not expire; only the most
//! recent code per address is accepted and a code is consumed on success.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{info, warn};

use cp_core::{
    Contact, GatewayError, GatewayResult, SendCodeRequest, SendCodeResponse, VerificationGateway,
    VerifyCodeRequest, VerifyCodeResponse, CODE_LENGTH,
};
use cp_shared::email::{mask_email, normalize_email};

const UNKNOWN_CONTACT_MESSAGE: &str = "No contact found for this email address";
const NO_CODE_MESSAGE: &str = "No verification code was requested for this email address. Please request a new code.";
const INVALID_CODE_MESSAGE: &str = "Invalid verification code";
const SIMULATED_FAILURE_MESSAGE: &str = "Simulated verification backend failure";

/// A code delivery recorded by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub email: String,
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemoryVerificationBackend {
    /// Contacts keyed by normalized email
    contacts: RwLock<HashMap<String, Contact>>,
    /// Latest outstanding code per normalized email
    pending: RwLock<HashMap<String, String>>,
    outbox: RwLock<Vec<IssuedCode>>,
    simulate_failure: AtomicBool,
}

impl InMemoryVerificationBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contact reachable through `email`
    pub fn with_contact(mut self, email: &str, contact: Contact) -> Self {
        self.contacts
            .get_mut()
            .insert(normalize_email(email), contact);
        self
    }

    /// Backend seeded with a couple of sample contacts
    pub fn with_sample_contacts() -> Self {
        Self::new()
            .with_contact(
                "jane.doe@example.com",
                Contact::new()
                    .with_field("Name", "Jane Doe")
                    .with_field("Email", "jane.doe@example.com")
                    .with_field("Phone", "+1 612 555 0100")
                    .with_field("Title", "Volunteer Coordinator"),
            )
            .with_contact(
                "sam.lee@example.com",
                Contact::new()
                    .with_field("Name", "Sam Lee")
                    .with_field("Email", "sam.lee@example.com")
                    .with_field("Phone", "+1 651 555 0199"),
            )
    }

    pub async fn add_contact(&self, email: &str, contact: Contact) {
        self.contacts
            .write()
            .await
            .insert(normalize_email(email), contact);
    }

    /// Make every subsequent call fail as if the backend were down
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Most recent code delivered to `email`, if any
    pub async fn last_code_for(&self, email: &str) -> Option<String> {
        let email = normalize_email(email);
        self.outbox
            .read()
            .await
            .iter()
            .rev()
            .find(|issued| issued.email == email)
            .map(|issued| issued.code.clone())
    }

    pub async fn outbox(&self) -> Vec<IssuedCode> {
        self.outbox.read().await.clone()
    }

    fn check_available(&self) -> GatewayResult<()> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!("In-memory verification backend simulating failure");
            return Err(GatewayError::with_message(SIMULATED_FAILURE_MESSAGE));
        }
        Ok(())
    }
}

fn generate_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(0..10u32.pow(CODE_LENGTH as u32));
    format!("{:0width$}", code, width = CODE_LENGTH)
}

#[async_trait]
impl VerificationGateway for InMemoryVerificationBackend {
    async fn request_code(&self, request: &SendCodeRequest) -> GatewayResult<SendCodeResponse> {
        self.check_available()?;

        let email = normalize_email(&request.email);
        if !self.contacts.read().await.contains_key(&email) {
            return Err(GatewayError::with_body_message(UNKNOWN_CONTACT_MESSAGE));
        }

        let code = generate_code();
        self.pending.write().await.insert(email.clone(), code.clone());
        self.outbox.write().await.push(IssuedCode {
            email: email.clone(),
            code: code.clone(),
            issued_at: Utc::now(),
        });

        info!(
            target: "verification_backend",
            provider = "in_memory",
            email = %mask_email(&email),
            code = %code,
            "Verification code issued (in-memory)"
        );

        Ok(SendCodeResponse::sent(format!(
            "Verification code sent to {}",
            request.email
        )))
    }

    async fn verify_code(&self, request: &VerifyCodeRequest) -> GatewayResult<VerifyCodeResponse> {
        self.check_available()?;

        let email = normalize_email(&request.email);
        let mut pending = self.pending.write().await;
        let matched = pending.get(&email).map(|code| *code == request.code);

        match matched {
            None => Err(GatewayError::with_body_message(NO_CODE_MESSAGE)),
            Some(false) => {
                warn!(email = %mask_email(&email), "Verification code mismatch");
                Err(GatewayError::with_body_message(INVALID_CODE_MESSAGE))
            }
            Some(true) => {
                pending.remove(&email);
                drop(pending);

                let contact = self
                    .contacts
                    .read()
                    .await
                    .get(&email)
                    .cloned()
                    .ok_or_else(|| GatewayError::with_body_message(UNKNOWN_CONTACT_MESSAGE))?;

                info!(email = %mask_email(&email), "Verification code accepted");
                Ok(VerifyCodeResponse::verified(contact))
            }
        }
    }
}
