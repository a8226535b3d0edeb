//! OTP Verification
//!
//! One-time-password verification behind an async seam. The storefront only
//! ever awaits the trait; how a code is delivered (and how long that takes)
//! belongs to the implementation, so tests can substitute an instant stub and
//! a real gateway can be dropped in later.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while sending or checking a code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OtpError {
    /// The code could not be sent to the destination.
    #[error("could not deliver a code to {0}")]
    DeliveryFailed(String),

    /// The challenge has already been consumed or has lapsed.
    #[error("challenge is no longer valid")]
    ChallengeExpired,
}

/// An outstanding verification challenge for one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpChallenge {
    /// Phone number or email the code was sent to
    pub destination: String,
}

/// Sends and checks one-time passwords.
#[automock]
#[async_trait]
pub trait OtpVerifier: Send + Sync {
    /// Send a fresh code to the destination.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::DeliveryFailed`] if no code could be delivered.
    async fn send_code(&self, destination: &str) -> Result<OtpChallenge, OtpError>;

    /// Check a shopper-entered code against the challenge.
    ///
    /// # Errors
    ///
    /// Returns [`OtpError::ChallengeExpired`] if the challenge has lapsed.
    async fn verify(&self, challenge: &OtpChallenge, code: &str) -> Result<bool, OtpError>;
}

/// An in-process verifier that accepts exactly one fixed code, instantly.
#[derive(Debug, Clone)]
pub struct StubOtpVerifier {
    accepted_code: String,
}

impl StubOtpVerifier {
    /// Create a stub that accepts the given code.
    pub fn new(accepted_code: impl Into<String>) -> Self {
        Self {
            accepted_code: accepted_code.into(),
        }
    }
}

#[async_trait]
impl OtpVerifier for StubOtpVerifier {
    async fn send_code(&self, destination: &str) -> Result<OtpChallenge, OtpError> {
        Ok(OtpChallenge {
            destination: destination.to_string(),
        })
    }

    async fn verify(&self, _challenge: &OtpChallenge, code: &str) -> Result<bool, OtpError> {
        Ok(code == self.accepted_code)
    }
}
