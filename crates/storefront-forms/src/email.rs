//! # Email Availability Check
//!
//! Stand-in for `GET /auth/check-email`: waits a fixed round-trip delay and
//! consults a small reserved set. A network-backed checker can replace it by
//! implementing [`AsyncFieldValidator`] with the same contract.

use async_trait::async_trait;
use std::time::Duration;

use storefront_core::validation::ValidationResult;
use storefront_core::ValidationError;

use crate::error::AsyncValidationError;
use crate::form::AsyncFieldValidator;

/// Simulated server round-trip.
pub const AVAILABILITY_DELAY: Duration = Duration::from_millis(800);

/// Addresses that already have accounts.
pub const RESERVED_EMAILS: [&str; 4] = [
    "user1@example.com",
    "user2@example.com",
    "admin@example.com",
    "test@test.com",
];

/// Simulated email-availability service.
#[derive(Debug, Clone)]
pub struct EmailAvailability {
    delay: Duration,
    reserved: Vec<String>,
}

impl Default for EmailAvailability {
    fn default() -> Self {
        EmailAvailability {
            delay: AVAILABILITY_DELAY,
            reserved: RESERVED_EMAILS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl EmailAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Resolves after the simulated delay. Never fails for transport reasons.
    pub async fn check(&self, email: &str) -> ValidationResult<()> {
        tokio::time::sleep(self.delay).await;

        let email = email.to_lowercase();
        if self.reserved.iter().any(|taken| *taken == email) {
            return Err(ValidationError::EmailTaken);
        }
        Ok(())
    }
}

/// Checks `email` against the default reserved set with the default delay.
pub async fn check_email_availability(email: &str) -> ValidationResult<()> {
    EmailAvailability::default().check(email).await
}

#[async_trait]
impl AsyncFieldValidator for EmailAvailability {
    async fn validate(&self, value: &str) -> Result<Option<String>, AsyncValidationError> {
        Ok(self.check(value).await.err().map(|e| e.to_string()))
    }
}
