//! Outbound verification email.
//!
//! The notifier is a single best-effort attempt per registration; delivery
//! confirmation is not tracked and no retry is performed here.

use async_trait::async_trait;
use thiserror::Error;

pub mod ses;

pub use ses::SesNotifier;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("message build failed: {0}")]
    Build(String),
    #[error("send failed: {0}")]
    Send(String),
}

/// Sends the token-bearing verification link to a freshly registered user.
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        recipient: &str,
        first_name: &str,
        token: &str,
    ) -> Result<(), EmailError>;
}

/// Mock notifier capturing sent messages for tests
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    pub struct SentEmail {
        pub recipient: String,
        pub first_name: String,
        pub token: String,
    }

    #[derive(Default)]
    pub struct MockNotifier {
        sent: Mutex<Vec<SentEmail>>,
        fail_with: Option<String>,
    }

    impl MockNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        /// A notifier whose every send fails with `message`.
        pub fn failing(message: impl Into<String>) -> Self {
            Self { sent: Mutex::new(Vec::new()), fail_with: Some(message.into()) }
        }

        pub fn sent(&self) -> Vec<SentEmail> {
            self.sent.lock().unwrap().clone()
        }

        pub fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }

        pub fn was_sent_to(&self, recipient: &str) -> bool {
            self.sent.lock().unwrap().iter().any(|e| e.recipient == recipient)
        }
    }

    #[async_trait]
    impl EmailNotifier for MockNotifier {
        async fn send_verification_email(
            &self,
            recipient: &str,
            first_name: &str,
            token: &str,
        ) -> Result<(), EmailError> {
            if let Some(msg) = &self.fail_with {
                return Err(EmailError::Send(msg.clone()));
            }
            self.sent.lock().unwrap().push(SentEmail {
                recipient: recipient.to_string(),
                first_name: first_name.to_string(),
                token: token.to_string(),
            });
            Ok(())
        }
    }
}
