//! One-way outbound mail port.
//!
//! Email is strictly best-effort: the redemption transaction commits first,
//! then a message is dispatched on a detached task. A send failure is logged
//! and never rolls back the transaction or surfaces to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

/// Error from a mail transport.
#[derive(Debug, thiserror::Error)]
#[error("mail delivery failed: {0}")]
pub struct MailError(pub String);

/// One-way notification port for outbound email. The concrete transport
/// (SMTP relay, provider API) lives outside this crate.
#[async_trait]
pub trait MailPort: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Default port: logs the message instead of delivering it. Used in local
/// development and wherever no transport is configured.
pub struct LogMailer;

#[async_trait]
impl MailPort for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
        debug!("mail (log only) to={} subject={}", to, subject);
        Ok(())
    }
}

/// Dispatch a message without awaiting the outcome. Failures are logged at
/// `warn` and dropped.
pub fn dispatch_best_effort(mailer: Arc<dyn MailPort>, to: String, subject: String, body: String) {
    tokio::spawn(async move {
        if let Err(e) = mailer.send(&to, &subject, &body).await {
            warn!("dropping failed mail to {}: {}", to, e);
        }
    });
}

pub mod testing {
    //! Recording mailer for asserting on dispatched messages in tests.

    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct RecordingMailer {
        pub sent: Mutex<Vec<(String, String)>>,
        pub fail: bool,
    }

    #[async_trait]
    impl MailPort for RecordingMailer {
        async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError("transport down".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string()));
            Ok(())
        }
    }
}
