//! Operation surface of the backend.
//!
//! Each route is a plain async function: it validates the payload,
//! authenticates the bearer token where required, and delegates to the
//! service layer. An HTTP adapter binds these one-to-one to endpoints; the
//! functions themselves are transport-agnostic, which is also what the
//! integration tests drive directly.
//!
//! All dependencies come in through [`AppContext`] — repository, token
//! codec, mail port and configuration — so there are no process-wide
//! singletons to wire up or tear down.

use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::config::AppConfig;
use crate::db::repository::FullRepository;
use crate::services::accounts as account_services;
use crate::services::auth::{AuthCodec, Claims};
use crate::services::mail::{LogMailer, MailPort};

pub mod accounts;
pub mod awards;
pub mod notifications;
pub mod pickups;
pub mod rewards;

/// Shared dependencies injected into every route.
pub struct AppContext<R> {
    pub repo: Arc<R>,
    pub auth: AuthCodec,
    pub mailer: Arc<dyn MailPort>,
    pub config: AppConfig,
}

impl<R: FullRepository> AppContext<R> {
    /// Build a context with the default log-only mail port.
    pub fn new(repo: Arc<R>, config: AppConfig) -> Self {
        Self::with_mailer(repo, config, Arc::new(LogMailer))
    }

    /// Build a context with an explicit mail port.
    pub fn with_mailer(repo: Arc<R>, config: AppConfig, mailer: Arc<dyn MailPort>) -> Self {
        let auth = AuthCodec::new(&config.auth);
        Self {
            repo,
            auth,
            mailer,
            config,
        }
    }

    /// Verify a bearer token; every protected route calls this first.
    pub fn authenticate(&self, token: &str) -> ApiResult<Claims> {
        self.auth.verify(token)
    }

    /// One-time startup work: create the default administrator account if
    /// missing. Idempotent.
    pub async fn bootstrap(&self) -> ApiResult<()> {
        account_services::seed_default_admin(self.repo.as_ref(), &self.auth, &self.config.bootstrap)
            .await
    }
}
