//! Account repository trait: CRUD plus atomic point mutations.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Account, AccountId, NewAccount, Role};

/// Result of an atomic point credit: the totals before and after, so callers
/// can detect tier crossings without a second read.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PointsUpdate {
    pub previous_points: u64,
    pub current_points: u64,
}

/// Aggregate account statistics for the public stats endpoint.
#[derive(Debug, Clone, Default)]
pub struct AccountStats {
    /// Number of registered user accounts.
    pub households: u64,
    /// Number of distinct villages across user accounts.
    pub villages: u64,
}

/// Repository trait for account storage.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a new account.
    ///
    /// # Arguments
    /// * `new` - Account fields; the store assigns the id and timestamps
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account with its assigned id
    /// * `Err(RepositoryError::Conflict)` - If the identity is already taken
    ///   for that role
    async fn insert_account(&self, new: NewAccount) -> RepositoryResult<Account>;

    /// Retrieve an account by id.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if no such account exists
    async fn get_account(&self, id: AccountId) -> RepositoryResult<Account>;

    /// Look up an account by its unique identity (phone for users, ID number
    /// for admins) within a role.
    ///
    /// Returns `Ok(None)` when no account matches; reserved errors are for
    /// store failures only, so login can treat "no account" and "wrong
    /// password" identically.
    async fn find_by_identity(
        &self,
        identity: &str,
        role: Role,
    ) -> RepositoryResult<Option<Account>>;

    /// Atomically add `points` to the account's total.
    ///
    /// The read-modify-write happens inside the store under a single guard;
    /// concurrent credits can never produce a lost update.
    ///
    /// # Returns
    /// * `Ok(PointsUpdate)` - Totals before and after the credit
    /// * `Err(RepositoryError::NotFound)` - If no such account exists
    /// * `Err(RepositoryError::ValidationError)` - If the credit would
    ///   overflow the account's balance; the balance is left unchanged
    async fn credit_points(&self, id: AccountId, points: u64) -> RepositoryResult<PointsUpdate>;

    /// Top active user accounts ordered by points, descending.
    ///
    /// Admin accounts are never included.
    async fn top_accounts(&self, limit: usize) -> RepositoryResult<Vec<Account>>;

    /// Aggregate statistics over user accounts.
    async fn account_stats(&self) -> RepositoryResult<AccountStats>;
}
