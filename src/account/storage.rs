use async_trait::async_trait;

use crate::error::CustomError;

use super::model::Account;

/// Account lifecycle operations any persistence backend must provide.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Creates the `account` table if it does not exist yet.
    async fn init(&self) -> Result<(), CustomError>;

    /// Persists `account` (its `id` is ignored) and returns the stored row.
    ///
    /// A clash on `number` is retried with a freshly drawn number.
    async fn create_account(&self, account: &Account) -> Result<Account, CustomError>;

    async fn delete_account(&self, id: i64) -> Result<(), CustomError>;

    /// Writes `first_name`, `last_name` and `balance` of the row matching `account.id`.
    async fn update_account(&self, account: &Account) -> Result<(), CustomError>;

    async fn get_accounts(&self) -> Result<Vec<Account>, CustomError>;

    async fn get_account_by_id(&self, id: i64) -> Result<Account, CustomError>;

    async fn get_account_by_number(&self, number: i64) -> Result<Account, CustomError>;
}
