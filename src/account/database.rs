use async_trait::async_trait;
use sqlx::{PgPool, SqlitePool};
use tracing::{debug, info, warn};

use super::model::Account;
use super::schema::{
    CREATE_TABLE_POSTGRES, CREATE_TABLE_SQLITE, DELETE_ACCOUNT, INSERT_ACCOUNT, SELECT_ACCOUNTS,
    SELECT_ACCOUNT_BY_ID, SELECT_ACCOUNT_BY_NUMBER, UPDATE_ACCOUNT,
};
use super::storage::Storage;
use crate::constants::MAX_NUMBER_ATTEMPTS;
use crate::error::{AccountKey, CustomError};
use crate::utils::generate_number;

fn lookup_error(key: AccountKey) -> impl FnOnce(sqlx::Error) -> CustomError {
    move |e| match e {
        sqlx::Error::RowNotFound => CustomError::NotFoundError(key),
        e => CustomError::PersistenceError(e),
    }
}

// Both engines accept `$n` placeholders, so only the DDL differs between stores.
macro_rules! sql_store {
    ($(#[$meta:meta])* $store:ident, $pool:ty, $create_table:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $store {
            pool: $pool,
            next_number: fn() -> i64,
        }

        impl $store {
            pub fn new(pool: $pool) -> Self {
                Self::with_number_source(pool, generate_number)
            }

            /// Uses `next_number` instead of the random draw when a number clashes.
            pub fn with_number_source(pool: $pool, next_number: fn() -> i64) -> Self {
                $store { pool, next_number }
            }

            pub fn print_pool_stats(&self) {
                debug!(
                    total = self.pool.size(),
                    idle = self.pool.num_idle(),
                    "db pool stats"
                );
            }
        }

        #[async_trait]
        impl Storage for $store {
            async fn init(&self) -> Result<(), CustomError> {
                sqlx::query($create_table)
                    .execute(&self.pool)
                    .await
                    .map_err(CustomError::PersistenceError)?;
                info!(store = stringify!($store), "account table ready");
                Ok(())
            }

            async fn create_account(&self, account: &Account) -> Result<Account, CustomError> {
                let mut number = account.number;
                let mut attempt = 1;
                loop {
                    let result = sqlx::query_as::<_, Account>(INSERT_ACCOUNT)
                        .bind(&account.first_name)
                        .bind(&account.last_name)
                        .bind(number)
                        .bind(&account.encrypted_password)
                        .bind(account.balance)
                        .bind(account.created_at)
                        .fetch_one(&self.pool)
                        .await;

                    match result {
                        Ok(stored) => {
                            info!(id = ?stored.id, number = stored.number, "account created");
                            return Ok(stored);
                        }
                        Err(sqlx::Error::Database(err))
                            if err.is_unique_violation() && attempt < MAX_NUMBER_ATTEMPTS =>
                        {
                            warn!(number, attempt, "account number taken, drawing another");
                            number = (self.next_number)();
                            attempt += 1;
                        }
                        Err(e) => return Err(CustomError::PersistenceError(e)),
                    }
                }
            }

            async fn delete_account(&self, id: i64) -> Result<(), CustomError> {
                let result = sqlx::query(DELETE_ACCOUNT)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(CustomError::PersistenceError)?;
                if result.rows_affected() == 0 {
                    return Err(CustomError::NotFoundError(AccountKey::Id(id)));
                }
                info!(id, "account deleted");
                Ok(())
            }

            async fn update_account(&self, account: &Account) -> Result<(), CustomError> {
                let Some(id) = account.id else {
                    return Err(CustomError::NotFoundError(AccountKey::Number(account.number)));
                };
                let result = sqlx::query(UPDATE_ACCOUNT)
                    .bind(&account.first_name)
                    .bind(&account.last_name)
                    .bind(account.balance)
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(CustomError::PersistenceError)?;
                if result.rows_affected() == 0 {
                    return Err(CustomError::NotFoundError(AccountKey::Id(id)));
                }
                info!(id, "account updated");
                Ok(())
            }

            async fn get_accounts(&self) -> Result<Vec<Account>, CustomError> {
                self.print_pool_stats();
                sqlx::query_as::<_, Account>(SELECT_ACCOUNTS)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(CustomError::PersistenceError)
            }

            async fn get_account_by_id(&self, id: i64) -> Result<Account, CustomError> {
                sqlx::query_as::<_, Account>(SELECT_ACCOUNT_BY_ID)
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(lookup_error(AccountKey::Id(id)))
            }

            async fn get_account_by_number(&self, number: i64) -> Result<Account, CustomError> {
                sqlx::query_as::<_, Account>(SELECT_ACCOUNT_BY_NUMBER)
                    .bind(number)
                    .fetch_one(&self.pool)
                    .await
                    .map_err(lookup_error(AccountKey::Number(number)))
            }
        }
    };
}

sql_store!(
    /// PostgreSQL-backed account store.
    PostgresStore,
    PgPool,
    CREATE_TABLE_POSTGRES
);

sql_store!(
    /// SQLite-backed account store, for embedded use and tests.
    SqliteStore,
    SqlitePool,
    CREATE_TABLE_SQLITE
);
