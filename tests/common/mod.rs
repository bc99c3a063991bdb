#![allow(dead_code)]

use bank_api::account::{database::SqliteStore, model::Account, storage::Storage};
use bank_api::utils::generate_number;
use sqlx::sqlite::SqlitePoolOptions;

pub const TEST_COST: u32 = 4;

pub async fn setup_test_store() -> SqliteStore {
    setup_test_store_with_numbers(generate_number).await
}

/// Like [`setup_test_store`], but number clashes are resolved with `next_number`.
pub async fn setup_test_store_with_numbers(next_number: fn() -> i64) -> SqliteStore {
    // A single long-lived connection keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory SQLite DB");

    let store = SqliteStore::with_number_source(pool, next_number);
    store.init().await.expect("Failed to create account table");
    store
}

pub fn new_account(first_name: &str, last_name: &str) -> Account {
    Account::with_cost(first_name, last_name, "hunter88888", TEST_COST)
        .expect("Failed to build account")
}
