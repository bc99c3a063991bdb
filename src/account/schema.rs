//! Table layout for `account`, shared by table creation and every query.
//!
//! Rows are mapped into [`Account`](super::model::Account) by column name, and
//! the column order below is the one used by both DDL statements.

macro_rules! account_columns {
    () => {
        "id, first_name, last_name, number, encrypted_password, balance, created_at"
    };
}

pub const CREATE_TABLE_POSTGRES: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        id BIGSERIAL PRIMARY KEY,
        first_name VARCHAR(50) NOT NULL,
        last_name VARCHAR(50) NOT NULL,
        number BIGINT NOT NULL UNIQUE,
        encrypted_password VARCHAR(100) NOT NULL,
        balance BIGINT NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL
    )"#;

pub const CREATE_TABLE_SQLITE: &str = r#"
    CREATE TABLE IF NOT EXISTS account (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name VARCHAR(50) NOT NULL,
        last_name VARCHAR(50) NOT NULL,
        number BIGINT NOT NULL UNIQUE,
        encrypted_password VARCHAR(100) NOT NULL,
        balance BIGINT NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL
    )"#;

pub const INSERT_ACCOUNT: &str = concat!(
    "INSERT INTO account (first_name, last_name, number, encrypted_password, balance, created_at) ",
    "VALUES ($1, $2, $3, $4, $5, $6) RETURNING ",
    account_columns!()
);

pub const UPDATE_ACCOUNT: &str =
    "UPDATE account SET first_name = $1, last_name = $2, balance = $3 WHERE id = $4";

pub const DELETE_ACCOUNT: &str = "DELETE FROM account WHERE id = $1";

pub const SELECT_ACCOUNTS: &str = concat!("SELECT ", account_columns!(), " FROM account ORDER BY id");

pub const SELECT_ACCOUNT_BY_ID: &str =
    concat!("SELECT ", account_columns!(), " FROM account WHERE id = $1");

pub const SELECT_ACCOUNT_BY_NUMBER: &str =
    concat!("SELECT ", account_columns!(), " FROM account WHERE number = $1");
