use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CustomError;
use crate::utils::{encrypt, generate_number};

#[derive(Serialize, Debug, Clone, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub number: i64,
    #[serde(skip_serializing)]
    pub encrypted_password: String,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(first_name: &str, last_name: &str, password: &str) -> Result<Self, CustomError> {
        Self::with_cost(first_name, last_name, password, bcrypt::DEFAULT_COST)
    }

    /// Builds an unsaved account, hashing `password` with the given bcrypt cost.
    ///
    /// `created_at` is truncated to microseconds so it survives a database
    /// round trip unchanged.
    pub fn with_cost(
        first_name: &str,
        last_name: &str,
        password: &str,
        cost: u32,
    ) -> Result<Self, CustomError> {
        Ok(Self {
            id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            number: generate_number(),
            encrypted_password: encrypt(password, cost)?,
            balance: 0,
            created_at: Utc::now().trunc_subsecs(6),
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub balance: Option<i64>,
}

impl UpdateAccountRequest {
    pub fn apply(self, account: &mut Account) {
        if let Some(first_name) = self.first_name {
            account.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            account.last_name = last_name;
        }
        if let Some(balance) = self.balance {
            account.balance = balance;
        }
    }
}

#[derive(Serialize, Debug)]
pub struct DeleteResponse {
    pub deleted: i64,
}

#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ACCOUNT_NUMBER;

    const TEST_COST: u32 = 4;

    #[test]
    fn new_account_starts_empty() {
        let account = Account::with_cost("dan", "d", "hunter88888", TEST_COST).unwrap();

        assert_eq!(account.id, None);
        assert_eq!(account.first_name, "dan");
        assert_eq!(account.last_name, "d");
        assert_eq!(account.balance, 0);
        assert!(account.number > 0 && account.number < MAX_ACCOUNT_NUMBER);
    }

    #[test]
    fn password_is_hashed_and_verifiable() {
        let account = Account::with_cost("dan", "d", "hunter88888", TEST_COST).unwrap();

        assert_ne!(account.encrypted_password, "hunter88888");
        assert!(bcrypt::verify("hunter88888", &account.encrypted_password).unwrap());
        assert!(!bcrypt::verify("hunter", &account.encrypted_password).unwrap());
    }

    #[test]
    fn new_hashes_with_default_cost() {
        let account = Account::new("dan", "d", "hunter88888").unwrap();

        assert_eq!(account.balance, 0);
        assert!(account.encrypted_password.starts_with(&format!("$2b${}$", bcrypt::DEFAULT_COST)));
    }

    #[test]
    fn invalid_cost_is_a_hashing_error() {
        let err = Account::with_cost("dan", "d", "hunter88888", 2).unwrap_err();
        assert!(matches!(err, CustomError::HashingError(_)));
    }

    #[test]
    fn serialized_account_hides_password() {
        let account = Account::with_cost("dan", "d", "hunter88888", TEST_COST).unwrap();
        let json = serde_json::to_value(&account).unwrap();

        assert!(json.get("encryptedPassword").is_none());
        assert_eq!(json["firstName"], "dan");
        assert_eq!(json["balance"], 0);
    }

    #[test]
    fn update_request_only_touches_given_fields() {
        let mut account = Account::with_cost("dan", "d", "hunter88888", TEST_COST).unwrap();
        let number = account.number;
        let update = UpdateAccountRequest {
            last_name: Some("dawson".to_string()),
            balance: Some(250),
            ..Default::default()
        };

        update.apply(&mut account);

        assert_eq!(account.first_name, "dan");
        assert_eq!(account.last_name, "dawson");
        assert_eq!(account.balance, 250);
        assert_eq!(account.number, number);
    }
}
