use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::model::{
    Account, CreateAccountRequest, DeleteResponse, ErrorResponse, UpdateAccountRequest,
};
use super::storage::Storage;
use crate::{
    constants::{BAD_REQUEST, INTERNAL_ERROR, NOT_FOUND, OK_RESPONSE},
    error::CustomError,
    utils::{des_from_str, ser_to_str},
};

pub struct AccountService {
    store: Arc<dyn Storage>,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(store: Arc<dyn Storage>, bcrypt_cost: u32) -> Self {
        AccountService { store, bcrypt_cost }
    }

    /// Builds and persists a new account without going through HTTP.
    pub async fn open_account(
        &self,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Account, CustomError> {
        let account = Account::with_cost(first_name, last_name, password, self.bcrypt_cost)?;
        self.store.create_account(&account).await
    }

    pub async fn create(&self, request: &str) -> (String, String) {
        let req: CreateAccountRequest = match des_from_str(request) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid create body: {}", e);
                return bad_request("invalid body");
            }
        };
        if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
            return bad_request("firstName and lastName must not be empty");
        }

        match self
            .open_account(&req.first_name, &req.last_name, &req.password)
            .await
        {
            Ok(account) => ok(&account),
            Err(e) => failure(e),
        }
    }

    pub async fn list(&self) -> (String, String) {
        match self.store.get_accounts().await {
            Ok(accounts) => ok(&accounts),
            Err(e) => failure(e),
        }
    }

    pub async fn get_by_id(&self, raw_id: &str) -> (String, String) {
        let Some(id) = parse_key(raw_id) else {
            return bad_request("invalid id");
        };
        match self.store.get_account_by_id(id).await {
            Ok(account) => ok(&account),
            Err(e) => failure(e),
        }
    }

    pub async fn get_by_number(&self, raw_number: &str) -> (String, String) {
        let Some(number) = parse_key(raw_number) else {
            return bad_request("invalid number");
        };
        match self.store.get_account_by_number(number).await {
            Ok(account) => ok(&account),
            Err(e) => failure(e),
        }
    }

    pub async fn update(&self, raw_id: &str, request: &str) -> (String, String) {
        let Some(id) = parse_key(raw_id) else {
            return bad_request("invalid id");
        };
        let req: UpdateAccountRequest = match des_from_str(request) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid update body: {}", e);
                return bad_request("invalid body");
            }
        };

        let mut account = match self.store.get_account_by_id(id).await {
            Ok(account) => account,
            Err(e) => return failure(e),
        };
        req.apply(&mut account);
        if account.first_name.trim().is_empty() || account.last_name.trim().is_empty() {
            return bad_request("firstName and lastName must not be empty");
        }

        match self.store.update_account(&account).await {
            Ok(()) => ok(&account),
            Err(e) => failure(e),
        }
    }

    pub async fn delete(&self, raw_id: &str) -> (String, String) {
        let Some(id) = parse_key(raw_id) else {
            return bad_request("invalid id");
        };
        match self.store.delete_account(id).await {
            Ok(()) => ok(&DeleteResponse { deleted: id }),
            Err(e) => failure(e),
        }
    }
}

fn parse_key(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|key| *key > 0)
}

fn ok<T: Serialize>(value: &T) -> (String, String) {
    match ser_to_str(value) {
        Ok(json) => (OK_RESPONSE.to_string(), json),
        Err(e) => {
            error!("serde error: {}", e);
            (INTERNAL_ERROR.to_string(), "".to_string())
        }
    }
}

fn bad_request(message: &str) -> (String, String) {
    error_body(BAD_REQUEST, message.to_string())
}

fn failure(err: CustomError) -> (String, String) {
    match err {
        CustomError::NotFoundError(key) => {
            info!("Account with {} not found", key);
            error_body(NOT_FOUND, err.to_string())
        }
        error => {
            error!("Error account db: {:#?}", error);
            error_body(INTERNAL_ERROR, "internal error".to_string())
        }
    }
}

pub(crate) fn error_body(status_line: &str, error: String) -> (String, String) {
    let body = ser_to_str(&ErrorResponse { error }).unwrap_or_default();
    (status_line.to_string(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AccountKey;

    #[test]
    fn keys_must_be_positive_integers() {
        assert_eq!(parse_key("42"), Some(42));
        assert_eq!(parse_key("0"), None);
        assert_eq!(parse_key("-3"), None);
        assert_eq!(parse_key("abc"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn not_found_maps_to_404_with_message() {
        let (status, body) = failure(CustomError::NotFoundError(AccountKey::Number(7)));

        assert_eq!(status, NOT_FOUND);
        assert_eq!(body, r#"{"error":"Account with number 7 not found"}"#);
    }

    #[test]
    fn other_errors_map_to_500() {
        let (status, body) = failure(CustomError::PersistenceError(sqlx::Error::PoolClosed));

        assert_eq!(status, INTERNAL_ERROR);
        assert_eq!(body, r#"{"error":"internal error"}"#);
    }
}
