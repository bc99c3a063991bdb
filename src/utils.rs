use bcrypt::hash;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_ACCOUNT_NUMBER;
use crate::error::CustomError;

pub fn des_from_str<T: for<'a> Deserialize<'a>>(string: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(string.split("\r\n\r\n").last().unwrap_or_default())
}

pub fn ser_to_str<T: Serialize>(t: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}

pub fn encrypt(value: &str, cost: u32) -> Result<String, CustomError> {
    hash(value, cost).map_err(CustomError::HashingError)
}

pub fn generate_number() -> i64 {
    rand::thread_rng().gen_range(1..MAX_ACCOUNT_NUMBER)
}
