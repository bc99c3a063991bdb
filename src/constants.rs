pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\r\n";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\n\r\n";
pub const NOT_FOUND: &str = "HTTP/1.1 404 NOT FOUND\r\nContent-Type: application/json\r\n\r\n";
pub const INTERNAL_ERROR: &str =
    "HTTP/1.1 500 INTERNAL ERROR\r\nContent-Type: application/json\r\n\r\n";

/// Upper bound (exclusive) for randomly drawn account numbers.
pub const MAX_ACCOUNT_NUMBER: i64 = 1_000_000_000;
/// Insert attempts before a number conflict is reported as a failure.
pub const MAX_NUMBER_ATTEMPTS: u32 = 5;
