pub mod database;
pub mod model;
pub mod schema;
pub mod service;
pub mod storage;
