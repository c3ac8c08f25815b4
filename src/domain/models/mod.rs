pub mod auth;
pub mod batch;
pub mod todo;
pub mod user;
