pub mod auth;
pub mod health;
pub mod todo;
pub mod user;
