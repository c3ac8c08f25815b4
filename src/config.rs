use std::env;
use std::str::FromStr;

use chrono::Utc;

use crate::domain::services::auth_service::token_ttl;
use crate::error::AppError;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    /// Argon2 time cost applied to every password digest.
    pub password_hash_cost: u32,
    pub rate_limit_per_minute: u32,
    /// Key the rate limiter on `X-Forwarded-For` instead of the peer address.
    /// Only safe behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: parsed_or("PORT", 3000)?,
            max_connections: parsed_or("DB_MAX_CONNECTIONS", 5)?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_ttl_minutes: ttl_minutes(parsed_or("JWT_TTL_MINUTES", 60)?)?,
            password_hash_cost: parsed_or("PASSWORD_HASH_COST", 2)?,
            rate_limit_per_minute: parsed_or("RATE_LIMIT_PER_MINUTE", 100)?,
            trust_forwarded_for: parsed_or("TRUST_FORWARDED_FOR", false)?,
        })
    }
}

fn ttl_minutes(minutes: i64) -> Result<i64, AppError> {
    if minutes <= 0 {
        return Err(AppError::Config(format!("JWT_TTL_MINUTES must be positive, got {}", minutes)));
    }
    let ttl = token_ttl(minutes)?;
    if Utc::now().checked_add_signed(ttl).is_none() {
        return Err(AppError::Config(format!("JWT_TTL_MINUTES is too large: {}", minutes)));
    }
    Ok(minutes)
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::Config(format!("{} must be set", key)))
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}
