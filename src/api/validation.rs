//! Field shape checks applied before requests reach the services.
//!
//! Strings are trimmed in place and emails lower-cased, so the services only
//! ever see normalised values.

use regex::Regex;
use std::sync::LazyLock;

use crate::api::dtos::requests::{BulkUserUpdateItem, CreateUserRequest, LoginRequest, RoleUpdateRequest, UpdateUserRequest};
use crate::error::AppError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn validate_new_user(req: &mut CreateUserRequest) -> Result<(), AppError> {
    req.first_name = first_name(&req.first_name)?;
    req.last_name = last_name(&req.last_name)?;
    req.email = email(&req.email)?;
    req.phone_number = phone_number(&req.phone_number)?;
    req.password = password(&req.password)?;
    Ok(())
}

pub fn validate_user_update(req: &mut UpdateUserRequest) -> Result<(), AppError> {
    req.first_name = req.first_name.as_deref().map(first_name).transpose()?;
    req.last_name = req.last_name.as_deref().map(last_name).transpose()?;
    req.email = req.email.as_deref().map(email).transpose()?;
    req.phone_number = req.phone_number.as_deref().map(phone_number).transpose()?;
    req.password = req.password.as_deref().map(password).transpose()?;
    Ok(())
}

pub fn validate_bulk_user_items(items: &mut [BulkUserUpdateItem]) -> Result<(), AppError> {
    if items.is_empty() {
        return Err(AppError::Validation("Invalid or empty user data".into()));
    }

    for (index, item) in items.iter_mut().enumerate() {
        match validate_bulk_item(item) {
            Err(AppError::Validation(msg)) => {
                return Err(AppError::Validation(format!("Record {}: {}", index, msg)));
            }
            other => other?,
        }
    }
    Ok(())
}

fn validate_bulk_item(item: &mut BulkUserUpdateItem) -> Result<(), AppError> {
    item.first_name = first_name(&item.first_name)?;
    item.last_name = last_name(&item.last_name)?;
    item.email = email(&item.email)?;
    item.phone_number = phone_number(&item.phone_number)?;
    item.password = item.password.as_deref().map(password).transpose()?;
    Ok(())
}

pub fn validate_role(req: &mut RoleUpdateRequest) -> Result<(), AppError> {
    req.user_type = req.user_type.trim().to_lowercase();
    match req.user_type.as_str() {
        "admin" | "user" => Ok(()),
        _ => Err(AppError::Validation("Role must be either admin or user".into())),
    }
}

pub fn validate_login(req: &mut LoginRequest) -> Result<(), AppError> {
    req.email = email(&req.email)?;
    if req.password.trim().is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    Ok(())
}

fn first_name(value: &str) -> Result<String, AppError> {
    bounded("First name", value, 3, 20)
}

fn last_name(value: &str) -> Result<String, AppError> {
    bounded("Last name", value, 2, 20)
}

fn phone_number(value: &str) -> Result<String, AppError> {
    bounded("Phone number", value, 10, 15)
}

fn email(value: &str) -> Result<String, AppError> {
    let normalized = value.trim().to_lowercase();
    if !EMAIL_RE.is_match(&normalized) {
        return Err(AppError::Validation("Please enter a valid email address".into()));
    }
    Ok(normalized)
}

fn password(value: &str) -> Result<String, AppError> {
    let value = bounded("Password", value, 6, 20)?;
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());

    if !(has_lower && has_upper && has_digit) {
        return Err(AppError::Validation(
            "Password must contain at least one uppercase letter, one lowercase letter, and one number".into(),
        ));
    }
    Ok(value)
}

fn bounded(field: &str, value: &str, min: usize, max: usize) -> Result<String, AppError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len < min {
        return Err(AppError::Validation(format!("{} must be at least {} characters", field, min)));
    }
    if len > max {
        return Err(AppError::Validation(format!("{} cannot exceed {} characters", field, max)));
    }
    Ok(trimmed.to_string())
}
