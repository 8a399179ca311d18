use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::empty_string_as_none;
use crate::database::models::User;
use crate::error::ApiError;

/// `{"user": ...}` in both directions
#[derive(Debug, Serialize, Deserialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

pub type UserBody = UserEnvelope<UserView>;

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub username: String,
    pub email: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub token: String,
}

impl UserView {
    pub fn new(user: User, token: String) -> Self {
        Self {
            username: user.username,
            email: user.email,
            bio: user.bio,
            image: user.image,
            token,
        }
    }
}

impl UserBody {
    pub fn from_user(user: User, token: String) -> Self {
        UserEnvelope {
            user: UserView::new(user, token),
        }
    }
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Err(msg) = validate_username_format(&self.username) {
            field_errors.insert("username".to_string(), msg);
        }
        if let Err(msg) = validate_email_format(&self.email) {
            field_errors.insert("email".to_string(), msg);
        }
        if self.password.is_empty() {
            field_errors.insert("password".to_string(), "Password cannot be empty".to_string());
        }
        into_validation_result(field_errors)
    }
}

impl UpdateUser {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if let Some(username) = &self.username {
            if let Err(msg) = validate_username_format(username) {
                field_errors.insert("username".to_string(), msg);
            }
        }
        if let Some(email) = &self.email {
            if let Err(msg) = validate_email_format(email) {
                field_errors.insert("email".to_string(), msg);
            }
        }
        if let Some(image) = &self.image {
            if url::Url::parse(image).is_err() {
                field_errors.insert("image".to_string(), "Not a valid URL".to_string());
            }
        }
        into_validation_result(field_errors)
    }
}

fn into_validation_result(field_errors: HashMap<String, String>) -> Result<(), ApiError> {
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid user", Some(field_errors)))
    }
}

/// Usernames are 1-50 characters of letters, digits, underscore and hyphen,
/// starting with a letter or digit
pub fn validate_username_format(username: &str) -> Result<(), String> {
    let Some(first) = username.chars().next() else {
        return Err("Username cannot be empty".to_string());
    };

    if username.chars().count() > 50 {
        return Err("Username must be less than 50 characters".to_string());
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err("Username can only contain letters, numbers, underscore, and hyphen".to_string());
    }

    if !first.is_alphanumeric() {
        return Err("Username must start with a letter or number".to_string());
    }

    Ok(())
}

pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("Invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
