use axum::http::StatusCode;
use thiserror::Error;

pub const USERNAME_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 5;
pub const EXP_MAX_CHARS: usize = 2;

/// Length-policy violations. `Display` is the message returned to the client.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username is too long")]
    UsernameTooLong,
    #[error("Password is too short")]
    PasswordTooShort,
    #[error("exp is too long")]
    ExpTooLong,
}

impl From<ValidationError> for (StatusCode, String) {
    fn from(e: ValidationError) -> Self {
        (StatusCode::BAD_REQUEST, e.to_string())
    }
}

pub fn check_username(username: &str) -> Result<(), ValidationError> {
    if username.chars().count() > USERNAME_MAX_CHARS {
        return Err(ValidationError::UsernameTooLong);
    }
    Ok(())
}

pub fn check_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn check_exp(exp: Option<&str>) -> Result<(), ValidationError> {
    match exp {
        Some(e) if e.chars().count() > EXP_MAX_CHARS => Err(ValidationError::ExpTooLong),
        _ => Ok(()),
    }
}
