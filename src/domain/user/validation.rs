//! Credential validation rules

use thiserror::Error;

use super::entity::Credentials;

/// Errors that can occur during credential validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CredentialValidationError {
    #[error("Login cannot be empty")]
    EmptyLogin,

    #[error("Login exceeds maximum length of {0} characters")]
    LoginTooLong(usize),

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password must contain a lowercase letter")]
    PasswordMissingLowercase,

    #[error("Password must contain an uppercase letter")]
    PasswordMissingUppercase,

    #[error("Password must contain a digit")]
    PasswordMissingDigit,

    #[error("Password must contain a special character")]
    PasswordMissingSpecial,
}

pub const MAX_LOGIN_LENGTH: usize = 25;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate a login: non-empty, at most 25 characters.
pub fn validate_login(login: &str) -> Result<(), CredentialValidationError> {
    let length = login.chars().count();

    if length == 0 {
        return Err(CredentialValidationError::EmptyLogin);
    }

    if length > MAX_LOGIN_LENGTH {
        return Err(CredentialValidationError::LoginTooLong(MAX_LOGIN_LENGTH));
    }

    Ok(())
}

/// Validate a password: at least 6 characters with a lowercase letter, an
/// uppercase letter, a digit and a special character.
pub fn validate_password(password: &str) -> Result<(), CredentialValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CredentialValidationError::PasswordTooShort(
            MIN_PASSWORD_LENGTH,
        ));
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err(CredentialValidationError::PasswordMissingLowercase);
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(CredentialValidationError::PasswordMissingUppercase);
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err(CredentialValidationError::PasswordMissingDigit);
    }

    // Anything that is neither a letter nor a digit counts as special.
    if !password
        .chars()
        .any(|c| !c.is_alphabetic() && !c.is_numeric())
    {
        return Err(CredentialValidationError::PasswordMissingSpecial);
    }

    Ok(())
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), CredentialValidationError> {
    validate_login(&credentials.login)?;
    validate_password(&credentials.password)?;

    Ok(())
}
