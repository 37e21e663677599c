use thiserror::Error;

/// Core domain errors
///
/// Every public operation surfaces exactly one of these kinds so the HTTP
/// layer can map failures to status codes deterministically.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Login is already taken")]
    LoginTaken,

    #[error("Login does not exist")]
    LoginNotFound,

    #[error("Wrong password")]
    WrongPassword,

    /// Covers every token failure mode: wrong signature, foreign algorithm,
    /// malformed structure, missing or mistyped claims. Deliberately
    /// undifferentiated.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("login too long");
        assert_eq!(error.to_string(), "Validation error: login too long");
    }

    #[test]
    fn test_login_kinds_are_distinct() {
        assert_ne!(
            DomainError::LoginNotFound.to_string(),
            DomainError::WrongPassword.to_string()
        );
    }

    #[test]
    fn test_invalid_token_reveals_nothing() {
        assert_eq!(DomainError::InvalidToken.to_string(), "Invalid token");
    }
}
