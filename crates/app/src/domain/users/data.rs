//! User Data

use thiserror::Error;

use crate::domain::users::records::{UserRole, UserUuid};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Longest username the `users` table stores, in characters.
pub const MAX_USERNAME_CHARS: usize = 50;

/// Longest email the `users` table stores, in characters.
pub const MAX_EMAIL_CHARS: usize = 100;

/// Registration form data
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Reasons a registration form is rejected before touching storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("username is required")]
    MissingUsername,

    #[error("username must be at most {MAX_USERNAME_CHARS} characters")]
    UsernameTooLong,

    #[error("email is required")]
    MissingEmail,

    #[error("email must be at most {MAX_EMAIL_CHARS} characters")]
    EmailTooLong,

    #[error("password is required")]
    MissingPassword,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {MIN_PASSWORD_CHARS} characters")]
    PasswordTooShort,
}

impl Registration {
    /// Check required fields and their lengths, then confirmation and password length.
    ///
    /// Lengths are measured after trimming, matching what registration stores.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistrationError`] the form fails.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        let username = self.username.trim();

        if username.is_empty() {
            return Err(RegistrationError::MissingUsername);
        }

        if username.chars().count() > MAX_USERNAME_CHARS {
            return Err(RegistrationError::UsernameTooLong);
        }

        let email = self.email.trim();

        if email.is_empty() {
            return Err(RegistrationError::MissingEmail);
        }

        if email.chars().count() > MAX_EMAIL_CHARS {
            return Err(RegistrationError::EmailTooLong);
        }

        if self.password.trim().is_empty() {
            return Err(RegistrationError::MissingPassword);
        }

        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(RegistrationError::PasswordTooShort);
        }

        Ok(())
    }
}

/// New User Data, ready to persist
#[derive(Clone)]
pub(crate) struct NewUser {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password: &str, confirm_password: &str) -> Registration {
        Registration {
            uuid: UserUuid::new(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert_eq!(registration("secret1", "secret1").validate(), Ok(()));
    }

    #[test]
    fn blank_username_is_rejected() {
        let mut form = registration("secret1", "secret1");
        form.username = "   ".to_string();

        assert_eq!(form.validate(), Err(RegistrationError::MissingUsername));
    }

    #[test]
    fn blank_email_is_rejected() {
        let mut form = registration("secret1", "secret1");
        form.email = String::new();

        assert_eq!(form.validate(), Err(RegistrationError::MissingEmail));
    }

    #[test]
    fn username_longer_than_column_is_rejected() {
        let mut form = registration("secret1", "secret1");
        form.username = "u".repeat(MAX_USERNAME_CHARS + 1);

        assert_eq!(form.validate(), Err(RegistrationError::UsernameTooLong));

        form.username = "u".repeat(MAX_USERNAME_CHARS);

        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn email_longer_than_column_is_rejected() {
        let mut form = registration("secret1", "secret1");
        form.email = format!("{}@example.com", "e".repeat(MAX_EMAIL_CHARS));

        assert_eq!(form.validate(), Err(RegistrationError::EmailTooLong));

        form.email = format!("{}@example.com", "e".repeat(MAX_EMAIL_CHARS - 12));

        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn length_limits_count_characters_after_trimming() {
        let mut form = registration("secret1", "secret1");
        form.username = format!("  {}  ", "ü".repeat(MAX_USERNAME_CHARS));

        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn blank_password_is_rejected() {
        assert_eq!(
            registration(" ", " ").validate(),
            Err(RegistrationError::MissingPassword)
        );
    }

    #[test]
    fn mismatch_is_checked_before_length() {
        assert_eq!(
            registration("abc", "abd").validate(),
            Err(RegistrationError::PasswordMismatch)
        );
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            registration("abcde", "abcde").validate(),
            Err(RegistrationError::PasswordTooShort)
        );
    }
}
