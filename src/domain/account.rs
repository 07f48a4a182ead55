//! Account registration form checks.

use serde::Deserialize;

use super::profile::ValidationError;

/// Shortest accepted password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign-up form contents.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

impl Registration {
    /// Check the form before an account is created.
    ///
    /// Missing fields are reported on their own; the password rules are
    /// only checked once every field is filled in.
    ///
    /// # Errors
    /// Returns every rejected field.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let required = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Password", &self.password),
            ("Password confirmation", &self.confirm_password),
        ];
        let missing: Vec<ValidationError> = required
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| ValidationError::MissingField(field))
            .collect();
        if !missing.is_empty() {
            return Err(missing);
        }

        let mut errors = Vec::new();
        if !looks_like_email(self.email.trim()) {
            errors.push(ValidationError::InvalidEmail);
        }
        if self.password != self.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
