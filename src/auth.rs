//! Mocked sign-in and sign-up.
//!
//! No credentials leave the process: submission validates the form, waits a
//! simulated round-trip, and hands back a session for the given email.

use std::time::Duration;
use thiserror::Error;

use crate::notify::Notice;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Passwords don't match")]
    PasswordMismatch,
    #[error("Email address is required")]
    MissingEmail,
}

impl AuthError {
    /// Notice shown when a submission is rejected.
    pub fn notice(&self) -> Notice {
        match self {
            AuthError::PasswordMismatch => Notice::destructive(
                "Passwords don't match",
                "Please make sure your passwords match.",
            ),
            AuthError::MissingEmail => {
                Notice::destructive("Email required", "Please enter your email address.")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

/// Contents of the sign-in / sign-up form.
#[derive(Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// Only checked in [`AuthMode::SignUp`].
    pub confirm_password: String,
}

/// Passwords are never printed.
impl std::fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthForm")
            .field("mode", &self.mode)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .finish()
    }
}

impl AuthForm {
    pub fn sign_in(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: email.into(),
            password: password.into(),
            confirm_password: String::new(),
        }
    }

    pub fn sign_up(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::SignUp,
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingEmail);
        }
        if self.mode == AuthMode::SignUp && self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

/// Accepts any well-formed form after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl Default for MockAuthenticator {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
        }
    }
}

impl MockAuthenticator {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    /// Validate, wait, and return the session plus the welcome notice.
    pub async fn submit(&self, form: &AuthForm) -> Result<(Session, Notice), AuthError> {
        form.validate()?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let notice = match form.mode {
            AuthMode::SignUp => Notice::info(
                "Account created!",
                "Your account has been created successfully.",
            ),
            AuthMode::SignIn => {
                Notice::info("Welcome back!", "You've been signed in successfully.")
            }
        };
        tracing::info!(email = %form.email, mode = ?form.mode, "Signed in (mock)");
        Ok((
            Session {
                email: form.email.trim().to_string(),
            },
            notice,
        ))
    }
}
