//! Login, registration, and logout transitions.
//!
//! Each operation moves the shared [`SessionContext`](crate::SessionContext)
//! through `begin` then success or failure. Registration never signs the
//! caller in; the view sends them to the login page instead.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::client::LibraryClient;
use crate::error::ApiError;
use crate::http::{decode, encode};
use crate::session::SessionState;
use crate::transport::{Method, Transport};
use crate::types::{LoginCredentials, LoginResponse, RegisterCredentials, Role, User};

pub const LOGIN_PATH: &str = "/auth/login/";
pub const SIGNUP_PATH: &str = "/auth/signup/";
pub const MIN_PASSWORD_LEN: usize = 6;

const LOGIN_FALLBACK: &str = "Invalid credentials or bad request. Please try again.";
const REGISTER_FALLBACK: &str = "An error occurred. Please try again.";

/// Raw sign-up form input, including the confirmation field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegistrationForm {
    /// Local checks that run before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with the message to show next to the form.
    pub fn validate(&self) -> Result<RegisterCredentials, ApiError> {
        let username = self.username.trim();
        let email = self.email.trim();
        if username.is_empty() {
            return Err(ApiError::Validation("Username is required".into()));
        }
        if email.is_empty() {
            return Err(ApiError::Validation("Email is required".into()));
        }
        if self.password != self.confirm_password {
            return Err(ApiError::Validation("Passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(RegisterCredentials {
            username: username.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

/// # Errors
///
/// Returns [`ApiError::Validation`] when either field is blank.
pub fn validate_login(username: &str, password: &str) -> Result<LoginCredentials, ApiError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("Enter both username and password".into()));
    }
    Ok(LoginCredentials { username: username.to_owned(), password: password.to_owned() })
}

impl<T: Transport> LibraryClient<T> {
    /// Exchange credentials for tokens and sign the session in.
    ///
    /// On failure the session's error carries the backend's message and the
    /// session stays signed out.
    ///
    /// # Errors
    ///
    /// Returns the backend or network error that stopped the login.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<User, ApiError> {
        self.session().apply(SessionState::begin);
        match self.request_login(&credentials).await {
            Ok(tokens) => {
                let user = tokens.user();
                self.tokens().save_login(&user, &tokens.access, &tokens.refresh);
                let signed_in = user.clone();
                self.session()
                    .apply(move |state| state.login_succeeded(signed_in, tokens.access, tokens.refresh));
                tracing::info!(user_id = user.id, role = user.role.as_str(), "signed in");
                Ok(user)
            }
            Err(err) => {
                tracing::info!(code = err.code(), "sign-in failed");
                let message = err.user_message(LOGIN_FALLBACK);
                self.session().apply(move |state| state.failed(message));
                Err(err)
            }
        }
    }

    /// Validate the form and create an account. Does not sign in.
    ///
    /// Validation failures return before any request and leave the session
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] or the backend/network error.
    pub async fn register(&self, form: &RegistrationForm) -> Result<User, ApiError> {
        let credentials = form.validate()?;
        self.session().apply(SessionState::begin);
        match self.request_signup(&credentials).await {
            Ok(user) => {
                self.session().apply(SessionState::register_succeeded);
                tracing::info!(user_id = user.id, "account created");
                Ok(user)
            }
            Err(err) => {
                let message = err.user_message(REGISTER_FALLBACK);
                self.session().apply(move |state| state.failed(message));
                Err(err)
            }
        }
    }

    /// Forget the session locally. No request is sent, so this cannot fail.
    pub fn logout(&self) {
        self.tokens().clear();
        self.session().apply(SessionState::logged_out);
        tracing::info!("signed out");
    }

    pub fn clear_error(&self) {
        self.session().apply(SessionState::clear_error);
    }

    async fn request_login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        let response = self.http.send_anonymous(Method::Post, LOGIN_PATH, Some(encode(credentials)?)).await?;
        decode(&response)
    }

    async fn request_signup(&self, credentials: &RegisterCredentials) -> Result<User, ApiError> {
        let response = self.http.send_anonymous(Method::Post, SIGNUP_PATH, Some(encode(credentials)?)).await?;
        decode(&response)
    }
}
