//! Login / create-account form state

use crate::backend::error::ApiError;
use crate::backend::types::Credentials;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    CreateAccount,
}

/// Email and password fields plus an in-flight marker
#[derive(Debug)]
pub struct AuthForm {
    mode: AuthMode,
    email: String,
    password: String,
    submitting: bool,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            submitting: false,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Log in to see your saved recipes! :)",
            AuthMode::CreateAccount => "Enter email and password to get started!",
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self.mode {
            AuthMode::Login => "Log in",
            AuthMode::CreateAccount => "Create Account",
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub fn set_password(&mut self, password: String) {
        self.password = password;
    }

    /// Credentials to post, or `None` while a submit is still in flight
    pub fn submit(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }

    /// Reset after the server answered. A rejected attempt keeps the email.
    pub fn finish<T>(&mut self, result: &Result<T, ApiError>) {
        self.submitting = false;
        self.password.clear();
        if result.is_ok() {
            self.email.clear();
        }
    }
}
