//! Error handling module for the personnel console.
//!
//! Provides the error kinds surfaced to views: client-side validation, transport failures
//! and missing records.

use std::collections::BTreeMap;
use std::fmt;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Form inputs that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Phone,
    Department,
    Position,
    Salary,
    StartDate,
}

impl FormField {
    pub const ALL: [FormField; 8] = [
        FormField::FirstName,
        FormField::LastName,
        FormField::Email,
        FormField::Phone,
        FormField::Department,
        FormField::Position,
        FormField::Salary,
        FormField::StartDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::FirstName => "First name",
            FormField::LastName => "Last name",
            FormField::Email => "Email",
            FormField::Phone => "Phone",
            FormField::Department => "Department",
            FormField::Position => "Position",
            FormField::Salary => "Salary",
            FormField::StartDate => "Start date",
        }
    }
}

/// Per-field validation messages, one per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(_, m)| m.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Client-side validation failed; nothing was sent
    Validation(FieldErrors),
    /// Network or server failure
    Transport {
        status: Option<u16>,
        message: String,
    },
    /// Target record does not exist server-side
    NotFound(String),
}

impl AppError {
    pub fn transport(message: impl Into<String>) -> Self {
        AppError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::Transport { .. } => codes::TRANSPORT_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(errors) => errors.to_string(),
            AppError::Transport { message, .. } => message.clone(),
            AppError::NotFound(msg) => msg.clone(),
        }
    }

    /// HTTP status reported by the server, if the failure came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Transport { status, .. } => *status,
            AppError::NotFound(_) => Some(404),
            AppError::Validation(_) => None,
        }
    }

    /// Message to show the user, falling back to `fallback` when the server gave none.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.message();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        tracing::error!("Transport error: {:?}", err);
        AppError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: format!("Request failed: {}", err),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::transport(format!("Invalid response body: {}", err))
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}
