use thiserror::Error;

use crate::form::ValidationErrors;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PanelError {
    /// The request never produced a response (offline, CORS, aborted).
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// The envelope came back with `success: false`.
    #[error("{0}")]
    Application(String),

    #[error("Unreadable response: {0}")]
    Decode(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Unknown entity type '{0}'")]
    UnknownEntityType(String),

    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    #[error("Item {0} is inactive and cannot be reordered")]
    InactiveItem(i64),

    #[error("Entity type '{0}' does not support reordering")]
    NotReorderable(&'static str),

    /// The API has no route for this operation on the type.
    #[error("Entity type '{type_name}' cannot be {operation}")]
    Unsupported {
        type_name: &'static str,
        operation: &'static str,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PanelError {
    /// Message suitable for a toast: the server's own wording when there is
    /// one, otherwise the error's display form.
    pub fn user_message(&self) -> String {
        match self {
            PanelError::Application(message) => message.clone(),
            PanelError::Http { message, .. } if !message.is_empty() => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PanelError>;
