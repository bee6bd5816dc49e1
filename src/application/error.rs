use thiserror::Error;

use crate::domain::{IndexError, ValidationError};

/// Message shown to the user when a new transaction is rejected.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a valid description and amount.";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl AppError {
    /// Whether the error came from user input and has already been reported
    /// through the renderer's error area.
    pub fn is_user_error(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Index(_))
    }

    /// Text for the renderer's error area.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => INVALID_INPUT_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}
