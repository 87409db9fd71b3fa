//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a transaction payload breaks one of the
//!   validator rules.
//! - [`InvalidInput`] thrown when a pure computation receives malformed input.
//! - [`UnsupportedCurrency`] and [`UnsupportedConversion`] thrown by the
//!   currency converter.
//! - [`KeyNotFound`] thrown when an item is not found.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidInput`]: EngineError::InvalidInput
//!  [`UnsupportedCurrency`]: EngineError::UnsupportedCurrency
//!  [`UnsupportedConversion`]: EngineError::UnsupportedConversion
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

use crate::validation::ValidationError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InvalidInput(String),
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: String, to: String },
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::InvalidInput(a), Self::InvalidInput(b)) => a == b,
            (Self::UnsupportedCurrency(a), Self::UnsupportedCurrency(b)) => a == b,
            (
                Self::UnsupportedConversion { from: f1, to: t1 },
                Self::UnsupportedConversion { from: f2, to: t2 },
            ) => f1 == f2 && t1 == t2,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidCredentials, Self::InvalidCredentials) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
