use thiserror::Error;

use crate::schedule::Slot;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Time slot already booked: {hour}")]
    Conflict { hour: Slot },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type BookingResult<T> = Result<T, BookingError>;
