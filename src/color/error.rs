use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ColorError {
    #[error("Invalid normalization window: min={min} must be below max={max}")]
    InvalidWindow { min: f64, max: f64 },

    #[error("Invalid color literal: {0}")]
    InvalidLiteral(String),
}

pub type Result<T> = std::result::Result<T, ColorError>;
