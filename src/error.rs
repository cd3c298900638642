use thiserror::Error;
use typer::TyperError;

#[derive(Error, Debug)]
pub enum TypewriterError {
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Typer(#[from] TyperError),

    #[error("Invalid delay: {0} (expected a non-negative number of seconds)")]
    InvalidDelay(f64),

    #[error("Nothing to type")]
    EmptyInput,
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, TypewriterError>;
