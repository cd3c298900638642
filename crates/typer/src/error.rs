//! Error and diagnostic types for the typing layer.

use std::time::Duration;

use tagtext::MarkupError;
use thiserror::Error;

/// Failures surfaced to the caller.
///
/// Markup problems never show up here; they are [`PlanDiagnostic`]s.
#[derive(Debug, Error)]
pub enum TyperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("a logger is already installed: {0}")]
    SetLogger(#[from] log::SetLoggerError),

    /// The scheduler was created outside a Tokio runtime.
    #[error("no Tokio runtime is running")]
    NoRuntime,
}

/// Recoverable problems found while planning a typing request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanDiagnostic {
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// A timing directive parameter that is not a non-negative number.
    #[error("invalid delay '{parameter}', using {fallback:?}")]
    InvalidDelay {
        parameter: String,
        fallback: Duration,
    },

    /// An animation key found in neither preset library.
    #[error("unknown animation preset '{0}'")]
    UnknownPreset(String),

    /// An animation key found in both preset libraries.
    #[error("animation preset '{0}' is both a shake and a curve preset")]
    AmbiguousPreset(String),

    /// A closing animation directive with no open one pending.
    #[error("closing animation directive {0} has no open directive")]
    UnopenedAnimation(String),

    /// An animation directive pair that encloses no printed units.
    #[error("animation '{key}' at printed index {at} covers no characters")]
    EmptyAnimation { key: String, at: usize },

    /// An animation directive still open at the end of the text.
    #[error("animation '{key}' opened at printed index {start} is never closed")]
    UnclosedAnimation { key: String, start: usize },
}

pub type Result<T> = std::result::Result<T, TyperError>;
