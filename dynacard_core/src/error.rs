use thiserror::Error;

/// Typed failures for a single analysis pass.
///
/// All variants are deterministic consequences of the current input and
/// configuration; retrying without changing either reproduces the failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Invalid window/polynomial-order relationship or other bad parameter.
    #[error("configuration error: {0}")]
    Config(&'static str),
    /// Stroke rate outside the supported [1, 60] strokes-per-minute range.
    #[error("invalid stroke rate: {got} spm (must be in [1, 60])")]
    InvalidRate { got: u32 },
    /// Fewer samples than the chosen window or than integration requires.
    #[error("insufficient data: got {got} samples, need at least {need}")]
    InsufficientData { got: usize, need: usize },
    /// Paired sequences of unequal length.
    #[error("shape mismatch: paired series have lengths {left} and {right}")]
    ShapeMismatch { left: usize, right: usize },
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
