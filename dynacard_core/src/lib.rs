#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Surface dynamometer card analysis (presentation-agnostic).
//!
//! This crate estimates a sucker-rod pump's downhole card from its surface
//! card, derives a produced-fluid volume estimate, and classifies the pump's
//! operating condition. Ingestion and rendering live outside; the crate only
//! consumes validated numeric columns and emits plain values.
//!
//! ## Architecture
//!
//! - **Smoothing**: Savitzky-Golay least-squares fit standing in for
//!   wave-equation reconstruction (`smoother` module, behind the
//!   `dynacard_traits::Reconstructor` seam)
//! - **Volume**: trapezoidal stroke integral scaled by stroke rate
//!   (`volume` module)
//! - **Diagnosis**: mean-absolute-deviation thresholding (`diagnosis`
//!   module)
//! - **Pipeline**: one stateless pass producing an all-or-nothing triple
//!   (`analysis` module)
//!
//! ## Numerics
//!
//! All series math is `f64`. The smoothing window trades fidelity for noise
//! rejection; see the `smoother` module docs. Nothing in this crate
//! auto-tunes parameters or retains state between passes.

pub mod analysis;
pub mod card;
pub mod conversions;
pub mod diagnosis;
pub mod error;
pub mod smoother;
pub mod volume;

pub use analysis::{analyze, analyze_with};
pub use card::{AnalysisOutcome, AnalysisRequest, DownholeCard, SurfaceCard};
pub use diagnosis::{
    DiagnosisResult, DiagnosisThresholds, FLUID_POUND_THRESHOLD_LBF,
    GAS_INTERFERENCE_THRESHOLD_LBF, PumpCondition, diagnose,
};
pub use error::AnalysisError;
pub use smoother::{
    DEFAULT_POLYNOMIAL_ORDER, DEFAULT_WINDOW, SavitzkyGolay, SmoothingConfig, smooth,
};
pub use volume::{
    DEFAULT_STROKES_PER_MINUTE, MAX_STROKES_PER_MINUTE, MIN_STROKES_PER_MINUTE, VolumeResult,
    estimate,
};
