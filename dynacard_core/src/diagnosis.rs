//! Threshold-based pump condition diagnosis.
//!
//! Compares the raw surface load against the reconstructed downhole load
//! pointwise. Thresholds encode empirical field knowledge (pound-force) and
//! are carried as named, overridable values rather than inlined constants so
//! they can be recalibrated per well.

use crate::error::{AnalysisError, Result};

/// Stock mean-absolute-deviation threshold (lbf) at which fluid pound is
/// reported.
pub const FLUID_POUND_THRESHOLD_LBF: f64 = 100.0;
/// Stock mean-absolute-deviation threshold (lbf) at which gas interference
/// or leakage is reported.
pub const GAS_INTERFERENCE_THRESHOLD_LBF: f64 = 500.0;

/// Deviation thresholds for classification, in pound-force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosisThresholds {
    /// At or above this deviation the card reads as fluid pound.
    pub fluid_pound_lbf: f64,
    /// At or above this deviation the card reads as gas interference or
    /// leakage.
    pub gas_interference_lbf: f64,
}

impl Default for DiagnosisThresholds {
    fn default() -> Self {
        Self {
            fluid_pound_lbf: FLUID_POUND_THRESHOLD_LBF,
            gas_interference_lbf: GAS_INTERFERENCE_THRESHOLD_LBF,
        }
    }
}

impl DiagnosisThresholds {
    pub(crate) fn check(&self) -> std::result::Result<(), AnalysisError> {
        if !self.fluid_pound_lbf.is_finite() || self.fluid_pound_lbf <= 0.0 {
            return Err(AnalysisError::Config(
                "fluid_pound_lbf must be finite and > 0",
            ));
        }
        if !self.gas_interference_lbf.is_finite()
            || self.gas_interference_lbf <= self.fluid_pound_lbf
        {
            return Err(AnalysisError::Config(
                "gas_interference_lbf must be finite and > fluid_pound_lbf",
            ));
        }
        Ok(())
    }
}

/// Pump operating condition for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpCondition {
    Normal,
    FluidPound,
    GasInterferenceOrLeakage,
}

impl PumpCondition {
    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal Pumping",
            Self::FluidPound => "Fluid Pound Detected",
            Self::GasInterferenceOrLeakage => "Gas Interference / Leakage",
        }
    }

    /// Stable machine-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::FluidPound => "FluidPound",
            Self::GasInterferenceOrLeakage => "GasInterferenceOrLeakage",
        }
    }
}

impl std::fmt::Display for PumpCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification plus the deviation score that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiagnosisResult {
    pub condition: PumpCondition,
    pub mean_abs_deviation: f64,
}

/// Classify the pump's operating condition from the surface/downhole spread.
///
/// Deviations exactly at a threshold classify as the more severe condition.
pub fn diagnose(
    surface_load: &[f64],
    downhole_load: &[f64],
    thresholds: &DiagnosisThresholds,
) -> Result<DiagnosisResult> {
    thresholds.check().map_err(eyre::Report::new)?;
    if surface_load.len() != downhole_load.len() {
        return Err(eyre::Report::new(AnalysisError::ShapeMismatch {
            left: surface_load.len(),
            right: downhole_load.len(),
        }));
    }
    if surface_load.is_empty() {
        return Err(eyre::Report::new(AnalysisError::InsufficientData {
            got: 0,
            need: 1,
        }));
    }

    let sum: f64 = surface_load
        .iter()
        .zip(downhole_load)
        .map(|(s, d)| (s - d).abs())
        .sum();
    let mean_abs_deviation = sum / surface_load.len() as f64;

    let condition = if mean_abs_deviation < thresholds.fluid_pound_lbf {
        PumpCondition::Normal
    } else if mean_abs_deviation < thresholds.gas_interference_lbf {
        PumpCondition::FluidPound
    } else {
        PumpCondition::GasInterferenceOrLeakage
    };

    Ok(DiagnosisResult {
        condition,
        mean_abs_deviation,
    })
}
