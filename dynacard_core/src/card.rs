//! Owned card types for one analysis pass.

use crate::error::{AnalysisError, Result};
use crate::smoother::SmoothingConfig;

/// One measured surface dynamometer card: paired (displacement, load)
/// samples tracing a single pump stroke at the wellhead.
///
/// Displacement values need not be sorted or uniformly spaced. The card is
/// constructed once per uploaded dataset and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceCard {
    displacement: Vec<f64>,
    load: Vec<f64>,
}

impl SurfaceCard {
    /// Build a card from equal-length, non-empty columns.
    pub fn new(displacement: Vec<f64>, load: Vec<f64>) -> Result<Self> {
        if displacement.len() != load.len() {
            return Err(eyre::Report::new(AnalysisError::ShapeMismatch {
                left: displacement.len(),
                right: load.len(),
            }));
        }
        if displacement.is_empty() {
            return Err(eyre::Report::new(AnalysisError::InsufficientData {
                got: 0,
                need: 1,
            }));
        }
        Ok(Self { displacement, load })
    }

    pub fn displacement(&self) -> &[f64] {
        &self.displacement
    }

    pub fn load(&self) -> &[f64] {
        &self.load
    }

    pub fn len(&self) -> usize {
        self.load.len()
    }

    pub fn is_empty(&self) -> bool {
        self.load.is_empty()
    }
}

/// The estimated downhole card: the surface card's displacement paired with
/// the reconstructed (denoised) load series of identical length.
#[derive(Debug, Clone, PartialEq)]
pub struct DownholeCard {
    displacement: Vec<f64>,
    estimated_load: Vec<f64>,
}

impl DownholeCard {
    pub(crate) fn new(displacement: Vec<f64>, estimated_load: Vec<f64>) -> Self {
        debug_assert_eq!(displacement.len(), estimated_load.len());
        Self {
            displacement,
            estimated_load,
        }
    }

    pub fn displacement(&self) -> &[f64] {
        &self.displacement
    }

    pub fn estimated_load(&self) -> &[f64] {
        &self.estimated_load
    }

    pub fn len(&self) -> usize {
        self.estimated_load.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimated_load.is_empty()
    }
}

/// Aggregate input driving one full analysis pass.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub card: SurfaceCard,
    pub smoothing: SmoothingConfig,
    /// Stroke rate in strokes per minute; valid range [1, 60].
    pub strokes_per_minute: u32,
    /// Deviation thresholds for classification; defaults encode the stock
    /// field calibration.
    pub thresholds: crate::diagnosis::DiagnosisThresholds,
}

impl AnalysisRequest {
    /// Request with stock thresholds.
    pub fn new(card: SurfaceCard, smoothing: SmoothingConfig, strokes_per_minute: u32) -> Self {
        Self {
            card,
            smoothing,
            strokes_per_minute,
            thresholds: crate::diagnosis::DiagnosisThresholds::default(),
        }
    }
}

/// Everything one pass produces. Either the full triple exists or the pass
/// failed; there is no partial result.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub downhole: DownholeCard,
    pub volume: crate::volume::VolumeResult,
    pub diagnosis: crate::diagnosis::DiagnosisResult,
}
