//! The single-pass analysis pipeline.
//!
//! raw series -> reconstruction -> {volume metrics, diagnosis}. Every stage
//! is a pure function; no state survives the pass, and running passes
//! concurrently is safe without locking.

use crate::card::{AnalysisOutcome, AnalysisRequest, DownholeCard};
use crate::diagnosis;
use crate::error::{AnalysisError, Result};
use crate::smoother::SavitzkyGolay;
use crate::volume;
use dynacard_traits::Reconstructor;

/// Run one full pass with the stock Savitzky-Golay reconstructor.
///
/// Either the complete (downhole, volume, diagnosis) triple is produced or
/// the first error aborts the pass; callers never see a partial result.
pub fn analyze(request: &AnalysisRequest) -> Result<AnalysisOutcome> {
    let recon = SavitzkyGolay::new(request.smoothing)?;
    analyze_with(&recon, request)
}

/// Run one full pass with any downhole reconstructor.
pub fn analyze_with<R: Reconstructor>(recon: &R, request: &AnalysisRequest) -> Result<AnalysisOutcome> {
    let card = &request.card;

    tracing::debug!(samples = card.len(), "downhole reconstruction");
    let estimated = recon
        .reconstruct(card.load())
        .map_err(map_reconstruct_error)?;
    if estimated.len() != card.len() {
        return Err(eyre::Report::new(AnalysisError::ShapeMismatch {
            left: card.len(),
            right: estimated.len(),
        }));
    }
    let downhole = DownholeCard::new(card.displacement().to_vec(), estimated);

    tracing::debug!(spm = request.strokes_per_minute, "volume estimation");
    let volume = volume::estimate(
        downhole.displacement(),
        downhole.estimated_load(),
        request.strokes_per_minute,
    )?;

    let diagnosis = diagnosis::diagnose(card.load(), downhole.estimated_load(), &request.thresholds)?;
    tracing::debug!(
        condition = diagnosis.condition.name(),
        mean_abs_deviation = diagnosis.mean_abs_deviation,
        stroke_volume_bbl = volume.stroke_volume_bbl,
        "analysis pass complete"
    );

    Ok(AnalysisOutcome {
        downhole,
        volume,
        diagnosis,
    })
}

// Surface typed core errors from a boxed reconstructor error; anything else
// is wrapped with context.
fn map_reconstruct_error(e: Box<dyn std::error::Error + Send + Sync>) -> eyre::Report {
    match e.downcast::<AnalysisError>() {
        Ok(typed) => eyre::Report::new(*typed),
        Err(other) => eyre::eyre!("downhole reconstruction failed: {other}"),
    }
}
