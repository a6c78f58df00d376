//! Trait seams for the dynacard analysis pipeline.

/// Downhole load reconstruction from a surface load series.
///
/// The stock implementation is a Savitzky-Golay smoother that stands in for
/// physics-based card reconstruction. A wave-equation solver can be dropped
/// in behind this trait without touching the volume or diagnosis stages.
///
/// Implementations must be pure: the output depends only on `loads` and the
/// reconstructor's own configuration, and its length must equal `loads.len()`.
pub trait Reconstructor {
    fn reconstruct(
        &self,
        loads: &[f64],
    ) -> Result<Vec<f64>, Box<dyn std::error::Error + Send + Sync>>;
}
