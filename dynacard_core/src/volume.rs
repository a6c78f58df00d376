//! Stroke volume and flow-rate estimation from the downhole card.

use crate::error::{AnalysisError, Result};

/// Default pump stroke rate (strokes per minute).
pub const DEFAULT_STROKES_PER_MINUTE: u32 = 15;
/// Slowest supported stroke rate.
pub const MIN_STROKES_PER_MINUTE: u32 = 1;
/// Fastest supported stroke rate.
pub const MAX_STROKES_PER_MINUTE: u32 = 60;

/// Per-stroke volume and derived flow rates.
///
/// Units: load x displacement (lbf-in) is taken as a pseudo-volume in
/// barrels by domain convention; the conversion is a convention inherited
/// from field practice, not a computed quantity.
///
/// `stroke_volume_bbl` is the literal signed trapezoidal integral. A card
/// whose trace is not a closed loop (e.g. monotonic displacement) can yield
/// a negative value; the sign is preserved for the caller to interpret.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeResult {
    pub stroke_volume_bbl: f64,
    pub rate_bbl_per_minute: f64,
    pub rate_bbl_per_hour: f64,
}

/// Integrate the downhole load over displacement and scale by stroke rate.
///
/// Sample points may be non-uniformly spaced and non-monotonic; the
/// trapezoidal rule is applied in the order given.
pub fn estimate(
    displacement: &[f64],
    downhole_load: &[f64],
    strokes_per_minute: u32,
) -> Result<VolumeResult> {
    if !(MIN_STROKES_PER_MINUTE..=MAX_STROKES_PER_MINUTE).contains(&strokes_per_minute) {
        return Err(eyre::Report::new(AnalysisError::InvalidRate {
            got: strokes_per_minute,
        }));
    }
    if displacement.len() != downhole_load.len() {
        return Err(eyre::Report::new(AnalysisError::ShapeMismatch {
            left: displacement.len(),
            right: downhole_load.len(),
        }));
    }
    if displacement.len() < 2 {
        return Err(eyre::Report::new(AnalysisError::InsufficientData {
            got: displacement.len(),
            need: 2,
        }));
    }

    let stroke_volume_bbl = trapezoid(displacement, downhole_load);
    let rate_bbl_per_minute = stroke_volume_bbl * f64::from(strokes_per_minute);
    let rate_bbl_per_hour = rate_bbl_per_minute * 60.0;

    Ok(VolumeResult {
        stroke_volume_bbl,
        rate_bbl_per_minute,
        rate_bbl_per_hour,
    })
}

/// Signed trapezoidal integral of `y` with respect to `x`.
fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    let mut acc = 0.0;
    for i in 1..x.len() {
        acc += 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    acc
}

#[cfg(test)]
mod trapezoid_tests {
    use super::trapezoid;

    #[test]
    fn unit_square() {
        assert!((trapezoid(&[0.0, 1.0], &[1.0, 1.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn triangle_pulse() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 10.0, 20.0, 10.0, 0.0];
        assert!((trapezoid(&x, &y) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn reversed_x_negates() {
        let x = [2.0, 1.0, 0.0];
        let y = [1.0, 1.0, 1.0];
        assert!((trapezoid(&x, &y) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn non_uniform_spacing() {
        // y = x integrated over [0, 3] via points 0, 0.5, 3
        let x = [0.0, 0.5, 3.0];
        let y = [0.0, 0.5, 3.0];
        assert!((trapezoid(&x, &y) - 4.5).abs() < 1e-12);
    }
}
