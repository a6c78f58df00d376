//! The analyze subcommand: ingestion, parameter merging, and result rendering.

use dynacard_config::{
    Config, DEFAULT_POLYNOMIAL_ORDER, DEFAULT_STROKES_PER_MINUTE, DEFAULT_WINDOW,
    MAX_POLYNOMIAL_ORDER, MAX_WINDOW,
};
use dynacard_core::{
    AnalysisOutcome, AnalysisRequest, DiagnosisThresholds, SmoothingConfig, SurfaceCard, analyze,
};
use eyre::Result;
use std::path::Path;

pub struct AnalyzeArgs<'a> {
    pub card: &'a Path,
    pub window: Option<usize>,
    pub polynomial_order: Option<usize>,
    pub spm: Option<u32>,
    pub defaults: bool,
}

/// Resolve effective parameters: stock defaults, or config overridden by flags.
fn resolve_params(
    cfg: &Config,
    args: &AnalyzeArgs<'_>,
) -> Result<(SmoothingConfig, u32, DiagnosisThresholds)> {
    if args.defaults {
        let smoothing = SmoothingConfig {
            window: DEFAULT_WINDOW,
            polynomial_order: DEFAULT_POLYNOMIAL_ORDER,
        };
        return Ok((
            smoothing,
            DEFAULT_STROKES_PER_MINUTE,
            DiagnosisThresholds::default(),
        ));
    }

    let mut smoothing: SmoothingConfig = (&cfg.smoothing).into();
    if let Some(w) = args.window {
        smoothing.window = w;
    }
    if let Some(p) = args.polynomial_order {
        smoothing.polynomial_order = p;
    }
    // The core validates shape constraints (odd, order < window); the shell
    // additionally caps the range it accepts from operators.
    if smoothing.window > MAX_WINDOW {
        eyre::bail!("smoothing.window must be <= {MAX_WINDOW}");
    }
    if smoothing.polynomial_order > MAX_POLYNOMIAL_ORDER {
        eyre::bail!("smoothing.polynomial_order must be <= {MAX_POLYNOMIAL_ORDER}");
    }
    let spm = args.spm.unwrap_or(cfg.pump.strokes_per_minute);
    Ok((smoothing, spm, (&cfg.diagnosis).into()))
}

pub fn run_analyze(cfg: &Config, args: &AnalyzeArgs<'_>, json: bool) -> Result<()> {
    let data = dynacard_config::load_card_csv(args.card)?;
    let (smoothing, spm, thresholds) = resolve_params(cfg, args)?;
    tracing::info!(
        card = %args.card.display(),
        samples = data.load.len(),
        window = smoothing.window,
        polynomial_order = smoothing.polynomial_order,
        spm,
        "analyzing surface card"
    );

    let card = SurfaceCard::new(data.displacement, data.load)?;
    let request = AnalysisRequest {
        card,
        smoothing,
        strokes_per_minute: spm,
        thresholds,
    };
    let outcome = analyze(&request)?;

    if json {
        println!("{}", render_json(&request, &outcome));
    } else {
        render_pretty(&request, &outcome);
    }
    Ok(())
}

fn render_json(request: &AnalysisRequest, outcome: &AnalysisOutcome) -> String {
    serde_json::json!({
        "parameters": {
            "window": request.smoothing.window,
            "polynomial_order": request.smoothing.polynomial_order,
            "strokes_per_minute": request.strokes_per_minute,
        },
        "downhole": {
            "displacement": outcome.downhole.displacement(),
            "estimated_load": outcome.downhole.estimated_load(),
        },
        "volume": {
            "stroke_volume_bbl": outcome.volume.stroke_volume_bbl,
            "rate_bbl_per_minute": outcome.volume.rate_bbl_per_minute,
            "rate_bbl_per_hour": outcome.volume.rate_bbl_per_hour,
        },
        "diagnosis": {
            "condition": outcome.diagnosis.condition.name(),
            "label": outcome.diagnosis.condition.label(),
            "mean_abs_deviation_lbf": outcome.diagnosis.mean_abs_deviation,
        },
    })
    .to_string()
}

fn render_pretty(request: &AnalysisRequest, outcome: &AnalysisOutcome) {
    println!(
        "Downhole card: {} samples (window {}, order {})",
        outcome.downhole.len(),
        request.smoothing.window,
        request.smoothing.polynomial_order
    );
    println!(
        "Stroke volume: {:.3} bbl at {} spm",
        outcome.volume.stroke_volume_bbl, request.strokes_per_minute
    );
    println!(
        "Flow rate:     {:.3} bbl/min  ({:.1} bbl/hr)",
        outcome.volume.rate_bbl_per_minute, outcome.volume.rate_bbl_per_hour
    );
    println!(
        "Diagnosis:     {} (mean |deviation| {:.1} lbf)",
        outcome.diagnosis.condition.label(),
        outcome.diagnosis.mean_abs_deviation
    );
}

/// Run a tiny synthetic card through the full pipeline to prove the numerics
/// are wired up.
pub fn run_self_check(cfg: &Config, json: bool) -> Result<()> {
    let displacement: Vec<f64> = (0..32).map(|i| f64::from(i) * 2.0).collect();
    let load: Vec<f64> = (0..32)
        .map(|i| 5000.0 + 2000.0 * (f64::from(i) * 0.2).sin())
        .collect();
    let card = SurfaceCard::new(displacement, load)?;
    let request = AnalysisRequest {
        card,
        smoothing: (&cfg.smoothing).into(),
        strokes_per_minute: cfg.pump.strokes_per_minute,
        thresholds: (&cfg.diagnosis).into(),
    };
    let outcome = analyze(&request)?;
    if !outcome.volume.stroke_volume_bbl.is_finite()
        || !outcome.diagnosis.mean_abs_deviation.is_finite()
    {
        eyre::bail!("self-check produced non-finite results");
    }
    if json {
        println!("{}", serde_json::json!({ "status": "ok" }));
    } else {
        println!("self-check ok");
    }
    Ok(())
}
