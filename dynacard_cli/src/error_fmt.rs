//! Human-readable error descriptions and structured JSON error formatting.

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use dynacard_core::AnalysisError;

    // Typed matches first
    if let Some(ae) = err.downcast_ref::<AnalysisError>() {
        return match ae {
            AnalysisError::Config(msg) => format!(
                "What happened: Invalid analysis parameters ({msg}).\nLikely causes: Out-of-range values in the TOML or on the command line.\nHow to fix: The window must be odd and larger than the polynomial order; edit the config or flags and rerun."
            ),
            AnalysisError::InvalidRate { got } => format!(
                "What happened: Stroke rate {got} spm is outside the supported range.\nLikely causes: A typo in pump.strokes_per_minute or --spm.\nHow to fix: Use a rate between 1 and 60 strokes per minute."
            ),
            AnalysisError::InsufficientData { got, need } => format!(
                "What happened: The card has {got} samples but the analysis needs at least {need}.\nLikely causes: A truncated CSV export, or a smoothing window wider than the stroke trace.\nHow to fix: Export the full stroke, or lower --window below the sample count."
            ),
            AnalysisError::ShapeMismatch { left, right } => format!(
                "What happened: Paired series have different lengths ({left} vs {right}).\nLikely causes: A malformed CSV with ragged rows, or a custom reconstructor changing the sample count.\nHow to fix: Re-export the card CSV; every row needs both columns."
            ),
        };
    }

    // String-based heuristics for errors coming from ingestion or config
    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    if lower.contains("card csv must have headers") {
        return "Invalid headers in card CSV. Expected 'Displacement,Rod Load'.".to_string();
    }

    if lower.contains("invalid csv row") || lower.contains("non-finite value in csv row") {
        return format!(
            "What happened: {msg}.\nLikely causes: A non-numeric or NaN/inf cell in the export.\nHow to fix: Fix the offending row (numbers only) and rerun."
        );
    }

    if lower.contains("must be") {
        return format!(
            "What happened: Configuration is invalid ({msg}).\nLikely causes: Out-of-range values in the TOML config.\nHow to fix: Edit the config file, then rerun. See etc/dynacard.toml for a sample."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Map typed analysis errors (if present) to stable exit codes; config/parse
/// problems return 2, anything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    use dynacard_core::AnalysisError;
    if let Some(ae) = err.downcast_ref::<AnalysisError>() {
        return match ae {
            AnalysisError::Config(_) => 2,
            AnalysisError::InsufficientData { .. } => 3,
            AnalysisError::ShapeMismatch { .. } => 4,
            AnalysisError::InvalidRate { .. } => 5,
        };
    }
    if err.to_string().to_ascii_lowercase().contains("must be") {
        return 2;
    }
    1
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use dynacard_core::AnalysisError;
    use serde_json::json;

    let msg = humanize(err);
    if let Some(ae) = err.downcast_ref::<AnalysisError>() {
        let (reason, details) = match ae {
            AnalysisError::Config(detail) => ("Config", Some(json!({ "detail": detail }))),
            AnalysisError::InvalidRate { got } => ("InvalidRate", Some(json!({ "got": got }))),
            AnalysisError::InsufficientData { got, need } => {
                ("InsufficientData", Some(json!({ "got": got, "need": need })))
            }
            AnalysisError::ShapeMismatch { left, right } => {
                ("ShapeMismatch", Some(json!({ "left": left, "right": right })))
            }
        };
        let obj = if let Some(d) = details {
            json!({ "reason": reason, "details": d, "message": msg })
        } else {
            json!({ "reason": reason, "message": msg })
        };
        return obj.to_string();
    }

    // Generic error JSON
    json!({ "reason": "Error", "message": msg }).to_string()
}
