#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and surface-card ingestion for the dynacard analyzer.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - The card CSV loader enforces exact headers and rejects non-finite
//!   values, so the analysis core only ever sees clean numeric columns.
use serde::Deserialize;

/// Default smoothing window (samples, odd).
pub const DEFAULT_WINDOW: usize = 11;
/// Default polynomial order for the local fit.
pub const DEFAULT_POLYNOMIAL_ORDER: usize = 2;
/// Default pump stroke rate (strokes per minute).
pub const DEFAULT_STROKES_PER_MINUTE: u32 = 15;

/// Largest smoothing window the shell accepts.
pub const MAX_WINDOW: usize = 51;
/// Largest polynomial order the shell accepts.
pub const MAX_POLYNOMIAL_ORDER: usize = 5;

/// Surface-card CSV schema.
///
/// Expected headers:
/// Displacement,Rod Load
///
/// Example:
/// Displacement,Rod Load
/// 0.0,1250.0
/// 12.5,4830.0
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct CardRow {
    #[serde(rename = "Displacement")]
    pub displacement: f64,
    #[serde(rename = "Rod Load")]
    pub load: f64,
}

/// The two equal-length numeric columns of one surface card, already
/// validated for finiteness.
#[derive(Debug, Clone)]
pub struct CardData {
    /// Rod displacement per sample (inches).
    pub displacement: Vec<f64>,
    /// Rod load per sample (pound-force).
    pub load: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SmoothingCfg {
    /// Sliding window size in samples; must be odd.
    pub window: usize,
    /// Degree of the local polynomial fit; must stay below `window`.
    pub polynomial_order: usize,
}

impl Default for SmoothingCfg {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            polynomial_order: DEFAULT_POLYNOMIAL_ORDER,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PumpCfg {
    /// Stroke rate used to scale per-stroke volume to flow rates.
    pub strokes_per_minute: u32,
}

impl Default for PumpCfg {
    fn default() -> Self {
        Self {
            strokes_per_minute: DEFAULT_STROKES_PER_MINUTE,
        }
    }
}

/// Deviation thresholds for the surface/downhole comparison, in pound-force.
/// These encode empirical field knowledge and may need recalibration per well.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct DiagnosisCfg {
    /// Mean absolute deviation at or above which fluid pound is reported.
    pub fluid_pound_lbf: f64,
    /// Mean absolute deviation at or above which gas interference or
    /// leakage is reported.
    pub gas_interference_lbf: f64,
}

impl Default for DiagnosisCfg {
    fn default() -> Self {
        Self {
            fluid_pound_lbf: 100.0,
            gas_interference_lbf: 500.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub smoothing: SmoothingCfg,
    pub pump: PumpCfg,
    pub diagnosis: DiagnosisCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Smoothing
        if self.smoothing.window < 3 {
            eyre::bail!("smoothing.window must be >= 3");
        }
        if self.smoothing.window > MAX_WINDOW {
            eyre::bail!("smoothing.window must be <= {MAX_WINDOW}");
        }
        if self.smoothing.window % 2 == 0 {
            eyre::bail!("smoothing.window must be odd");
        }
        if self.smoothing.polynomial_order == 0 {
            eyre::bail!("smoothing.polynomial_order must be >= 1");
        }
        if self.smoothing.polynomial_order > MAX_POLYNOMIAL_ORDER {
            eyre::bail!("smoothing.polynomial_order must be <= {MAX_POLYNOMIAL_ORDER}");
        }
        if self.smoothing.polynomial_order >= self.smoothing.window {
            eyre::bail!("smoothing.polynomial_order must be < smoothing.window");
        }

        // Pump
        if !(1..=60).contains(&self.pump.strokes_per_minute) {
            eyre::bail!("pump.strokes_per_minute must be in [1, 60]");
        }

        // Diagnosis
        if !self.diagnosis.fluid_pound_lbf.is_finite() || self.diagnosis.fluid_pound_lbf <= 0.0 {
            eyre::bail!("diagnosis.fluid_pound_lbf must be finite and > 0");
        }
        if !self.diagnosis.gas_interference_lbf.is_finite()
            || self.diagnosis.gas_interference_lbf <= self.diagnosis.fluid_pound_lbf
        {
            eyre::bail!("diagnosis.gas_interference_lbf must be finite and > fluid_pound_lbf");
        }

        Ok(())
    }
}

/// Load one surface card from CSV with strict `Displacement,Rod Load` headers.
///
/// Rejects malformed rows and non-finite values so the core never sees them.
pub fn load_card_csv(path: &std::path::Path) -> eyre::Result<CardData> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open card CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["Displacement", "Rod Load"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "card CSV must have headers 'Displacement,Rod Load', got: {}",
            actual.join(",")
        );
    }

    let mut displacement = Vec::new();
    let mut load = Vec::new();
    for (idx, rec) in rdr.deserialize::<CardRow>().enumerate() {
        let row = match rec {
            Ok(row) => row,
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        };
        if !row.displacement.is_finite() || !row.load.is_finite() {
            eyre::bail!("non-finite value in CSV row {}", idx + 2);
        }
        displacement.push(row.displacement);
        load.push(row.load);
    }

    if displacement.is_empty() {
        eyre::bail!("card CSV {:?} contains no data rows", path);
    }

    Ok(CardData { displacement, load })
}
