//! `From` implementations bridging `dynacard_config` types to core types.
//!
//! These keep field-by-field mapping out of the CLI.

use crate::diagnosis::DiagnosisThresholds;
use crate::smoother::SmoothingConfig;

impl From<&dynacard_config::SmoothingCfg> for SmoothingConfig {
    fn from(c: &dynacard_config::SmoothingCfg) -> Self {
        Self {
            window: c.window,
            polynomial_order: c.polynomial_order,
        }
    }
}

impl From<&dynacard_config::DiagnosisCfg> for DiagnosisThresholds {
    fn from(c: &dynacard_config::DiagnosisCfg) -> Self {
        Self {
            fluid_pound_lbf: c.fluid_pound_lbf,
            gas_interference_lbf: c.gas_interference_lbf,
        }
    }
}
