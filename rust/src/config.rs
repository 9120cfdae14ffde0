//! Configuration for network computation.

use pyo3::prelude::*;

/// Settings applied by `Network::compute` and the queries built on it.
#[pyclass]
#[derive(Clone, Debug)]
pub struct CpmConfig {
    /// Absolute epsilon below which a total float counts as zero.
    #[pyo3(get, set)]
    pub critical_tolerance: f64,
    /// Number of decimal places total and free float are rounded to.
    #[pyo3(get, set)]
    pub float_decimals: u32,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            critical_tolerance: 1e-9,
            float_decimals: 6,
            verbosity: 0,
        }
    }
}

impl CpmConfig {
    /// Round a float value to the configured number of decimals.
    ///
    /// Values too large to scale come back unchanged; they carry no
    /// fractional digits at that magnitude anyway.
    pub fn round_float(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.float_decimals as i32);
        let scaled = value * factor;
        if !scaled.is_finite() {
            return value;
        }
        scaled.round() / factor
    }

    pub fn is_zero_float(&self, value: f64) -> bool {
        value.abs() < self.critical_tolerance
    }
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (critical_tolerance=1e-9, float_decimals=6, verbosity=0))]
    fn new(critical_tolerance: f64, float_decimals: u32, verbosity: u8) -> Self {
        Self {
            critical_tolerance,
            float_decimals,
            verbosity,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CpmConfig(critical_tolerance={}, float_decimals={}, verbosity={})",
            self.critical_tolerance, self.float_decimals, self.verbosity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CpmConfig::default();
        assert!((config.critical_tolerance - 1e-9).abs() < 1e-15);
        assert_eq!(config.float_decimals, 6);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_round_float() {
        let config = CpmConfig::default();
        assert_eq!(config.round_float(0.1 + 0.2 - 0.3), 0.0);
        assert_eq!(config.round_float(2.0000004), 2.0);
        assert_eq!(config.round_float(1.2345678), 1.234568);

        let coarse = CpmConfig {
            float_decimals: 1,
            ..CpmConfig::default()
        };
        assert_eq!(coarse.round_float(1.26), 1.3);
    }

    #[test]
    fn test_round_float_large_values_unchanged() {
        let config = CpmConfig::default();
        assert_eq!(config.round_float(1e303), 1e303);
        assert_eq!(config.round_float(-1e303), -1e303);
        assert_eq!(config.round_float(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_is_zero_float() {
        let config = CpmConfig::default();
        assert!(config.is_zero_float(0.0));
        assert!(config.is_zero_float(-1e-12));
        assert!(!config.is_zero_float(1e-6));
        assert!(!config.is_zero_float(-2.0));
    }
}
