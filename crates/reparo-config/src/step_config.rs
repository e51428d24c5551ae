//! Repair step configuration and value parsing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ConfigError;

/// Configuration for one step of a repair chain.
///
/// A step has a type identifier and string parameters. Prefixing the type
/// with `!` (e.g. `!dehum`) marks the step as bypassed.
///
/// # Example
///
/// ```rust
/// use reparo_config::StepConfig;
///
/// let step = StepConfig::new("gate")
///     .with_param("threshold", "-45dB")
///     .with_param("release", "150ms");
///
/// assert_eq!(step.step_type, "gate");
/// assert!(!step.bypassed);
/// assert_eq!(step.parse_param("release"), Some(0.15));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepConfig {
    /// Step type (e.g. "gate", "dehum").
    #[serde(rename = "type")]
    pub step_type: String,

    /// Whether the step is skipped.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bypassed: bool,

    /// Parameters as written, with optional unit suffixes.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub params: HashMap<String, String>,
}

impl StepConfig {
    /// Create a step configuration. A leading `!` marks it bypassed.
    pub fn new(step_type: impl Into<String>) -> Self {
        let type_str = step_type.into();
        let (step_type, bypassed) = match type_str.strip_prefix('!') {
            Some(stripped) => (stripped.to_string(), true),
            None => (type_str, false),
        };

        Self {
            step_type,
            bypassed,
            params: HashMap::new(),
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set whether the step is bypassed.
    pub fn with_bypass(mut self, bypassed: bool) -> Self {
        self.bypassed = bypassed;
        self
    }

    /// Raw parameter value.
    pub fn get_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parameter converted with [`parse_param_value`].
    pub fn parse_param(&self, key: &str) -> Option<f32> {
        parse_param_value(self.params.get(key)?)
    }

    /// Parameters sorted by name, so errors are reported in a stable order.
    pub fn sorted_params(&self) -> Vec<(&str, &str)> {
        let mut params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        params.sort_unstable();
        params
    }

    /// Parse `value` for `param`, rejecting text and non-finite numbers.
    pub fn number(&self, param: &str, value: &str) -> Result<f32, ConfigError> {
        match parse_param_value(value) {
            Some(v) if v.is_finite() => Ok(v),
            Some(_) => Err(ConfigError::invalid_value(
                &self.step_type,
                param,
                value,
                "must be finite",
            )),
            None => Err(ConfigError::invalid_value(
                &self.step_type,
                param,
                value,
                "not a number",
            )),
        }
    }

    /// Type with the `!` prefix when bypassed.
    pub fn display_type(&self) -> String {
        if self.bypassed {
            format!("!{}", self.step_type)
        } else {
            self.step_type.clone()
        }
    }
}

/// Parse a parameter value into the parameter's native unit.
///
/// Native units are dB for levels, seconds for times, Hz for frequencies and
/// percent for depths. Suffixes are stripped and scaled accordingly:
///
/// | Suffix | Example | Result |
/// |--------|---------|--------|
/// | `dB` | `-6dB` | -6.0 |
/// | `ms` | `150ms` | 0.15 |
/// | `s` | `1.5s` | 1.5 |
/// | `Hz` | `60Hz` | 60.0 |
/// | `kHz` | `1.2kHz` | 1200.0 |
/// | `%` | `50%` | 50.0 |
/// | none | `4` | 4.0 |
///
/// Suffix matching ignores case.
pub fn parse_param_value(value: &str) -> Option<f32> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();

    // (number, multiplier, divisor)
    let (number, mul, div) = if let Some(n) = lower.strip_suffix('%') {
        (n, 1.0, 1.0)
    } else if let Some(n) = lower.strip_suffix("db") {
        (n, 1.0, 1.0)
    } else if let Some(n) = lower.strip_suffix("ms") {
        (n, 1.0, 1000.0)
    } else if let Some(n) = lower.strip_suffix("khz") {
        (n, 1000.0, 1.0)
    } else if let Some(n) = lower.strip_suffix("hz") {
        (n, 1.0, 1.0)
    } else if let Some(n) = lower.strip_suffix('s') {
        (n, 1.0, 1.0)
    } else {
        (lower.as_str(), 1.0, 1.0)
    };

    number
        .trim()
        .parse::<f32>()
        .ok()
        .map(|v: f32| v * mul / div)
}

/// Parse a chain string into step configurations.
///
/// Format: `type:key=value,key=value|type|!type:key=value`. Empty segments
/// are skipped.
///
/// ```rust
/// use reparo_config::parse_chain_spec;
///
/// let steps = parse_chain_spec("declick|dehum:frequency=50Hz|!normalize").unwrap();
/// assert_eq!(steps.len(), 3);
/// assert_eq!(steps[1].get_param("frequency"), Some("50Hz"));
/// assert!(steps[2].bypassed);
/// ```
pub fn parse_chain_spec(spec: &str) -> Result<Vec<StepConfig>, ConfigError> {
    let mut steps = Vec::new();

    for step_spec in spec.split('|') {
        let step_spec = step_spec.trim();
        if step_spec.is_empty() {
            continue;
        }

        let (name, params) = match step_spec.split_once(':') {
            Some((name, params)) => (name.trim(), params),
            None => (step_spec, ""),
        };
        if name.is_empty() || name == "!" {
            return Err(ConfigError::ChainSyntax(format!(
                "missing step type in '{step_spec}'"
            )));
        }

        let mut step = StepConfig::new(name);
        for param in params.split(',') {
            let param = param.trim();
            if param.is_empty() {
                continue;
            }
            let Some((key, value)) = param.split_once('=') else {
                return Err(ConfigError::ChainSyntax(format!(
                    "invalid parameter format: '{param}' (expected key=value)"
                )));
            };
            step.params
                .insert(key.trim().to_string(), value.trim().to_string());
        }

        steps.push(step);
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_config_new() {
        let step = StepConfig::new("declick");
        assert_eq!(step.step_type, "declick");
        assert!(!step.bypassed);
        assert!(step.params.is_empty());
    }

    #[test]
    fn test_bypass_prefix() {
        let step = StepConfig::new("!dehum");
        assert_eq!(step.step_type, "dehum");
        assert!(step.bypassed);
        assert_eq!(step.display_type(), "!dehum");
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_param_value("0.5"), Some(0.5));
        assert_eq!(parse_param_value("-20"), Some(-20.0));
        assert_eq!(parse_param_value("  4  "), Some(4.0));
    }

    #[test]
    fn test_parse_decibels_stay_in_db() {
        assert_eq!(parse_param_value("-6dB"), Some(-6.0));
        assert_eq!(parse_param_value("+3 dB"), Some(3.0));
        assert_eq!(parse_param_value("-45db"), Some(-45.0));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_param_value("100ms"), Some(0.1));
        assert_eq!(parse_param_value("1.5s"), Some(1.5));
        assert_eq!(parse_param_value("5 ms"), Some(0.005));
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_param_value("60Hz"), Some(60.0));
        assert_eq!(parse_param_value("1.2kHz"), Some(1200.0));
        assert_eq!(parse_param_value("50 hz"), Some(50.0));
    }

    #[test]
    fn test_parse_percent_keeps_number() {
        assert_eq!(parse_param_value("50%"), Some(50.0));
        assert_eq!(parse_param_value("120%"), Some(120.0));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_param_value("loud"), None);
        assert_eq!(parse_param_value(""), None);
        assert_eq!(parse_param_value("dB"), None);
    }

    #[test]
    fn test_number_rejects_non_finite() {
        let step = StepConfig::new("gate");
        assert!(step.number("threshold", "inf").is_err());
        assert!(step.number("threshold", "NaN").is_err());
        assert!(matches!(
            step.number("threshold", "quiet"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(step.number("threshold", "-40dB").unwrap(), -40.0);
    }

    #[test]
    fn test_chain_spec() {
        let steps = parse_chain_spec("gate:threshold=-45dB,release=150ms | declick").unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].step_type, "gate");
        assert_eq!(steps[0].get_param("threshold"), Some("-45dB"));
        assert_eq!(steps[0].get_param("release"), Some("150ms"));
        assert_eq!(steps[1].step_type, "declick");
    }

    #[test]
    fn test_chain_spec_errors() {
        assert!(matches!(
            parse_chain_spec("gate:threshold"),
            Err(ConfigError::ChainSyntax(_))
        ));
        assert!(matches!(parse_chain_spec(":a=1"), Err(ConfigError::ChainSyntax(_))));
        assert!(parse_chain_spec("").unwrap().is_empty());
    }

    #[test]
    fn test_sorted_params() {
        let step = StepConfig::new("compress")
            .with_param("ratio", "4")
            .with_param("attack", "5ms");
        assert_eq!(step.sorted_params(), vec![("attack", "5ms"), ("ratio", "4")]);
    }
}
