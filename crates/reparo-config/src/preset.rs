//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::step_config::StepConfig;

/// A named, ordered list of repair steps.
///
/// # TOML Format
///
/// ```toml
/// name = "Voice Cleanup"
/// description = "Gate, declick, hum removal, gentle compression"
///
/// [[steps]]
/// type = "gate"
/// [steps.params]
/// threshold = "-45dB"
/// release = "150ms"
///
/// [[steps]]
/// type = "dehum"
/// bypassed = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Display name.
    pub name: String,

    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps, applied in order.
    #[serde(default)]
    pub steps: Vec<StepConfig>,
}

impl Preset {
    /// Create an empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a step.
    pub fn with_step(mut self, step: StepConfig) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps.
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = StepConfig>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), steps = preset.len(), "loaded preset");
        Ok(preset)
    }

    /// Parse a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Write the preset as TOML, creating the parent directory if needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "saved preset");
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of steps, bypassed ones included.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when the preset has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Iterate over steps.
    pub fn iter(&self) -> impl Iterator<Item = &StepConfig> {
        self.steps.iter()
    }

    /// Step types in order, with `!` marking bypassed steps.
    pub fn step_types(&self) -> Vec<String> {
        self.steps.iter().map(StepConfig::display_type).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let preset = Preset::new("Test")
            .with_description("two steps")
            .with_step(StepConfig::new("declick"))
            .with_step(StepConfig::new("!dehum"));

        assert_eq!(preset.len(), 2);
        assert!(!preset.is_empty());
        assert_eq!(preset.description.as_deref(), Some("two steps"));
        assert_eq!(preset.step_types(), vec!["declick", "!dehum"]);
    }

    #[test]
    fn test_from_toml() {
        let preset = Preset::from_toml(
            r#"
name = "Voice"

[[steps]]
type = "gate"
[steps.params]
threshold = "-45dB"

[[steps]]
type = "dehum"
bypassed = true
"#,
        )
        .unwrap();

        assert_eq!(preset.name, "Voice");
        assert_eq!(preset.description, None);
        assert_eq!(preset.steps[0].get_param("threshold"), Some("-45dB"));
        assert!(preset.steps[1].bypassed);
    }

    #[test]
    fn test_missing_steps_is_empty() {
        let preset = Preset::from_toml(r#"name = "Nothing""#).unwrap();
        assert!(preset.is_empty());
    }

    #[test]
    fn test_toml_round_trip() {
        let preset = Preset::new("Master")
            .with_step(StepConfig::new("compress").with_param("ratio", "2"))
            .with_step(StepConfig::new("normalize").with_param("target", "-1dB"));

        let parsed = Preset::from_toml(&preset.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, preset);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Preset::from_toml("name = "),
            Err(ConfigError::TomlParse(_))
        ));
    }
}
