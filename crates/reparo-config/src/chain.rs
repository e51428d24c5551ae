//! Repair chain built from step configurations.
//!
//! # Example
//!
//! ```rust
//! use reparo_config::{Preset, RepairChain, StepConfig};
//! use reparo_core::SampleBuffer;
//!
//! let preset = Preset::new("Cleanup")
//!     .with_step(StepConfig::new("declick"))
//!     .with_step(StepConfig::new("normalize").with_param("target", "-1dB"));
//!
//! let chain = RepairChain::from_preset(&preset).unwrap();
//! let input = SampleBuffer::from_fn(4800, 48000.0, |i| (i as f32 * 0.05).sin() * 0.2);
//! let output = chain.apply(&input);
//! assert_eq!(output.len(), input.len());
//! ```

use reparo_core::{
    BroadbandEq, ClickRemover, Compressor, DeHum, Fade, NoiseGate, Normalizer, Repair,
    SampleBuffer, VibratoSettings,
};

use crate::error::ConfigError;
use crate::preset::Preset;
use crate::step_config::{StepConfig, parse_chain_spec};

/// Step types a chain can build.
pub const STEP_TYPES: &[&str] = &[
    "gate", "declick", "dehum", "eq", "compress", "normalize", "fade", "vibrato",
];

struct ChainEntry {
    repair: Box<dyn Repair + Send>,
    bypassed: bool,
    step_type: String,
}

/// An ordered list of repair transforms applied one after another.
///
/// Bypassed steps stay in the chain (so they can be re-enabled) but are
/// skipped by [`apply`](Self::apply).
#[derive(Default)]
pub struct RepairChain {
    entries: Vec<ChainEntry>,
}

impl RepairChain {
    /// Create an empty chain. Applying it returns a copy of the input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chain from every step of `preset`.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown step type, unknown parameter or
    /// unparsable value.
    pub fn from_preset(preset: &Preset) -> Result<Self, ConfigError> {
        Self::from_steps(&preset.steps)
    }

    /// Build a chain from step configurations.
    pub fn from_steps(steps: &[StepConfig]) -> Result<Self, ConfigError> {
        let mut chain = Self::new();
        for step in steps {
            chain.add_step(step)?;
        }
        Ok(chain)
    }

    /// Build a chain from a `type:key=value|type` string.
    pub fn from_spec(spec: &str) -> Result<Self, ConfigError> {
        Self::from_steps(&parse_chain_spec(spec)?)
    }

    /// Append a step.
    pub fn add_step(&mut self, config: &StepConfig) -> Result<(), ConfigError> {
        let repair = build_repair(config)?;
        tracing::debug!(
            step = %config.step_type,
            bypassed = config.bypassed,
            params = config.params.len(),
            "added repair step"
        );
        self.entries.push(ChainEntry {
            repair,
            bypassed: config.bypassed,
            step_type: config.step_type.clone(),
        });
        Ok(())
    }

    /// Number of steps, bypassed ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the chain has no steps.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bypass or re-enable the step at `index`. Returns false when out of range.
    pub fn set_bypassed(&mut self, index: usize, bypassed: bool) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.bypassed = bypassed;
                true
            }
            None => false,
        }
    }

    /// Whether the step at `index` is bypassed.
    pub fn is_bypassed(&self, index: usize) -> Option<bool> {
        self.entries.get(index).map(|e| e.bypassed)
    }

    /// Step types in order.
    pub fn step_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.step_type.as_str()).collect()
    }

    /// Run every active step over `input`.
    pub fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        let mut buffer = input.clone();
        for entry in self.entries.iter().filter(|e| !e.bypassed) {
            tracing::trace!(step = entry.repair.name(), "applying");
            buffer = entry.repair.apply(&buffer);
        }
        buffer
    }
}

impl Repair for RepairChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn apply(&self, input: &SampleBuffer) -> SampleBuffer {
        RepairChain::apply(self, input)
    }
}

impl std::fmt::Debug for RepairChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| {
                if e.bypassed {
                    format!("!{}", e.step_type)
                } else {
                    e.step_type.clone()
                }
            }))
            .finish()
    }
}

/// Create the transform described by `config`, starting from its defaults.
pub fn build_repair(config: &StepConfig) -> Result<Box<dyn Repair + Send>, ConfigError> {
    let params = config.sorted_params();
    let unknown = |param: &str| ConfigError::UnknownParameter {
        step: config.step_type.clone(),
        param: param.to_string(),
    };

    let repair: Box<dyn Repair + Send> = match config.step_type.as_str() {
        "gate" => {
            let mut gate = NoiseGate::default();
            for (key, value) in params {
                match key {
                    "threshold" => gate.threshold_db = config.number(key, value)?,
                    "attack" => gate.attack_secs = config.number(key, value)?,
                    "release" => gate.release_secs = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(gate)
        }
        "declick" => {
            let mut declick = ClickRemover::default();
            for (key, value) in params {
                match key {
                    "threshold" => declick.threshold = config.number(key, value)?,
                    "window" => {
                        let v = config.number(key, value)?;
                        if v < 0.0 || v.fract() != 0.0 {
                            return Err(ConfigError::invalid_value(
                                &config.step_type,
                                key,
                                value,
                                "must be a whole number of samples",
                            ));
                        }
                        declick.window_samples = v as usize;
                    }
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(declick)
        }
        "dehum" => {
            let mut dehum = DeHum::default();
            for (key, value) in params {
                match key {
                    "frequency" | "freq" => dehum.frequency = config.number(key, value)?,
                    "bandwidth" => dehum.bandwidth_hz = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(dehum)
        }
        "eq" => {
            let mut eq = BroadbandEq::default();
            for (key, value) in params {
                match key {
                    "low" => eq.low_db = config.number(key, value)?,
                    "mid" => eq.mid_db = config.number(key, value)?,
                    "high" => eq.high_db = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(eq)
        }
        "compress" => {
            let mut comp = Compressor::default();
            for (key, value) in params {
                match key {
                    "threshold" => comp.threshold_db = config.number(key, value)?,
                    "ratio" => comp.ratio = config.number(key, value)?,
                    "attack" => comp.attack_secs = config.number(key, value)?,
                    "release" => comp.release_secs = config.number(key, value)?,
                    "makeup" => comp.makeup_db = config.number(key, value)?,
                    "knee" => comp.knee_db = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(comp)
        }
        "normalize" => {
            let mut norm = Normalizer::default();
            for (key, value) in params {
                match key {
                    "target" => norm.target_db = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(norm)
        }
        "fade" => {
            let mut fade = Fade::default();
            for (key, value) in params {
                match key {
                    "in" => fade.fade_in_secs = config.number(key, value)?,
                    "out" => fade.fade_out_secs = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(fade)
        }
        "vibrato" => {
            let mut vibrato = VibratoSettings {
                enabled: true,
                ..VibratoSettings::default()
            };
            for (key, value) in params {
                match key {
                    "rate" => vibrato.rate_hz = config.number(key, value)?,
                    "depth" => vibrato.depth_percent = config.number(key, value)?,
                    _ => return Err(unknown(key)),
                }
            }
            Box::new(vibrato)
        }
        other => return Err(ConfigError::UnknownStep(other.to_string())),
    };

    Ok(repair)
}
