//! Repair presets and chain building for reparo.
//!
//! A preset is a TOML file listing repair steps by type, each with string
//! parameters that may carry unit suffixes. [`RepairChain`] turns a preset
//! (or a `type:key=value|type` chain string) into transforms from
//! `reparo-core`, validating every step type, parameter name and value.
//!
//! # Example
//!
//! ```rust
//! use reparo_config::{Preset, RepairChain, StepConfig};
//!
//! let preset = Preset::new("Tape Transfer")
//!     .with_description("Click removal and 50 Hz hum notch")
//!     .with_step(StepConfig::new("declick").with_param("threshold", "0.25"))
//!     .with_step(StepConfig::new("dehum").with_param("frequency", "50Hz"));
//!
//! let toml = preset.to_toml().unwrap();
//! let parsed = Preset::from_toml(&toml).unwrap();
//! let chain = RepairChain::from_preset(&parsed).unwrap();
//! assert_eq!(chain.step_names(), vec!["declick", "dehum"]);
//! ```

mod chain;
mod error;
mod preset;
mod step_config;

/// Preset locations on disk.
pub mod paths;

/// Presets bundled with the library.
pub mod factory_presets;

pub use chain::{RepairChain, STEP_TYPES, build_repair};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_presets_in_dir, list_user_presets, load_preset,
    preset_name_from_path, user_presets_dir,
};
pub use preset::Preset;
pub use step_config::{StepConfig, parse_chain_spec, parse_param_value};
