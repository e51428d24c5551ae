//! CLI command implementations.

pub mod common;
pub mod correct;
pub mod info;
pub mod notes;
pub mod presets;
pub mod repair;
pub mod shift;
pub mod vibrato;
