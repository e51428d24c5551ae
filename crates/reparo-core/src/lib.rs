//! Reparo Core - sample buffers and repair transforms
//!
//! This crate holds the part of reparo that never touches a file or a pitch
//! tracker: an owned sample container and the single-pass transforms used to
//! clean up a recording before it is analyzed.
//!
//! # Core Abstractions
//!
//! - [`SampleBuffer`] - Fixed-length owned samples with an attached sample rate
//! - [`Repair`] - Object-safe trait implemented by every transform
//!
//! ## Repair Transforms
//!
//! | Transform | Purpose |
//! |-----------|---------|
//! | [`NoiseGate`] | Soft-mutes passages that stay below a threshold |
//! | [`ClickRemover`] | Replaces isolated jumps with the local mean |
//! | [`DeHum`] | Notches mains hum at 50/60 Hz |
//! | [`BroadbandEq`] | Three-gain broadband level trim |
//! | [`Compressor`] | Soft-knee compressor with smoothed gain reduction |
//! | [`Normalizer`] | Peak normalization |
//! | [`Fade`] | Linear fade in / fade out |
//!
//! ## Modulation
//!
//! - [`VibratoSettings`] / [`apply_vibrato`] - amplitude-domain vibrato
//!
//! ## Filters and Math
//!
//! - [`Biquad`] / [`BiquadCoefficients`] - Direct Form I second-order section
//! - [`db_to_linear`], [`linear_to_db`], [`peak`], [`mean_abs`]
//!
//! # Example
//!
//! ```rust
//! use reparo_core::{ClickRemover, Compressor, DeHum, Normalizer, Repair, SampleBuffer};
//!
//! let input = SampleBuffer::from_fn(48000, 48000.0, |i| (i as f32 * 0.01).sin() * 0.5);
//!
//! let steps: Vec<Box<dyn Repair>> = vec![
//!     Box::new(ClickRemover::default()),
//!     Box::new(DeHum::default()),
//!     Box::new(Compressor::default()),
//!     Box::new(Normalizer::default()),
//! ];
//!
//! let output = steps.iter().fold(input, |buffer, step| step.apply(&buffer));
//! assert_eq!(output.len(), 48000);
//! ```
//!
//! # no_std Support
//!
//! The crate only needs `alloc`. Disable the default `std` feature to build it
//! for embedded targets:
//!
//! ```toml
//! [dependencies]
//! reparo-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod biquad;
pub mod buffer;
pub mod math;
pub mod repair;
pub mod vibrato;

pub use biquad::{Biquad, BiquadCoefficients};
pub use buffer::SampleBuffer;
pub use math::{AMPLITUDE_FLOOR, db_to_linear, linear_to_db, mean_abs, peak, secs_to_samples};
pub use repair::{
    BroadbandEq, ClickRemover, Compressor, CompressorState, DeHum, Fade, GateState, NoiseGate,
    Normalizer, Repair,
};
pub use vibrato::{VibratoSettings, apply_vibrato};
