//! Road accident severity prediction.
//!
//! Driving conditions are assembled into a [`prediction::FeatureRecord`], scored by a
//! pre-trained [`prediction::ModelOracle`] and turned into a confidence value, rule-based
//! risk explanations and safety advice.

pub mod config;
pub mod error;
pub mod prediction;
pub mod telemetry;
