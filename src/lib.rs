//! Audit Opinion Predictor - Library Root
//!
//! Ratio engine, feature selection and classifier plumbing for firm
//! statement sheets. Re-exports all modules for the binary, integration
//! tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
