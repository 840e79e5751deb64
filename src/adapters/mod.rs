//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! file formats. Each sub-module groups adapters by infrastructure
//! concern.
//!
//! Adapter categories:
//! - `model`: JSON model artifact loading and linear scoring
//! - `persistence`: atomic output writes and the run report
//! - `sheet`: CSV statement input and annotated output

pub mod model;
pub mod persistence;
pub mod sheet;
