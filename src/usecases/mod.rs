//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! analysis workflow.
//!
//! Use cases:
//! - `OpinionAnalyzer`: ratios → feature filtering → model → labels
//! - `run_analysis`: read sheet, analyse, write results

pub mod analysis;
