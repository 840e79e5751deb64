//! Persistence Adapters - Output Files
//!
//! Atomic file writes shared by the sheet writer, and the JSON run
//! report produced at the end of each analysis.

pub mod atomic;
pub mod report;

pub use atomic::write_atomic;
pub use report::RunReport;
