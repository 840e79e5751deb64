//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases require from the
//! outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `OpinionModel` / `ModelSource`: pre-trained classifier and its loading
//! - `StatementSource` / `ResultSink`: sheet input and annotated output

pub mod model;
pub mod sheet;
