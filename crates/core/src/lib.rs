//! Domain logic for the omoide album service.
//!
//! This crate has no dependency on the web or database layers. It holds the
//! shared error/ID types, tag handling, and the best-effort image
//! categorization heuristic used during media ingestion.

pub mod analysis;
pub mod error;
pub mod tags;
pub mod types;
