//! # Cileles Core
//!
//! Domain types, parsing, classification, and error definitions for the
//! Cileles water monitor. This crate has **no I/O framework dependencies**;
//! the HTTP clients and the server implement against it.
//!
//! ## Layout
//!
//! - `station` turns the tab-separated snapshot into [`StationRecord`]s
//! - `quality` maps pH/TDS to a [`QualityStatus`]
//! - `dataset` wraps load state and dashboard aggregates
//! - `backend` is the seam every assistant endpoint implements
//! - `message` holds chat exchanges and the session transcript

pub mod backend;
pub mod dataset;
pub mod error;
pub mod message;
pub mod quality;
pub mod station;

// Re-export key types at crate root for ergonomics
pub use backend::Backend;
pub use dataset::{DatasetSummary, LoadState};
pub use error::{Error, GatewayError, GatewayErrorKind, IngestError, Result};
pub use message::{AnswerSource, ChatExchange, Transcript};
pub use quality::{QualityStatus, classify};
pub use station::{StationRecord, parse};
