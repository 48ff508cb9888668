//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring for durable storage and live viewport
//! queries. Every adapter compiles on native targets as an inert fallback so runtime unit tests
//! can link against it.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;
pub mod viewport;

pub use storage::local_store::WebDurableStore;
pub use viewport::{viewport_metrics, FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};
