//! Typed host contracts shared by the desktop runtime and its browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes the synchronous
//! durable key-value store contract plus JSON helpers, while the concrete `localStorage` adapter
//! lives in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod storage;

pub use storage::durable::{
    load_json_with, save_json_with, DurableStore, MemoryDurableStore, NoopDurableStore,
};
