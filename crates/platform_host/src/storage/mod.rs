//! Storage contracts shared by runtime and host adapters.

pub mod durable;
