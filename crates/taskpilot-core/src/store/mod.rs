//! Store implementations.

mod json;

pub use json::JsonTaskStore;
