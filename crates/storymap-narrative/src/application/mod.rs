//! Application layer: operations exposed to callers.

pub mod query_handlers;
