//! Shared helpers for interpreting API payloads.

mod numeric;

pub use numeric::numeric_field;
