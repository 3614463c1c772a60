//! Data access adapters for the Wayfarer engine.
//!
//! Responsibilities:
//! - Implement core provider traits against remote services.
//! - Encapsulate wire formats and their decoding.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `wayfarer-core`).
//! - Keep blocking I/O off async executors; prefer async-capable clients.
//!
//! Invariants:
//! - Credentials never appear in error messages or logs.
//! - No global mutable state.

pub mod routing;
