//! Application layer: orchestrates lookups, settlement, and persistence
//! around the pure domain routine.

pub mod engine;
