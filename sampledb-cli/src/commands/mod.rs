//! Command implementations for the sampledb CLI

pub mod serve;

pub use serve::run_serve;
