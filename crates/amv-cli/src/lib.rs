//! CLI library components for the Author Match Verifier.

pub mod logging;
pub mod pipeline;
