//! The codec pipeline: the planner resolves quality into a parse, the
//! modeler partitions tokens into context-classified blocks, and the
//! encoder/decoder orchestrators turn that into (and back out of) the
//! self-describing bit stream.

pub mod decoder;
pub mod encoder;
pub mod modeler;
pub mod models;
pub mod planner;

#[cfg(test)]
mod roundtrip_tests;
