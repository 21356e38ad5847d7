//! Application layer containing the round-up workflow.
//!
//! `RoundUpOrchestrator` drives the domain ports in a fixed sequence and turns
//! their answers into a single `RoundUpReport` or a single error.

pub mod orchestrator;
