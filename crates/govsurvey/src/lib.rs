//! Core library for the governance survey service: the static survey
//! catalog, submission payload reconciliation, scoring, aggregation, and
//! the admin reporting surface built on top of a pluggable submission
//! store.

pub mod config;
pub mod error;
pub mod surveys;
pub mod telemetry;
