//! Command handlers
//!
//! Every handler receives the resolved configuration and a `UiContext`;
//! `main` owns config resolution, tracing setup and error reporting.

pub mod diff;
pub mod graph;
pub mod params;
pub mod pipeline;
pub mod synth;
