//! funcstack - declarative composer for serverless GCP function projects
//!
//! A `ProjectStack` binds typed parameters, declares the cloud and GitHub
//! resources of one scheduled Cloud Run function project as a dependency
//! graph, and synthesizes that graph to Terraform JSON. Nothing here talks
//! to a cloud API; the provisioning engine applies the document.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod stack;
pub mod synth;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{CompositeOutput, Declaration, Parameter, Value};
pub use domain::services::{bind, BoundParameters, DeclarationGraph, Inputs};
pub use error::{StackError, StackResult};
pub use infrastructure::{InputSources, LocalFs};
pub use stack::{ComposedStack, ProjectStack, StackHandles};
pub use synth::{render, synthesize, Manifest, SynthSettings, Synthesis};
