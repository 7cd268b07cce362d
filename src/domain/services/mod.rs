//! Domain Services
//!
//! Pure logic over domain entities, no I/O:
//! - `binder` - binds inputs to declared parameters
//! - `graph` - the declaration graph and its structural checks

mod binder;
mod graph;
mod suggest;

pub use binder::{bind, BindWarning, Binding, BoundParameters, Inputs};
pub use graph::DeclarationGraph;
pub use suggest::suggest_closest;
