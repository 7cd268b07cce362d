//! Domain Entities
//!
//! - `Parameter` - a typed stack input
//! - `Declaration` - a resource the engine should manage
//! - `CompositeOutput` - a value exposed by the stack

mod declaration;
mod output;
mod parameter;

pub use declaration::{Declaration, Value, SENSITIVE};
pub use output::CompositeOutput;
pub use parameter::{Parameter, ParameterSummary};
