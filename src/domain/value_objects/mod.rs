//! Domain Value Objects
//!
//! Immutable value types: parameter types and values, resource addresses,
//! output references and templates, content hashes.

mod address;
mod hash;
mod param_type;
mod param_value;
mod reference;

pub use address::{Address, LogicalId, Provider, ResourceKind};
pub use hash::ContentHash;
pub use param_type::ParamType;
pub use param_value::{json_number, ParamValue};
pub use reference::{
    escape_literal, unescape_literal, FieldPath, OutputRef, PathSegment, Segment, Template,
};
