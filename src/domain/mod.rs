//! Domain Layer
//!
//! The declaration model, free of I/O.
//!
//! ## Structure
//!
//! - `entities/` - Parameter, Declaration, CompositeOutput
//! - `value_objects/` - types, values, addresses, references, hashes
//! - `services/` - parameter binding and the declaration graph

pub mod entities;
pub mod services;
pub mod value_objects;
