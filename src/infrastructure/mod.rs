//! Infrastructure Layer
//!
//! All I/O lives here: artifact files and input variable sources.

pub mod fs;
pub mod vars;

pub use fs::LocalFs;
pub use vars::{load_vars_file, parse_assignment, InputSources};
