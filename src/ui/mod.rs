//! Terminal and JSON presentation

pub mod context;
pub mod diff;
pub mod json;
pub mod output;
pub mod terminal;
pub mod theme;

pub use context::UiContext;
