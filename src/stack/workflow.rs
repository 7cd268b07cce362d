//! Workflow source script
//!
//! The workflow is a single step: call the function over HTTP with an OIDC
//! token and keep the response as `function_result`.

use crate::domain::value_objects::{OutputRef, Template};

use super::catalog::WORKFLOW_CALL_TIMEOUT_SECS;

/// Build the workflow definition around the function URL reference
pub fn source(function_url: OutputRef) -> Template {
    Template::new()
        .lit("- call_function:\n")
        .lit("    call: http.get\n")
        .lit("    args:\n")
        .lit("      url: ")
        .reference(function_url)
        .lit("\n")
        .lit("      auth:\n")
        .lit("        type: OIDC\n")
        .lit(format!("      timeout: {}\n", WORKFLOW_CALL_TIMEOUT_SECS))
        .lit("    result: function_result\n")
}
