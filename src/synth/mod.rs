//! Synthesis: declaration graph to Terraform JSON artifacts

mod manifest;
mod terraform;

pub use manifest::{stack_path, Manifest, StackManifest, MANIFEST_FILE, STACK_FILE};
pub use terraform::{synthesize, GcsBackend, ProviderRequirement, SynthSettings};

use crate::domain::services::DeclarationGraph;
use crate::domain::value_objects::ContentHash;
use crate::error::StackResult;

/// A rendered stack document, ready to be written or compared
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub document: serde_json::Value,
    pub text: String,
    pub hash: ContentHash,
    pub declarations: usize,
}

impl Synthesis {
    /// Manifest entry describing this document
    pub fn manifest_entry(&self, stack_name: &str) -> StackManifest {
        StackManifest {
            name: stack_name.to_string(),
            synthesized_stack_path: stack_path(stack_name),
            content_hash: self.hash.clone(),
            declarations: self.declarations,
        }
    }
}

/// Synthesize and serialize; the text always ends with a newline
pub fn render(
    graph: &DeclarationGraph,
    settings: &SynthSettings,
    pretty: bool,
) -> StackResult<Synthesis> {
    let document = synthesize(graph, settings)?;
    let mut text = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    text.push('\n');

    Ok(Synthesis {
        hash: ContentHash::from_content(&text),
        declarations: graph.len(),
        document,
        text,
    })
}
