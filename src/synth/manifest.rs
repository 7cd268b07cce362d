//! Synth manifest
//!
//! `manifest.json` sits next to the `stacks/` directory and records, per
//! stack, where its document lives and the hash of what was written.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ContentHash;

pub const MANIFEST_FILE: &str = "manifest.json";
pub const STACK_FILE: &str = "cdk.tf.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackManifest {
    pub name: String,
    /// Relative to the output directory
    pub synthesized_stack_path: String,
    pub content_hash: ContentHash,
    pub declarations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    #[serde(default)]
    pub stacks: BTreeMap<String, StackManifest>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            stacks: BTreeMap::new(),
        }
    }
}

impl Manifest {
    /// Record a stack, replacing any previous entry of the same name
    pub fn record(&mut self, stack: StackManifest) {
        self.stacks.insert(stack.name.clone(), stack);
    }

    pub fn stack(&self, name: &str) -> Option<&StackManifest> {
        self.stacks.get(name)
    }
}

/// Stack document path relative to the output directory
pub fn stack_path(stack_name: &str) -> String {
    format!("stacks/{}/{}", stack_name, STACK_FILE)
}
