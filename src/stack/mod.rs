//! The serverless function stack
//!
//! `ProjectStack` composes one GitHub repository wired to a scheduled Cloud
//! Run function: capability activations, service account and key, optional
//! bucket, IAM bindings, artifact registry, workflow, scheduler, alerting and
//! the repository's actions secret and variables.

pub mod catalog;
mod composer;
pub mod naming;
pub mod parameters;
pub mod workflow;

use serde::{Deserialize, Serialize};

pub use composer::{ComposedStack, ProjectStack, StackHandles, RUN_URL_OUTPUT};

/// GitHub repository visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Internal,
    Private,
    Public,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }
}

/// How the function repository is created from its template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySettings {
    pub template_owner: String,
    pub template_repository: String,
    pub visibility: Visibility,
    pub include_all_branches: bool,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            template_owner: catalog::DEFAULT_GITHUB_OWNER.to_string(),
            template_repository: catalog::DEFAULT_TEMPLATE_REPOSITORY.to_string(),
            visibility: Visibility::default(),
            include_all_branches: false,
        }
    }
}
