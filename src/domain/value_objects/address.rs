//! Resource addresses
//!
//! An address is the Terraform identity of a declaration: resource type plus
//! logical name, e.g. `google_storage_bucket.bucket`.

use std::fmt;

use crate::error::{StackError, StackResult};

/// Provider that owns a resource type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Provider {
    Google,
    Github,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Github => "github",
        }
    }
}

/// Resource types the stack declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    ProjectService,
    ServiceAccount,
    ServiceAccountKey,
    StorageBucket,
    CloudRunService,
    ProjectIamMember,
    ArtifactRegistryRepository,
    ArtifactRegistryRepositoryIamMember,
    WorkflowsWorkflow,
    CloudSchedulerJob,
    MonitoringAlertPolicy,
    GithubRepository,
    GithubActionsSecret,
    GithubActionsVariable,
}

impl ResourceKind {
    /// Terraform resource type name
    pub fn terraform_type(&self) -> &'static str {
        match self {
            ResourceKind::ProjectService => "google_project_service",
            ResourceKind::ServiceAccount => "google_service_account",
            ResourceKind::ServiceAccountKey => "google_service_account_key",
            ResourceKind::StorageBucket => "google_storage_bucket",
            ResourceKind::CloudRunService => "google_cloud_run_service",
            ResourceKind::ProjectIamMember => "google_project_iam_member",
            ResourceKind::ArtifactRegistryRepository => "google_artifact_registry_repository",
            ResourceKind::ArtifactRegistryRepositoryIamMember => {
                "google_artifact_registry_repository_iam_member"
            }
            ResourceKind::WorkflowsWorkflow => "google_workflows_workflow",
            ResourceKind::CloudSchedulerJob => "google_cloud_scheduler_job",
            ResourceKind::MonitoringAlertPolicy => "google_monitoring_alert_policy",
            ResourceKind::GithubRepository => "github_repository",
            ResourceKind::GithubActionsSecret => "github_actions_secret",
            ResourceKind::GithubActionsVariable => "github_actions_variable",
        }
    }

    pub fn provider(&self) -> Provider {
        match self {
            ResourceKind::GithubRepository
            | ResourceKind::GithubActionsSecret
            | ResourceKind::GithubActionsVariable => Provider::Github,
            _ => Provider::Google,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.terraform_type())
    }
}

/// Validated logical name of a declaration
///
/// Terraform names start with a letter or underscore and contain only
/// letters, digits, underscores and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn new(id: impl Into<String>) -> StackResult<Self> {
        let id = id.into();
        if Self::is_valid(&id) {
            Ok(Self(id))
        } else {
            Err(StackError::InvalidLogicalId { id })
        }
    }

    /// Derive one id per fan-out item: `prefix` + `_` + sanitized item.
    ///
    /// Every character outside `[A-Za-z0-9_]` becomes `_`, so
    /// `("service", "run.googleapis.com")` yields `service_run_googleapis_com`.
    pub fn fan_out(prefix: &str, item: &str) -> StackResult<Self> {
        let slug: String = item
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        Self::new(format!("{}_{}", prefix, slug))
    }

    pub fn is_valid(id: &str) -> bool {
        let mut chars = id.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terraform address of a declaration
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    kind: ResourceKind,
    name: LogicalId,
}

impl Address {
    pub fn new(kind: ResourceKind, name: LogicalId) -> Self {
        Self { kind, name }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn name(&self) -> &LogicalId {
        &self.name
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.kind, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_id_rejects_leading_digit_and_dots() {
        assert!(LogicalId::new("bucket").is_ok());
        assert!(LogicalId::new("_private-1").is_ok());
        assert!(LogicalId::new("1bucket").is_err());
        assert!(LogicalId::new("a.b").is_err());
        assert!(LogicalId::new("").is_err());
    }

    #[test]
    fn fan_out_sanitizes_items() {
        let id = LogicalId::fan_out("service", "run.googleapis.com").unwrap();
        assert_eq!(id.as_str(), "service_run_googleapis_com");

        let id = LogicalId::fan_out("sa_binding", "roles/bigquery.dataEditor").unwrap();
        assert_eq!(id.as_str(), "sa_binding_roles_bigquery_dataEditor");
    }

    #[test]
    fn address_display() {
        let address = Address::new(
            ResourceKind::StorageBucket,
            LogicalId::new("bucket").unwrap(),
        );
        assert_eq!(address.to_string(), "google_storage_bucket.bucket");
        assert_eq!(address.kind().provider(), Provider::Google);
    }

    #[test]
    fn github_kinds_belong_to_github_provider() {
        assert_eq!(ResourceKind::GithubActionsSecret.provider(), Provider::Github);
        assert_eq!(ResourceKind::GithubRepository.terraform_type(), "github_repository");
    }
}
